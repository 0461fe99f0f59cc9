//! Top-k sentence selection
//!
//! Keeps a bounded min-heap of size k while scanning the score table once,
//! so the cost is `O(n log k)` rather than a full sort. Among exact ties the
//! sentence that appears earlier in the source ranks higher.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::tfidf::ScoreTable;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    score: f64,
    position: usize,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Clamp a requested sentence count to `[1, candidates]`.
///
/// Zero candidates yield zero regardless of the request.
#[must_use]
pub fn clamp_k(requested: i64, candidates: usize) -> usize {
    if candidates == 0 {
        return 0;
    }
    usize::try_from(requested.max(1))
        .unwrap_or(usize::MAX)
        .min(candidates)
}

/// The `k` highest-scoring sentences, highest first.
#[must_use]
pub fn select_top_k(scores: &ScoreTable, k: i64) -> Vec<String> {
    let k = clamp_k(k, scores.len());
    if k == 0 {
        return Vec::new();
    }

    let entries: Vec<(&str, f64)> = scores.iter().collect();
    let mut heap: BinaryHeap<Reverse<Candidate>> = BinaryHeap::with_capacity(k + 1);
    for (position, (_, score)) in entries.iter().enumerate() {
        heap.push(Reverse(Candidate {
            score: *score,
            position,
        }));
        if heap.len() > k {
            heap.pop();
        }
    }

    // Ascending order of Reverse<_> is descending rank.
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(c)| entries[c.position].0.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::stopwords::StopwordSet;
    use crate::summarizer::tfidf::score_sentences;

    fn table(sentences: &[&str]) -> ScoreTable {
        let sentences: Vec<String> = sentences.iter().map(|s| (*s).to_string()).collect();
        let stopwords = StopwordSet::build_with(|| Ok(Vec::new()));
        score_sentences(&sentences, &sentences, &stopwords).1
    }

    #[test]
    fn test_clamp_k() {
        assert_eq!(clamp_k(3, 10), 3);
        assert_eq!(clamp_k(0, 10), 1);
        assert_eq!(clamp_k(-5, 10), 1);
        assert_eq!(clamp_k(50, 4), 4);
        assert_eq!(clamp_k(3, 0), 0);
        assert_eq!(clamp_k(i64::MAX, 2), 2);
    }

    #[test]
    fn test_selects_highest_scores_in_descending_order() {
        let scores = table(&[
            "alpha.",
            "alpha beta gamma delta epsilon.",
            "alpha beta gamma.",
        ]);
        let selected = select_top_k(&scores, 2);
        assert_eq!(
            selected,
            vec!["alpha beta gamma delta epsilon.", "alpha beta gamma."]
        );
    }

    #[test]
    fn test_ties_prefer_earlier_sentences() {
        // Uniform scoring: every sentence ties.
        let scores = table(&["the.", "and.", "of.", "to."]);
        assert_eq!(select_top_k(&scores, 2), vec!["the.", "and."]);
        assert_eq!(select_top_k(&scores, 4), vec!["the.", "and.", "of.", "to."]);
    }

    #[test]
    fn test_non_positive_k_selects_one() {
        let scores = table(&["alpha beta.", "gamma."]);
        assert_eq!(select_top_k(&scores, 0).len(), 1);
        assert_eq!(select_top_k(&scores, -3).len(), 1);
    }

    #[test]
    fn test_empty_table_selects_nothing() {
        assert!(select_top_k(&ScoreTable::empty(), 3).is_empty());
    }

    #[test]
    fn test_growing_k_adds_exactly_one_sentence() {
        let scores = table(&[
            "indemnity clause survives termination.",
            "notice.",
            "governing law venue jurisdiction arbitration seat.",
            "fees costs.",
        ]);
        for k in 1..4 {
            let smaller = select_top_k(&scores, k);
            let larger = select_top_k(&scores, k + 1);
            assert_eq!(larger.len(), smaller.len() + 1);
            assert_eq!(&larger[..smaller.len()], smaller.as_slice());
        }
    }
}
