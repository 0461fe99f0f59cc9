//! TF-IDF sentence scoring
//!
//! Every lemmatized sentence is one document of a corpus made of the input
//! text only. Weights follow the usual smoothed formulation:
//!
//! - tokens are lowercase runs of two or more word characters, stopwords removed
//! - `idf(t) = ln((1 + n) / (1 + df(t))) + 1`
//! - each row holds `count * idf`, then is L2-normalised
//!
//! A sentence's score is the sum of its row, i.e. how much distinctive
//! non-stopword content it carries.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::{debug, warn};

use super::stopwords::StopwordSet;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token regex compiles"));

/// Score given to every sentence when vectorization fails.
pub const UNIFORM_SCORE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorizeError {
    #[error("empty vocabulary; every term is a stopword or too short")]
    EmptyVocabulary,
}

/// How the scores in a [`ScoreTable`] were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    Tfidf,
    Uniform,
}

/// Scores keyed by surface sentence text, in first-seen source order.
///
/// A sentence that occurs twice keeps its first position and the score of
/// its last occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    scores: IndexMap<String, f64>,
    mode: ScoringMode,
}

impl ScoreTable {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            scores: IndexMap::new(),
            mode: ScoringMode::Tfidf,
        }
    }

    fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a String, f64)>,
        mode: ScoringMode,
    ) -> Self {
        let mut scores = IndexMap::new();
        for (sentence, score) in pairs {
            scores.insert(sentence.clone(), score);
        }
        Self { scores, mode }
    }

    #[must_use]
    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    #[must_use]
    pub fn get(&self, sentence: &str) -> Option<f64> {
        self.scores.get(sentence).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(s, score)| (s.as_str(), *score))
    }
}

/// Sparse document-term matrix with L2-normalised rows.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
    pub rows: Vec<Vec<(usize, f64)>>,
}

impl TfidfMatrix {
    #[must_use]
    pub fn row_sums(&self) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|(_, w)| w).sum::<f64>())
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TfidfVectorizer<'a> {
    stopwords: &'a StopwordSet,
}

impl<'a> TfidfVectorizer<'a> {
    #[must_use]
    pub fn new(stopwords: &'a StopwordSet) -> Self {
        Self { stopwords }
    }

    #[must_use]
    pub fn tokenize(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        TOKEN_RE
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.stopwords.contains(t))
            .map(str::to_string)
            .collect()
    }

    /// Learn the vocabulary and IDF over `documents` and weight each one.
    ///
    /// # Errors
    ///
    /// Returns `EmptyVocabulary` when no document contributes a single term.
    pub fn fit_transform<S: AsRef<str>>(
        &self,
        documents: &[S],
    ) -> Result<TfidfMatrix, VectorizeError> {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|d| self.tokenize(d.as_ref()))
            .collect();

        // Sorted vocabulary gives stable column indices.
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let n_documents = documents.len() as f64;
        let mut column: HashMap<&str, usize> = HashMap::with_capacity(document_frequency.len());
        let mut vocabulary = Vec::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.iter().enumerate() {
            column.insert(*term, index);
            vocabulary.push((*term).to_string());
            idf.push(((1.0 + n_documents) / (1.0 + *df as f64)).ln() + 1.0);
        }

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
                for token in tokens {
                    let index = column[token.as_str()];
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
                let mut row: Vec<(usize, f64)> = counts
                    .into_iter()
                    .map(|(index, count)| (index, count * idf[index]))
                    .collect();
                let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in &mut row {
                        *w /= norm;
                    }
                }
                row
            })
            .collect();

        Ok(TfidfMatrix {
            vocabulary,
            idf,
            rows,
        })
    }
}

/// Pair sentences with their lemmas, drop empty lemmas, and score the rest.
///
/// Returns the surviving surface sentences in source order together with
/// their scores. If vectorization fails every survivor scores
/// [`UNIFORM_SCORE`].
#[must_use]
pub fn score_sentences(
    sentences: &[String],
    lemmas: &[String],
    stopwords: &StopwordSet,
) -> (Vec<String>, ScoreTable) {
    let (survivors, survivor_lemmas): (Vec<String>, Vec<&str>) = sentences
        .iter()
        .zip(lemmas)
        .filter(|(_, lemma)| !lemma.trim().is_empty())
        .map(|(sentence, lemma)| (sentence.clone(), lemma.as_str()))
        .unzip();

    if survivors.is_empty() {
        return (Vec::new(), ScoreTable::empty());
    }

    let table = match TfidfVectorizer::new(stopwords).fit_transform(&survivor_lemmas) {
        Ok(matrix) => {
            debug!(
                "Scored {} sentences over {} terms",
                survivors.len(),
                matrix.vocabulary.len()
            );
            ScoreTable::from_pairs(survivors.iter().zip(matrix.row_sums()), ScoringMode::Tfidf)
        }
        Err(e) => {
            warn!("TF-IDF scoring failed, using uniform scores: {}", e);
            ScoreTable::from_pairs(
                survivors.iter().map(|s| (s, UNIFORM_SCORE)),
                ScoringMode::Uniform,
            )
        }
    };

    (survivors, table)
}
