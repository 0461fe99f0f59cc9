//! Stopwords excluded from sentence scoring
//!
//! The set is the standard English list from the `stop-words` crate unioned
//! with legal boilerplate. It is built once per process and is read-only
//! afterwards; word-cloud rendering reads the same list through
//! [`stopword_list`].

use once_cell::sync::Lazy;
use std::collections::HashSet;
use stop_words::{LANGUAGE, get};
use tracing::{info, warn};

use crate::errors::ResourceError;

/// Filler words common in contracts and court filings.
pub const LEGAL_STOPWORDS: &[&str] = &[
    "the",
    "is",
    "and",
    "to",
    "of",
    "a",
    "in",
    "for",
    "on",
    "with",
    "by",
    "as",
    "from",
    "that",
    "this",
    "an",
    "it",
    "at",
    "which",
    "be",
    "have",
    "or",
    "may",
    "not",
    "will",
    "has",
    "are",
    "you",
    "shall",
    "any",
    "can",
    "does",
    "if",
    "your",
    "all",
    "between",
    "under",
    "above",
    "etc",
    "hereby",
    "thereof",
    "pursuant",
    "whereas",
    "party",
    "parties",
    "agreement",
    "aforementioned",
    "said",
    "now",
    "therefore",
    "witnesseth",
    "in witness whereof",
    "executed",
    "date",
    "first",
    "second",
    "third",
];

static STOPWORDS: Lazy<StopwordSet> = Lazy::new(StopwordSet::build);

#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Standard English list plus the legal supplement.
    #[must_use]
    pub fn build() -> Self {
        Self::build_with(standard_english)
    }

    /// Build from a custom standard-list loader. If the loader fails only the
    /// legal supplement is used.
    pub fn build_with<F>(load_standard: F) -> Self
    where
        F: FnOnce() -> Result<Vec<String>, ResourceError>,
    {
        let mut words: HashSet<String> = match load_standard() {
            Ok(standard) => standard.into_iter().map(|w| w.to_lowercase()).collect(),
            Err(e) => {
                warn!("Standard stopword list unavailable, using legal supplement only: {}", e);
                HashSet::new()
            }
        };
        words.extend(LEGAL_STOPWORDS.iter().map(|w| (*w).to_string()));

        info!("Built stopword set with {} entries", words.len());
        Self { words }
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Sorted copy of every entry.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut list: Vec<String> = self.words.iter().cloned().collect();
        list.sort_unstable();
        list
    }
}

fn standard_english() -> Result<Vec<String>, ResourceError> {
    let words: Vec<String> = get(LANGUAGE::English)
        .iter()
        .map(|s| s.to_string())
        .collect();
    if words.is_empty() {
        return Err(ResourceError::Malformed("stop-words/english".to_string()));
    }
    Ok(words)
}

/// The process-wide stopword set.
#[must_use]
pub fn stopwords() -> &'static StopwordSet {
    &STOPWORDS
}

/// The assembled stopword list, sorted, for consumers such as word clouds.
#[must_use]
pub fn stopword_list() -> Vec<String> {
    STOPWORDS.to_sorted_vec()
}
