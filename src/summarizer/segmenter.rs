//! Sentence segmentation
//!
//! The primary strategy walks Unicode (UAX #29) sentence boundaries and then
//! re-joins fragments that were split inside a sentence:
//!
//! - after a known abbreviation such as "Inc." or "U.S.";
//! - after a reference abbreviation such as "No." or "Sec.", but only when a
//!   number follows ("No. 5", "Art. IV");
//! - after an initial followed by a capitalised word ("J. Smith").
//!
//! UAX #29 never breaks before a lowercase word, so "ruled. the appeal" stays
//! in one sentence even though a trained boundary model would split it.
//! When the abbreviation model is unavailable the rule-based splitter is
//! used instead.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::errors::ResourceError;
use crate::resources::LinguisticResources;

static TERMINAL_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("terminal punctuation regex compiles"));

/// Marks an abbreviation that only continues a sentence before a number.
const NUMERIC_MARKER: &str = "numeric";

/// Abbreviations that end with a period but do not end a sentence.
#[derive(Debug, Clone, Default)]
pub struct AbbreviationModel {
    abbreviations: HashSet<String>,
    numeric: HashSet<String>,
}

impl AbbreviationModel {
    /// Parse one abbreviation per line; `#` starts a comment line. A line
    /// of the form `no numeric` registers an abbreviation that only holds
    /// before a number.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` when the data holds no entries or a line has an
    /// unknown qualifier.
    pub fn parse(raw: &str, name: &str) -> Result<Self, ResourceError> {
        let mut model = Self::default();

        for line in raw.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let (word, numeric) = match fields.as_slice() {
                [word] => (*word, false),
                [word, qualifier] if *qualifier == NUMERIC_MARKER => (*word, true),
                _ => return Err(ResourceError::Malformed(name.to_string())),
            };
            let word = word.trim_end_matches('.').to_lowercase();
            if word.is_empty() {
                continue;
            }
            if numeric {
                model.numeric.insert(word);
            } else {
                model.abbreviations.insert(word);
            }
        }

        if model.is_empty() {
            return Err(ResourceError::Malformed(name.to_string()));
        }
        Ok(model)
    }

    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            abbreviations: words.into_iter().map(str::to_lowercase).collect(),
            numeric: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_numeric<'a>(mut self, words: impl IntoIterator<Item = &'a str>) -> Self {
        self.numeric.extend(words.into_iter().map(str::to_lowercase));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.abbreviations.len() + self.numeric.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.abbreviations.is_empty() && self.numeric.is_empty()
    }

    /// Whether the boundary between `fragment` and the `next` fragment falls
    /// inside a sentence, e.g. "Acme Inc." | "The Buyer".
    #[must_use]
    pub fn continues(&self, fragment: &str, next: &str) -> bool {
        let Some(word) = word_before_period(fragment) else {
            return false;
        };
        let lowered = word.to_lowercase();
        if self.abbreviations.contains(&lowered) {
            return true;
        }
        if self.numeric.contains(&lowered) {
            return starts_with_number(next);
        }
        is_initial(word) && starts_with_uppercase(next)
    }
}

fn word_before_period(fragment: &str) -> Option<&str> {
    fragment
        .trim_end()
        .strip_suffix('.')?
        .split_whitespace()
        .next_back()
}

// "J" or "J.R": single capital letters separated by periods.
fn is_initial(word: &str) -> bool {
    word.split('.').all(|part| {
        let mut chars = part.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
    })
}

fn starts_with_uppercase(text: &str) -> bool {
    text.trim_start()
        .chars()
        .next()
        .is_some_and(char::is_uppercase)
}

// Arabic numbers, or Roman numerals of two or more letters ("IV", "XII").
fn starts_with_number(text: &str) -> bool {
    let Some(token) = text.split_whitespace().next() else {
        return false;
    };
    let token = token.trim_end_matches(['.', '!', '?']);
    if token.starts_with(|c: char| c.is_ascii_digit()) {
        return true;
    }
    token.chars().count() >= 2 && token.chars().all(|c| "IVXLCDM".contains(c))
}

/// Which strategy produced a segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStrategy {
    Statistical,
    RuleBased,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub sentences: Vec<String>,
    pub strategy: SegmentStrategy,
}

/// Split `text` into trimmed, non-empty sentences in source order.
#[must_use]
pub fn segment(text: &str, resources: &LinguisticResources) -> Segmentation {
    match resources.abbreviations() {
        Ok(model) => Segmentation {
            sentences: split_with_model(text, model),
            strategy: SegmentStrategy::Statistical,
        },
        Err(e) => {
            debug!("Sentence model unavailable ({}), using rule-based splitter", e);
            Segmentation {
                sentences: split_rule_based(text),
                strategy: SegmentStrategy::RuleBased,
            }
        }
    }
}

#[must_use]
pub fn split_with_model(text: &str, model: &AbbreviationModel) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();
    let mut pending = String::new();
    let mut fragments = text.unicode_sentences().peekable();

    while let Some(fragment) = fragments.next() {
        pending.push_str(fragment);
        if fragments
            .peek()
            .is_some_and(|next| model.continues(&pending, next))
        {
            continue;
        }
        push_trimmed(&mut sentences, &pending);
        pending.clear();
    }

    sentences
}

/// Split on runs of `.`, `!` or `?` followed by whitespace.
///
/// Never fails: text without terminal punctuation comes back as a single
/// sentence and empty text as no sentences.
#[must_use]
pub fn split_rule_based(text: &str) -> Vec<String> {
    TERMINAL_RUN_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn push_trimmed(sentences: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
