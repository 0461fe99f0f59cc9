//! Dictionary lemmatization used for scoring only
//!
//! Each whitespace token is reduced to its base form by looking it up in
//! the lemma dictionary's irregular forms, then by trying the noun
//! detachment rules below and keeping candidates the dictionary knows.
//! Without a dictionary the sentence passes through unchanged.
//!
//! Only nouns are reduced. Verb forms such as "held" or "implies" are left
//! as they are, so the dictionary lists irregular plurals and nothing else.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::errors::ResourceError;
use crate::resources::LinguisticResources;

/// Suffix substitutions for plural nouns, most specific last.
const NOUN_DETACHMENTS: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Known base forms plus irregular inflections.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    bases: HashSet<String>,
    irregular: HashMap<String, String>,
}

impl Lexicon {
    /// Each line is either `base` or `inflected base`; `#` starts a comment line.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` when the data holds no entries or a line has more
    /// than two fields.
    pub fn parse(raw: &str, name: &str) -> Result<Self, ResourceError> {
        let mut lexicon = Self::default();

        for line in raw.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [base] => lexicon.add_base(base),
                [inflected, base] => lexicon.add_irregular(inflected, base),
                _ => return Err(ResourceError::Malformed(name.to_string())),
            }
        }

        if lexicon.bases.is_empty() {
            return Err(ResourceError::Malformed(name.to_string()));
        }
        Ok(lexicon)
    }

    pub fn add_base(&mut self, base: &str) {
        self.bases.insert(base.to_lowercase());
    }

    pub fn add_irregular(&mut self, inflected: &str, base: &str) {
        let base = base.to_lowercase();
        self.bases.insert(base.clone());
        self.irregular.insert(inflected.to_lowercase(), base);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len() + self.irregular.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Base form of a single word, if the dictionary can resolve it.
    ///
    /// Among several valid candidates the shortest wins.
    #[must_use]
    pub fn lemma(&self, word: &str) -> Option<String> {
        let form = word.to_lowercase();

        if let Some(base) = self.irregular.get(&form) {
            return Some(base.clone());
        }

        let mut candidates: Vec<String> = Vec::new();
        if self.bases.contains(&form) {
            candidates.push(form.clone());
        }
        for (suffix, replacement) in NOUN_DETACHMENTS {
            if let Some(stem) = form.strip_suffix(suffix) {
                let candidate = format!("{stem}{replacement}");
                if !candidate.is_empty() && self.bases.contains(&candidate) {
                    candidates.push(candidate);
                }
            }
        }

        candidates.into_iter().min_by_key(|c| c.chars().count())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Lemmatizer<'a> {
    lexicon: Option<&'a Lexicon>,
}

impl<'a> Lemmatizer<'a> {
    #[must_use]
    pub fn new(lexicon: Option<&'a Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Lemmatizer backed by the shared dictionary, or a passthrough one if it
    /// cannot be acquired.
    #[must_use]
    pub fn from_resources(resources: &'a LinguisticResources) -> Self {
        match resources.lexicon() {
            Ok(lexicon) => Self::new(Some(lexicon)),
            Err(e) => {
                debug!("Lemma dictionary unavailable ({}), lemmatization disabled", e);
                Self::new(None)
            }
        }
    }

    #[must_use]
    pub fn is_passthrough(&self) -> bool {
        self.lexicon.is_none()
    }

    /// Lemmatize every whitespace token and re-join with single spaces.
    #[must_use]
    pub fn lemmatize(&self, sentence: &str) -> String {
        let Some(lexicon) = self.lexicon else {
            return sentence.to_string();
        };

        sentence
            .split_whitespace()
            .map(|token| lemmatize_token(lexicon, token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// Terminal punctuation stays attached to the token it followed.
fn lemmatize_token(lexicon: &Lexicon, token: &str) -> String {
    let word = token.trim_end_matches(['.', '!', '?']);
    let punctuation = &token[word.len()..];

    match lexicon.lemma(word) {
        Some(lemma) => format!("{lemma}{punctuation}"),
        None => token.to_string(),
    }
}
