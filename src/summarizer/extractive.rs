use tracing::debug;

use super::lemmatizer::Lemmatizer;
use super::normalize::normalize;
use super::segmenter::segment;
use super::selector::select_top_k;
use super::stopwords::StopwordSet;
use super::tfidf::score_sentences;
use crate::resources::LinguisticResources;

pub const DEFAULT_NUM_SENTENCES: i64 = 3;

/// Extractive summary: the `num_sentences` highest-scoring sentences of
/// `text`, highest first, joined by single spaces.
///
/// Never fails. Empty input, or input with nothing left to score, yields an
/// empty string; `num_sentences` below 1 is treated as 1.
#[must_use]
pub fn summarize_extractive(
    text: &str,
    num_sentences: i64,
    resources: &LinguisticResources,
    stopwords: &StopwordSet,
) -> String {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return String::new();
    }

    let segmentation = segment(&normalized, resources);
    let lemmatizer = Lemmatizer::from_resources(resources);
    let lemmas: Vec<String> = segmentation
        .sentences
        .iter()
        .map(|s| lemmatizer.lemmatize(s))
        .collect();

    let (survivors, scores) = score_sentences(&segmentation.sentences, &lemmas, stopwords);
    if survivors.is_empty() {
        return String::new();
    }

    let selected = select_top_k(&scores, num_sentences);
    debug!(
        "Selected {} of {} sentences (segmentation: {:?}, scoring: {:?}, lemmatized: {})",
        selected.len(),
        survivors.len(),
        segmentation.strategy,
        scores.mode(),
        !lemmatizer.is_passthrough()
    );

    selected.join(" ")
}
