//! Summarization pipeline and mode dispatch
//!
//! The extractive path (normalize → segment → lemmatize → TF-IDF → top-k)
//! never fails for any input. The abstractive path calls out to a neural
//! model and falls back to the extractive path when that model is disabled
//! or errors, so [`Summarizer::summarize`] always returns a string.

pub mod extractive;
pub mod lemmatizer;
pub mod normalize;
pub mod segmenter;
pub mod selector;
pub mod stopwords;
pub mod tfidf;

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::ai::{AbstractiveSummarizer, InferenceClient};
use crate::core::config::AppConfig;
use crate::core::models::{ApiResponse, Comparison, Mode, SummarizeRequest, SummaryLength};
use crate::errors::SummarizerError;
use crate::resources::{LinguisticResources, ResourceConfig};

pub use extractive::{DEFAULT_NUM_SENTENCES, summarize_extractive};
pub use normalize::normalize;
pub use stopwords::{StopwordSet, stopword_list, stopwords};

/// Entry point for the service layer. Cheap to clone; all state is shared.
#[derive(Clone)]
pub struct Summarizer {
    resources: Arc<LinguisticResources>,
    stopwords: &'static StopwordSet,
    abstractive: Option<Arc<dyn AbstractiveSummarizer>>,
}

impl Summarizer {
    #[must_use]
    pub fn new(
        resources: Arc<LinguisticResources>,
        abstractive: Option<Arc<dyn AbstractiveSummarizer>>,
    ) -> Self {
        Self {
            resources,
            stopwords: stopwords(),
            abstractive,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the inference HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummarizerError> {
        let resources = Arc::new(LinguisticResources::new(ResourceConfig::from(config)));
        let abstractive: Option<Arc<dyn AbstractiveSummarizer>> = if config.abstractive_enabled {
            Some(Arc::new(InferenceClient::from_config(config)?))
        } else {
            info!("Abstractive summarization disabled; extractive only");
            None
        };
        Ok(Self::new(resources, abstractive))
    }

    #[must_use]
    pub fn resources(&self) -> &LinguisticResources {
        &self.resources
    }

    /// Synchronous extractive summary. May block on first use while
    /// linguistic resources are loaded or fetched; inside an async context
    /// prefer [`Summarizer::summarize_extractive_async`].
    #[must_use]
    pub fn summarize_extractive(&self, text: &str, num_sentences: i64) -> String {
        summarize_extractive(text, num_sentences, &self.resources, self.stopwords)
    }

    /// Extractive summary run on the blocking thread pool.
    pub async fn summarize_extractive_async(&self, text: &str, num_sentences: i64) -> String {
        let this = self.clone();
        let text = text.to_string();
        match tokio::task::spawn_blocking(move || this.summarize_extractive(&text, num_sentences))
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                error!("Extractive summarization task failed: {}", e);
                String::new()
            }
        }
    }

    /// Abstractive summary, or the reason it could not be produced.
    ///
    /// # Errors
    ///
    /// Returns an error if no abstractive summarizer is configured or the
    /// model call fails.
    pub async fn summarize_abstractive(
        &self,
        text: &str,
        length: SummaryLength,
    ) -> Result<String, SummarizerError> {
        let Some(model) = &self.abstractive else {
            return Err(SummarizerError::InferenceError(
                "abstractive summarization is disabled".to_string(),
            ));
        };
        if text.is_empty() {
            return Ok(String::new());
        }
        model.summarize(text, length.bounds()).await
    }

    /// Summarize `text` in the requested mode.
    ///
    /// `Mode::Compare` behaves like `Mode::Abstractive` here; use
    /// [`Summarizer::compare`] for both summaries.
    pub async fn summarize(
        &self,
        text: &str,
        mode: Mode,
        length: SummaryLength,
        num_sentences: i64,
    ) -> String {
        let cleaned = normalize(text);
        match mode {
            Mode::Extractive => self.summarize_extractive_async(&cleaned, num_sentences).await,
            Mode::Abstractive | Mode::Compare => {
                match self.summarize_abstractive(&cleaned, length).await {
                    Ok(summary) => summary,
                    Err(e) => {
                        warn!("Abstractive summary unavailable, falling back to extractive: {}", e);
                        self.summarize_extractive_async(&cleaned, num_sentences).await
                    }
                }
            }
        }
    }

    /// Both summaries of the same text.
    pub async fn compare(&self, text: &str, length: SummaryLength, num_sentences: i64) -> Comparison {
        let (extractive, abstractive) = tokio::join!(
            self.summarize(text, Mode::Extractive, length, num_sentences),
            self.summarize(text, Mode::Abstractive, length, num_sentences),
        );
        Comparison {
            extractive,
            abstractive,
        }
    }

    /// Answer a service-layer request with the `{"ok", "data"}` envelope.
    pub async fn respond(&self, request: &SummarizeRequest) -> ApiResponse {
        let mode = request.mode();
        let length = request.length();
        match mode {
            Mode::Compare => {
                ApiResponse::comparison(self.compare(&request.text, length, request.num_sentences).await)
            }
            _ => ApiResponse::single(
                mode,
                self.summarize(&request.text, mode, length, request.num_sentences)
                    .await,
            ),
        }
    }
}
