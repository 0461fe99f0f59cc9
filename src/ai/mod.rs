//! Abstractive (neural) summarization collaborator

pub mod client;

use async_trait::async_trait;

use crate::core::models::LengthBounds;
use crate::errors::SummarizerError;

pub use client::{InferenceClient, estimate_tokens};

/// A pretrained sequence-to-sequence summarizer: given text and output
/// length bounds, return a shorter paraphrase.
#[async_trait]
pub trait AbstractiveSummarizer: Send + Sync {
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, SummarizerError>;
}
