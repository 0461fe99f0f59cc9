//! lexsum - Summaries of legal documents.
//!
//! Two strategies are offered behind one entry point:
//! 1. Extractive: sentences are scored with TF-IDF (each sentence is one
//!    document of the corpus) and the highest-scoring ones are returned,
//!    highest first.
//! 2. Abstractive: the text is sent to a pretrained sequence-to-sequence
//!    model behind an HTTP inference endpoint.
//!
//! The extractive pipeline degrades instead of failing: missing linguistic
//! resources switch segmentation to a rule-based splitter and lemmatization
//! to a passthrough, and a collapsed vocabulary yields uniform scores. It is
//! also the fallback whenever the neural model is unavailable.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use lexsum::resources::{LinguisticResources, ResourceConfig};
//! use lexsum::Summarizer;
//!
//! let resources = Arc::new(LinguisticResources::new(ResourceConfig::local("data")));
//! let summarizer = Summarizer::new(resources, None);
//!
//! let summary = summarizer.summarize_extractive(
//!     "The Licensee shall pay all fees. Payment is due within thirty days. \
//!      Late payments accrue interest at two percent per month.",
//!     2,
//! );
//! println!("{summary}");
//! ```

pub mod ai;
pub mod core;
pub mod document;
pub mod errors;
pub mod resources;
pub mod summarizer;

pub use errors::SummarizerError;
pub use summarizer::{Summarizer, normalize, stopword_list};

/// Configure structured JSON logging.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Safe to call more
/// than once; later calls are no-ops.
///
/// # Example
///
/// ```
/// lexsum::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
