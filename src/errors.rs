use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Linguistic resource unavailable: {0}")]
    ResourceError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to access inference API: {0}")]
    InferenceError(String),

    #[error("Failed to read document: {0}")]
    DocumentError(String),
}

impl From<reqwest::Error> for SummarizerError {
    fn from(error: reqwest::Error) -> Self {
        SummarizerError::HttpError(error.to_string())
    }
}

impl From<anyhow::Error> for SummarizerError {
    fn from(error: anyhow::Error) -> Self {
        SummarizerError::InferenceError(error.to_string())
    }
}

impl From<std::io::Error> for SummarizerError {
    fn from(error: std::io::Error) -> Self {
        SummarizerError::DocumentError(error.to_string())
    }
}

/// Why a linguistic resource could not be acquired.
///
/// These never surface to callers of the extractive pipeline; they are
/// logged and the pipeline takes its fallback path instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("resource {0} not found and no fetch URL is configured")]
    NotFound(String),

    #[error("fetching {name} failed: {reason}")]
    Fetch { name: String, reason: String },

    #[error("resource {0} is empty or malformed")]
    Malformed(String),

    #[error("i/o error on {name}: {reason}")]
    Io { name: String, reason: String },
}

impl From<ResourceError> for SummarizerError {
    fn from(error: ResourceError) -> Self {
        SummarizerError::ResourceError(error.to_string())
    }
}
