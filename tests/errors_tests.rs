use std::error::Error;
use lexsum::errors::{ResourceError, SummarizerError};

#[test]
fn test_summarizer_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    assert_error(&SummarizerError::ConfigError("bad value".to_string()));
    assert_error(&ResourceError::NotFound("en/lemmas.txt".to_string()));
}

#[test]
fn test_summarizer_error_display() {
    let error = SummarizerError::InferenceError("Model unavailable".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access inference API: Model unavailable"
    );

    let error = SummarizerError::HttpError("Connection error".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: Connection error"
    );

    let error = SummarizerError::DocumentError("Unsupported file type".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to read document: Unsupported file type"
    );
}

#[test]
fn test_resource_error_display() {
    let error = ResourceError::Fetch {
        name: "en/abbreviations.txt".to_string(),
        reason: "timed out".to_string(),
    };
    assert_eq!(
        format!("{error}"),
        "fetching en/abbreviations.txt failed: timed out"
    );
}

#[test]
fn test_summarizer_error_from_conversions() {
    let err = anyhow::anyhow!("model loading");
    match SummarizerError::from(err) {
        SummarizerError::InferenceError(msg) => assert!(msg.contains("model loading")),
        other => panic!("Unexpected error type: {other:?}"),
    }

    let err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated upload");
    match SummarizerError::from(err) {
        SummarizerError::DocumentError(msg) => assert!(msg.contains("truncated upload")),
        other => panic!("Unexpected error type: {other:?}"),
    }

    match SummarizerError::from(ResourceError::Malformed("en/lemmas.txt".to_string())) {
        SummarizerError::ResourceError(msg) => assert!(msg.contains("en/lemmas.txt")),
        other => panic!("Unexpected error type: {other:?}"),
    }

    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> SummarizerError {
        SummarizerError::from(err)
    }
}
