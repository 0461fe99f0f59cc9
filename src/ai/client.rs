//! Hosted inference client for the abstractive summarizer
//!
//! Posts text to a sequence-to-sequence summarization model behind an HTTP
//! inference endpoint and returns the generated `summary_text`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};

use super::AbstractiveSummarizer;
use crate::core::config::AppConfig;
use crate::core::models::LengthBounds;
use crate::errors::SummarizerError;

/// Encoder context of the default model; longer input is cut at a word boundary.
const MAX_INPUT_TOKENS: usize = 1024;
const TOKEN_BUFFER: usize = 24;

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// Trim `text` so its estimated token count fits `max_tokens`.
#[must_use]
pub fn truncate_to_tokens(text: &str, max_tokens: usize) -> &str {
    if estimate_tokens(text) <= max_tokens {
        return text;
    }
    let max_chars = max_tokens.saturating_sub(1) * 4;
    let cut = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(i, _)| i);
    let head = &text[..cut];
    head.rfind(char::is_whitespace)
        .map_or(head, |i| &head[..i])
        .trim_end()
}

/// A failed inference call, tagged with whether repeating it can help.
#[derive(Debug)]
enum Attempt {
    Retry(SummarizerError),
    Fail(SummarizerError),
}

impl Attempt {
    fn is_retryable(&self) -> bool {
        matches!(self, Attempt::Retry(_))
    }

    fn into_inner(self) -> SummarizerError {
        match self {
            Attempt::Retry(e) | Attempt::Fail(e) => e,
        }
    }
}

// Overload, rate limiting and a cold model (503) are transient; other
// client errors such as a rejected token are not.
fn status_attempt(status: StatusCode, body: &str) -> Attempt {
    let error = SummarizerError::InferenceError(format!("status {status}: {body}"));
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        Attempt::Retry(error)
    } else {
        Attempt::Fail(error)
    }
}

fn is_model_loading(error: &SummarizerError) -> bool {
    matches!(error, SummarizerError::InferenceError(msg) if msg.contains("currently loading"))
}

pub struct InferenceClient {
    http: Client,
    endpoint: String,
    token: Option<String>,
}

impl InferenceClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        model: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizerError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            SummarizerError::HttpError(format!("Failed to build inference HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), model),
            token,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummarizerError> {
        Self::new(
            &config.inference_url,
            &config.inference_model,
            config.inference_token.clone(),
            config.inference_timeout,
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, SummarizerError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, Attempt>> + Send,
        T: Send,
    {
        // Roughly 0.5s then 5s, capped, while a cold model loads.
        let strategy = ExponentialBackoff::from_millis(10)
            .factor(50)
            .max_delay(Duration::from_secs(5))
            .map(jitter)
            .take(3);

        RetryIf::spawn(strategy, operation, Attempt::is_retryable)
            .await
            .map_err(Attempt::into_inner)
    }

    async fn request_summary(&self, body: &Value) -> Result<String, Attempt> {
        let mut request = self.http.post(&self.endpoint).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            let transient = e.is_timeout() || e.is_connect();
            let error = SummarizerError::HttpError(format!("Inference API request failed: {e}"));
            if transient {
                Attempt::Retry(error)
            } else {
                Attempt::Fail(error)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Inference API returned {}: {}", status, error_text);
            return Err(status_attempt(status, &error_text));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            Attempt::Fail(SummarizerError::InferenceError(format!(
                "Failed to parse inference response: {e}"
            )))
        })?;

        parse_summary_response(&response_json).map_err(|e| {
            if is_model_loading(&e) {
                Attempt::Retry(e)
            } else {
                Attempt::Fail(e)
            }
        })
    }
}

#[async_trait]
impl AbstractiveSummarizer for InferenceClient {
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, SummarizerError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let input = truncate_to_tokens(text, MAX_INPUT_TOKENS - TOKEN_BUFFER);

        #[cfg(feature = "debug-logs")]
        info!("Abstractive model input:\n{}", input);

        info!(
            "Requesting abstractive summary: ~{} input tokens, length {}..{}",
            estimate_tokens(input),
            bounds.min_length,
            bounds.max_length
        );

        let body = json!({
            "inputs": input,
            "parameters": {
                "min_length": bounds.min_length,
                "max_length": bounds.max_length,
                "do_sample": false
            }
        });

        self.with_retry(|| self.request_summary(&body)).await
    }
}

/// Extract `summary_text` from `[{"summary_text": ...}]`, or surface the
/// endpoint's `{"error": ...}` message.
///
/// # Errors
///
/// Returns `InferenceError` for error payloads and unexpected shapes.
pub fn parse_summary_response(response: &Value) -> Result<String, SummarizerError> {
    if let Some(error) = response.get("error").and_then(Value::as_str) {
        return Err(SummarizerError::InferenceError(error.to_string()));
    }

    response
        .as_array()
        .and_then(|items| items.first())
        .or_else(|| response.is_object().then_some(response))
        .and_then(|item| item.get("summary_text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SummarizerError::InferenceError("No summary_text in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_response() {
        let v = json!([{"summary_text": "The tenant must pay rent."}]);
        assert_eq!(parse_summary_response(&v).unwrap(), "The tenant must pay rent.");
    }

    #[test]
    fn test_parse_object_response() {
        let v = json!({"summary_text": "Short."});
        assert_eq!(parse_summary_response(&v).unwrap(), "Short.");
    }

    #[test]
    fn test_parse_error_response() {
        let v = json!({"error": "Model facebook/bart-large-cnn is currently loading"});
        match parse_summary_response(&v) {
            Err(SummarizerError::InferenceError(msg)) => assert!(msg.contains("loading")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_unexpected_shape() {
        assert!(parse_summary_response(&json!([])).is_err());
        assert!(parse_summary_response(&json!("text")).is_err());
    }

    #[test]
    fn test_only_transient_statuses_are_retried() {
        assert!(status_attempt(StatusCode::SERVICE_UNAVAILABLE, "loading").is_retryable());
        assert!(status_attempt(StatusCode::BAD_GATEWAY, "").is_retryable());
        assert!(status_attempt(StatusCode::TOO_MANY_REQUESTS, "slow down").is_retryable());
        assert!(!status_attempt(StatusCode::UNAUTHORIZED, "bad token").is_retryable());
        assert!(!status_attempt(StatusCode::NOT_FOUND, "no such model").is_retryable());

        match status_attempt(StatusCode::UNAUTHORIZED, "bad token").into_inner() {
            SummarizerError::InferenceError(msg) => assert!(msg.contains("401")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_loading_payload_is_transient() {
        let loading = parse_summary_response(&json!({"error": "Model x is currently loading"}))
            .unwrap_err();
        assert!(is_model_loading(&loading));
        let invalid = parse_summary_response(&json!({"error": "Invalid input"})).unwrap_err();
        assert!(!is_model_loading(&invalid));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_gives_http_error() {
        let client = InferenceClient::new(
            "http://127.0.0.1:9/models",
            "facebook/bart-large-cnn",
            None,
            Duration::from_millis(500),
        )
        .unwrap();
        let result = client
            .summarize(
                "The tenant shall pay rent monthly.",
                LengthBounds {
                    min_length: 30,
                    max_length: 60,
                },
            )
            .await;
        assert!(matches!(result, Err(SummarizerError::HttpError(_))));
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_to_tokens("a short clause", 100), "a short clause");
    }

    #[test]
    fn test_truncate_cuts_at_word_boundary() {
        let text = "word ".repeat(100);
        let cut = truncate_to_tokens(&text, 10);
        assert!(estimate_tokens(cut) <= 10);
        assert!(cut.ends_with("word"));
        assert!(!cut.ends_with(' '));
    }

    #[test]
    fn test_endpoint_joins_model() {
        let client = InferenceClient::new(
            "https://inference.example.com/models/",
            "facebook/bart-large-cnn",
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://inference.example.com/models/facebook/bart-large-cnn"
        );
    }
}
