use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::SummarizerError;

pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_INFERENCE_MODEL: &str = "facebook/bart-large-cnn";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub resource_url: Option<String>,
    pub fetch_timeout: Duration,
    pub inference_url: String,
    pub inference_model: String,
    pub inference_token: Option<String>,
    pub inference_timeout: Duration,
    pub abstractive_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            resource_url: None,
            fetch_timeout: Duration::from_secs(10),
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            inference_model: DEFAULT_INFERENCE_MODEL.to_string(),
            inference_token: None,
            inference_timeout: Duration::from_secs(120),
            abstractive_enabled: true,
        }
    }
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric or boolean variable cannot be parsed.
    pub fn from_env() -> Result<Self, SummarizerError> {
        let defaults = Self::default();

        Ok(Self {
            data_dir: env::var("LEXSUM_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            resource_url: non_empty_var("LEXSUM_RESOURCE_URL"),
            fetch_timeout: parsed_var::<u64>("LEXSUM_FETCH_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
            inference_url: non_empty_var("LEXSUM_INFERENCE_URL")
                .unwrap_or(defaults.inference_url),
            inference_model: non_empty_var("LEXSUM_INFERENCE_MODEL")
                .unwrap_or(defaults.inference_model),
            inference_token: non_empty_var("LEXSUM_INFERENCE_TOKEN"),
            inference_timeout: parsed_var::<u64>("LEXSUM_INFERENCE_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.inference_timeout),
            abstractive_enabled: parsed_var::<bool>("LEXSUM_ABSTRACTIVE")?
                .unwrap_or(defaults.abstractive_enabled),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T>(name: &str) -> Result<Option<T>, SummarizerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| SummarizerError::ConfigError(format!("{name}: {e}"))),
        None => Ok(None),
    }
}
