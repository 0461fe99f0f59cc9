//! Linguistic resources used by the extractive pipeline
//!
//! Resources live as plain-text files under a data directory. The first
//! access loads a resource from disk; if it is missing and a resource URL is
//! configured, it is fetched once (bounded by a timeout), persisted, then
//! parsed. The outcome, success or failure, is cached for the lifetime of
//! the `LinguisticResources` value, so callers pick their fallback path
//! without retrying on every request.

use once_cell::sync::OnceCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::core::config::AppConfig;
use crate::errors::{ResourceError, SummarizerError};
use crate::summarizer::lemmatizer::Lexicon;
use crate::summarizer::segmenter::AbbreviationModel;

pub const ABBREVIATIONS_PATH: &str = "en/abbreviations.txt";
pub const LEMMAS_PATH: &str = "en/lemmas.txt";

#[derive(Debug, Clone)]
pub struct ResourceConfig {
    pub data_dir: PathBuf,
    pub base_url: Option<String>,
    pub fetch_timeout: Duration,
}

impl ResourceConfig {
    /// Local-only configuration: nothing is ever fetched.
    #[must_use]
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            base_url: None,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&AppConfig> for ResourceConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            base_url: config.resource_url.clone(),
            fetch_timeout: config.fetch_timeout,
        }
    }
}

/// Availability of each resource after acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceStatus {
    pub abbreviations: Result<usize, ResourceError>,
    pub lexicon: Result<usize, ResourceError>,
}

impl ResourceStatus {
    /// `Ok` when every resource loaded, otherwise the first failure.
    ///
    /// # Errors
    ///
    /// Returns `SummarizerError::ResourceError` naming the missing resource.
    pub fn check(&self) -> Result<(), SummarizerError> {
        self.abbreviations.as_ref().map_err(Clone::clone)?;
        self.lexicon.as_ref().map_err(Clone::clone)?;
        Ok(())
    }
}

/// Shared, lazily initialised handles to linguistic data.
///
/// Construct once and share by `Arc`. Concurrent first use blocks on the
/// same cell, so each resource is acquired at most once per instance.
#[derive(Debug)]
pub struct LinguisticResources {
    config: ResourceConfig,
    abbreviations: OnceCell<Result<AbbreviationModel, ResourceError>>,
    lexicon: OnceCell<Result<Lexicon, ResourceError>>,
}

impl LinguisticResources {
    #[must_use]
    pub fn new(config: ResourceConfig) -> Self {
        Self {
            config,
            abbreviations: OnceCell::new(),
            lexicon: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Sentence-boundary model, or the reason it is unavailable.
    pub fn abbreviations(&self) -> Result<&AbbreviationModel, &ResourceError> {
        self.abbreviations
            .get_or_init(|| {
                let result = self
                    .acquire(ABBREVIATIONS_PATH)
                    .and_then(|raw| AbbreviationModel::parse(&raw, ABBREVIATIONS_PATH));
                log_outcome(ABBREVIATIONS_PATH, result.as_ref().map(AbbreviationModel::len));
                result
            })
            .as_ref()
    }

    /// Lemma dictionary, or the reason it is unavailable.
    pub fn lexicon(&self) -> Result<&Lexicon, &ResourceError> {
        self.lexicon
            .get_or_init(|| {
                let result = self
                    .acquire(LEMMAS_PATH)
                    .and_then(|raw| Lexicon::parse(&raw, LEMMAS_PATH));
                log_outcome(LEMMAS_PATH, result.as_ref().map(Lexicon::len));
                result
            })
            .as_ref()
    }

    /// Acquire every resource up front, e.g. at process start.
    pub fn warm_up(&self) -> ResourceStatus {
        ResourceStatus {
            abbreviations: self
                .abbreviations()
                .map(AbbreviationModel::len)
                .map_err(Clone::clone),
            lexicon: self.lexicon().map(Lexicon::len).map_err(Clone::clone),
        }
    }

    fn acquire(&self, relative: &str) -> Result<String, ResourceError> {
        let path = self.config.data_dir.join(relative);
        match fs::read_to_string(&path) {
            Ok(raw) => return Ok(raw),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Resource {} not found at {}", relative, path.display());
            }
            Err(e) => {
                return Err(ResourceError::Io {
                    name: relative.to_string(),
                    reason: e.to_string(),
                });
            }
        }

        let Some(base_url) = self.config.base_url.as_deref() else {
            return Err(ResourceError::NotFound(relative.to_string()));
        };

        let raw = fetch(base_url, relative, self.config.fetch_timeout)?;
        if let Err(e) = persist(&path, &raw) {
            // The fetched copy is still usable for this process.
            warn!("Could not persist {} to {}: {}", relative, path.display(), e);
        }
        Ok(raw)
    }
}

fn log_outcome(name: &str, outcome: Result<usize, &ResourceError>) {
    match outcome {
        Ok(entries) => info!("Loaded linguistic resource {} ({} entries)", name, entries),
        Err(e) => warn!("Linguistic resource {} unavailable, using fallback: {}", name, e),
    }
}

fn resource_url(base_url: &str, relative: &str) -> Result<Url, ResourceError> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base)
        .and_then(|u| u.join(relative))
        .map_err(|e| ResourceError::Fetch {
            name: relative.to_string(),
            reason: format!("invalid resource URL {base_url}: {e}"),
        })
}

fn fetch(base_url: &str, relative: &str, timeout: Duration) -> Result<String, ResourceError> {
    let url = resource_url(base_url, relative)?;
    info!("Fetching linguistic resource {} from {}", relative, url);

    // The blocking client runs its own runtime, which must not be created or
    // dropped on a thread that is driving async tasks.
    if tokio::runtime::Handle::try_current().is_ok() {
        return thread::scope(|scope| {
            scope
                .spawn(move || fetch_blocking(url, relative, timeout))
                .join()
                .unwrap_or_else(|_| Err(fetch_error(relative, "fetch thread panicked")))
        });
    }
    fetch_blocking(url, relative, timeout)
}

fn fetch_blocking(url: Url, relative: &str, timeout: Duration) -> Result<String, ResourceError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| fetch_error(relative, e))?;

    client
        .get(url)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .and_then(reqwest::blocking::Response::text)
        .map_err(|e| fetch_error(relative, e))
}

fn fetch_error(relative: &str, reason: impl std::fmt::Display) -> ResourceError {
    ResourceError::Fetch {
        name: relative.to_string(),
        reason: reason.to_string(),
    }
}

// Written under a unique name and renamed, so concurrent fetchers never
// observe a partial file.
fn persist(path: &Path, raw: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staging = path.with_file_name(format!(".{file_name}.{}.part", uuid::Uuid::new_v4()));
    fs::write(&staging, raw)?;
    fs::rename(&staging, path).inspect_err(|_| {
        let _ = fs::remove_file(&staging);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, relative: &str, contents: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_loads_resources_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ABBREVIATIONS_PATH, "# comment\ninc\ncorp\n");
        write(dir.path(), LEMMAS_PATH, "court\ncourts court\n");

        let resources = LinguisticResources::new(ResourceConfig::local(dir.path()));
        let status = resources.warm_up();

        assert_eq!(status.abbreviations, Ok(2));
        assert!(status.lexicon.is_ok());
    }

    #[test]
    fn test_status_check_reports_first_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ABBREVIATIONS_PATH, "inc\n");

        let status = LinguisticResources::new(ResourceConfig::local(dir.path())).warm_up();
        match status.check() {
            Err(SummarizerError::ResourceError(msg)) => assert!(msg.contains(LEMMAS_PATH), "{msg}"),
            other => panic!("unexpected result: {other:?}"),
        }

        write(dir.path(), LEMMAS_PATH, "court\n");
        let status = LinguisticResources::new(ResourceConfig::local(dir.path())).warm_up();
        assert!(status.check().is_ok());
    }

    #[test]
    fn test_missing_resources_without_url_report_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let resources = LinguisticResources::new(ResourceConfig::local(dir.path()));

        assert_eq!(
            resources.abbreviations().unwrap_err(),
            &ResourceError::NotFound(ABBREVIATIONS_PATH.to_string())
        );
        assert!(resources.lexicon().is_err());
    }

    #[test]
    fn test_empty_resource_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ABBREVIATIONS_PATH, "# nothing here\n\n");

        let resources = LinguisticResources::new(ResourceConfig::local(dir.path()));
        assert_eq!(
            resources.abbreviations().unwrap_err(),
            &ResourceError::Malformed(ABBREVIATIONS_PATH.to_string())
        );
    }

    #[test]
    fn test_unreachable_fetch_falls_back_without_hanging() {
        let dir = tempfile::tempdir().unwrap();
        let resources = LinguisticResources::new(ResourceConfig {
            data_dir: dir.path().to_path_buf(),
            base_url: Some("http://127.0.0.1:9/".to_string()),
            fetch_timeout: Duration::from_millis(500),
        });

        assert!(matches!(
            resources.lexicon(),
            Err(ResourceError::Fetch { .. })
        ));
        // Cached: a second access does not fetch again and reports the same error.
        assert!(matches!(
            resources.lexicon(),
            Err(ResourceError::Fetch { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_inside_runtime_falls_back_instead_of_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let resources = LinguisticResources::new(ResourceConfig {
            data_dir: dir.path().to_path_buf(),
            base_url: Some("http://127.0.0.1:9/".to_string()),
            fetch_timeout: Duration::from_millis(500),
        });

        let status = resources.warm_up();
        assert!(matches!(status.abbreviations, Err(ResourceError::Fetch { .. })));
        assert!(matches!(status.lexicon, Err(ResourceError::Fetch { .. })));
    }

    #[test]
    fn test_invalid_base_url_is_a_fetch_error() {
        let err = resource_url("not a url", LEMMAS_PATH).unwrap_err();
        assert!(matches!(err, ResourceError::Fetch { .. }));
    }

    #[test]
    fn test_resource_url_joins_relative_path() {
        let url = resource_url("https://example.com/nlp", LEMMAS_PATH).unwrap();
        assert_eq!(url.as_str(), "https://example.com/nlp/en/lemmas.txt");
    }

    #[test]
    fn test_persist_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en/nested/lemmas.txt");
        persist(&path, "court\n").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "court\n");
    }
}
