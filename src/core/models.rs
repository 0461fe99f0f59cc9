use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::summarizer::DEFAULT_NUM_SENTENCES;

/// How a summary should be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Extractive,
    Abstractive,
    Compare,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Extractive => "extractive",
            Mode::Abstractive => "abstractive",
            Mode::Compare => "compare",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Anything unrecognised is treated as extractive.
impl FromStr for Mode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "abstractive" => Mode::Abstractive,
            "compare" => Mode::Compare,
            _ => Mode::Extractive,
        })
    }
}

/// Target length of an abstractive summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

/// Minimum and maximum output length handed to the neural model, in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min_length: u32,
    pub max_length: u32,
}

impl SummaryLength {
    #[must_use]
    pub fn bounds(self) -> LengthBounds {
        let (min_length, max_length) = match self {
            SummaryLength::Short => (30, 60),
            SummaryLength::Medium => (60, 150),
            SummaryLength::Long => (150, 300),
        };
        LengthBounds {
            min_length,
            max_length,
        }
    }
}

impl FromStr for SummaryLength {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "short" => SummaryLength::Short,
            "long" => SummaryLength::Long,
            _ => SummaryLength::Medium,
        })
    }
}

fn default_mode() -> String {
    "extractive".to_string()
}

fn default_length() -> String {
    "medium".to_string()
}

fn default_num_sentences() -> i64 {
    DEFAULT_NUM_SENTENCES
}

/// Incoming summarization request, as posted by the service layer.
///
/// `mode` and `length` stay as raw strings so that unknown values degrade
/// to the defaults instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_length")]
    pub length: String,
    #[serde(default = "default_num_sentences")]
    pub num_sentences: i64,
}

impl SummarizeRequest {
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode.parse().unwrap_or(Mode::Extractive)
    }

    #[must_use]
    pub fn length(&self) -> SummaryLength {
        self.length.parse().unwrap_or_default()
    }
}

/// Both summaries side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub extractive: String,
    pub abstractive: String,
}

/// Response envelope: `{"ok": true, "data": {"<mode>": "<summary>"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    pub data: BTreeMap<String, String>,
}

impl ApiResponse {
    /// The key is the canonical name of the mode that ran, not the raw
    /// request string, so `"mode": "bogus"` answers under `"extractive"`.
    #[must_use]
    pub fn single(mode: Mode, summary: String) -> Self {
        let mut data = BTreeMap::new();
        data.insert(mode.to_string(), summary);
        Self { ok: true, data }
    }

    #[must_use]
    pub fn comparison(comparison: Comparison) -> Self {
        let mut data = BTreeMap::new();
        data.insert(Mode::Extractive.to_string(), comparison.extractive);
        data.insert(Mode::Abstractive.to_string(), comparison.abstractive);
        Self { ok: true, data }
    }
}
