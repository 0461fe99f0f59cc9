use once_cell::sync::Lazy;
use regex::Regex;

static POSSESSIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'s").expect("possessive regex compiles"));

// Sentence-terminal punctuation survives so segmentation still works.
static NOISE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{M}\p{N}\s.!?]").expect("noise regex compiles"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex compiles"));

/// Strip noise characters and collapse whitespace.
///
/// Removes possessive `'s`, drops every character that is not alphanumeric,
/// whitespace or one of `. ! ?`, turns newline and whitespace runs into a
/// single space and trims. Whitespace is collapsed last, so
/// `normalize(normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(text: &str) -> String {
    let text = POSSESSIVE_RE.replace_all(text, "");
    let text = NOISE_RE.replace_all(&text, "");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}
