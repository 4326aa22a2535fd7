//! Text normalization shared by both sides of the comparison.
//!
//! Spoken-text scoring must not punish letter case or punctuation, so the
//! reference passage and the transcript go through the same filter before
//! any diff: lowercase, strip everything that is not an ASCII letter,
//! digit, or whitespace, split on whitespace.

/// Normalize `text` and split it into comparison tokens.
///
/// Empty tokens are discarded, so whitespace-only input yields an empty
/// list. Idempotent: re-tokenizing the joined output returns the same
/// tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Trimmed, lowercased, punctuation-stripped form of `text`.
///
/// Characters outside ASCII alphanumerics are dropped after lowercasing;
/// whitespace survives as-is so word boundaries are preserved.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}
