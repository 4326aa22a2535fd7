//! Input text validation for the reading session gate.

use serde::{Deserialize, Serialize};

pub const MIN_TEXT_LENGTH: usize = 10;
pub const MAX_TEXT_LENGTH: usize = 10_000;
pub const MAX_WORD_COUNT: usize = 2_000;

/// Outcome of validating a candidate reading text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub word_count: usize,
    pub character_count: usize,
}

impl ValidationOutcome {
    fn invalid(message: String, word_count: usize, character_count: usize) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message),
            word_count,
            character_count,
        }
    }
}

/// Validate a reading text against the length and word-count bounds.
///
/// All checks run on the trimmed text, and the returned counts refer to
/// the trimmed text as well. Checks are ordered: empty, minimum length,
/// maximum length, maximum word count.
pub fn validate_text(text: &str) -> ValidationOutcome {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return ValidationOutcome::invalid("Please enter some text to read".to_string(), 0, 0);
    }

    let character_count = trimmed.chars().count();
    let word_count = count_words(trimmed);

    if character_count < MIN_TEXT_LENGTH {
        return ValidationOutcome::invalid(
            format!("Text is too short. Please enter at least {MIN_TEXT_LENGTH} characters"),
            word_count,
            character_count,
        );
    }

    if character_count > MAX_TEXT_LENGTH {
        return ValidationOutcome::invalid(
            format!("Text is too long. Please keep it under {MAX_TEXT_LENGTH} characters"),
            word_count,
            character_count,
        );
    }

    if word_count > MAX_WORD_COUNT {
        return ValidationOutcome::invalid(
            format!("Text has too many words. Please keep it under {MAX_WORD_COUNT} words"),
            word_count,
            character_count,
        );
    }

    ValidationOutcome {
        is_valid: true,
        error_message: None,
        word_count,
        character_count,
    }
}

/// Number of whitespace-separated words in `text`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
