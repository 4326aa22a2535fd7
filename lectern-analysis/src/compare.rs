//! Word-level comparison between a reference passage and a transcript.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::similarity;
use crate::tokenize::tokenize;

/// Minimum similarity for a missed/added pair to count as a
/// mispronunciation rather than an unrelated substitution.
const MISPRONUNCIATION_THRESHOLD: f64 = 0.6;

/// Outcome of comparing a transcript against the passage it should match.
///
/// All rates are in `[0.0, 1.0]`. Word lists are deduplicated and keep
/// first-occurrence order, so results are stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyResult {
    /// Combined error rate over both texts.
    pub overall_accuracy: f64,
    /// Fraction of reference words that were actually spoken.
    pub word_level_accuracy: f64,
    /// How much of the passage was covered, capped at `1.0`.
    pub completion_rate: f64,
    /// Spoken words absent from the reference.
    pub added_words: Vec<String>,
    /// Reference words never spoken.
    pub missed_words: Vec<String>,
    pub total_words: usize,
    pub spoken_words: usize,
}

/// A missed reference word paired with the spoken word it most resembles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mispronunciation {
    pub original_word: String,
    pub spoken_word: String,
    pub similarity: f64,
    /// Index into the missed-word list, not the source text.
    pub position: usize,
}

/// Compare `spoken` (the transcript) against `original` (the passage).
///
/// Both sides are tokenized with the same normalization, so case and
/// punctuation never count against the reader. Empty or whitespace-only
/// input on either side is well-defined: every rate that would divide by
/// zero is reported as `0.0`.
pub fn compare_texts(original: &str, spoken: &str) -> AccuracyResult {
    let original_tokens = tokenize(original);
    let spoken_tokens = tokenize(spoken);

    let total_words = original_tokens.len();
    let spoken_words = spoken_tokens.len();

    let completion_rate = if total_words == 0 {
        0.0
    } else {
        (spoken_words as f64 / total_words as f64).min(1.0)
    };

    let missed_words = ordered_difference(&original_tokens, &spoken_tokens);
    let added_words = ordered_difference(&spoken_tokens, &original_tokens);

    let word_level_accuracy = if total_words == 0 {
        0.0
    } else {
        (total_words - missed_words.len()) as f64 / total_words as f64
    };

    let denominator = total_words.max(spoken_words);
    let overall_accuracy = if denominator == 0 {
        0.0
    } else {
        (1.0 - (missed_words.len() + added_words.len()) as f64 / denominator as f64).max(0.0)
    };

    debug!(
        total_words,
        spoken_words,
        missed = missed_words.len(),
        added = added_words.len(),
        "compared transcript against passage"
    );

    AccuracyResult {
        overall_accuracy,
        word_level_accuracy,
        completion_rate,
        added_words,
        missed_words,
        total_words,
        spoken_words,
    }
}

/// Pair missed words with the added word they most resemble.
///
/// For each missed word the closest added word above the similarity
/// threshold wins; on a tie the earliest candidate is kept. A single added
/// word may pair with several missed words.
pub fn identify_mispronunciations(result: &AccuracyResult) -> Vec<Mispronunciation> {
    let mut found = Vec::new();

    for (position, missed) in result.missed_words.iter().enumerate() {
        let mut best: Option<(&String, f64)> = None;

        for added in &result.added_words {
            let score = similarity(missed, added);
            if score > MISPRONUNCIATION_THRESHOLD && best.map_or(true, |(_, s)| score > s) {
                best = Some((added, score));
            }
        }

        if let Some((spoken, score)) = best {
            found.push(Mispronunciation {
                original_word: missed.clone(),
                spoken_word: spoken.clone(),
                similarity: score,
                position,
            });
        }
    }

    found
}

/// Unique members of `a` absent from `b`, in first-occurrence order.
fn ordered_difference(a: &[String], b: &[String]) -> Vec<String> {
    let b_set: HashSet<&str> = b.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();

    for word in a {
        if !b_set.contains(word.as_str()) && seen.insert(word.as_str()) {
            out.push(word.clone());
        }
    }

    out
}
