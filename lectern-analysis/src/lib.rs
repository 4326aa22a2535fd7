//! Accuracy and pace analysis for read-aloud practice
//!
//! Compares a speech-to-text transcript against the passage the reader was
//! supposed to read, and measures how fast they read it. Everything in this
//! crate is pure computation over strings and numbers; capture, transcription,
//! and scoring live in their own crates.
//!
//! ## Features
//!
//! - Case- and punctuation-insensitive tokenization applied to both sides
//! - Word-level diff with deterministic first-occurrence ordering
//! - Character-level Levenshtein similarity for mispronunciation pairing
//! - WPM calculation with banded evaluation against the 150-160 read-aloud target
//!
//! ## Quick Start
//!
//! ```
//! use lectern_analysis::{calculate_wpm, compare_texts};
//!
//! let result = compare_texts("The quick brown fox!", "the quick brown fox");
//! assert_eq!(result.overall_accuracy, 1.0);
//! assert!(result.missed_words.is_empty());
//!
//! let wpm = calculate_wpm(150, 60.0);
//! assert_eq!(wpm, 150.0);
//! ```

pub mod compare;
pub mod distance;
pub mod tokenize;
pub mod wpm;

pub use compare::{compare_texts, identify_mispronunciations, AccuracyResult, Mispronunciation};
pub use distance::{levenshtein, similarity};
pub use tokenize::{normalize, tokenize};
pub use wpm::{calculate_wpm, wpm_score, WpmPerformance};
