//! Data models for reading sessions
//!
//! Everything here serializes with camelCase field names so archives
//! written by earlier builds of the app parse unchanged.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Measurements taken from one read-aloud recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingMetrics {
    // Quality
    pub accuracy: f64,
    pub completion_rate: f64,
    pub confidence_score: f64,

    // Pace
    pub wpm: f64,
    pub duration: f64,
    pub word_count: usize,

    // Word-level detail
    pub added_words: Vec<String>,
    pub missed_words: Vec<String>,
}

impl Default for ReadingMetrics {
    fn default() -> Self {
        Self {
            accuracy: 0.0,
            completion_rate: 0.0,
            confidence_score: 0.0,
            wpm: 0.0,
            duration: 0.0,
            word_count: 0,
            added_words: Vec::new(),
            missed_words: Vec::new(),
        }
    }
}

/// Game score derived from a session's metrics
///
/// All sub-scores are on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScore {
    pub overall_score: i32,
    pub accuracy_score: i32,
    pub speed_score: i32,
    pub completion_score: i32,
    pub achievements: Vec<Achievement>,
}

impl Default for GameScore {
    fn default() -> Self {
        Self {
            overall_score: 0,
            accuracy_score: 0,
            speed_score: 0,
            completion_score: 0,
            achievements: Vec::new(),
        }
    }
}

/// A single unlocked achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub icon_name: String,
    pub unlocked_at: DateTime<Utc>,
}

impl Achievement {
    /// New achievement stamped with a fresh id and the current time.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        icon_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            icon_name: icon_name.into(),
            unlocked_at: Utc::now(),
        }
    }
}

/// One completed reading session, ready for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSession {
    pub id: Uuid,
    pub original_text: String,
    pub transcribed_text: String,
    /// Recording artifact on disk, if it was kept.
    pub recording_path: Option<PathBuf>,
    pub metrics: ReadingMetrics,
    pub score: GameScore,
    pub timestamp: DateTime<Utc>,
}

impl ReadingSession {
    /// New session stamped with a fresh id and the current time.
    pub fn new(
        original_text: impl Into<String>,
        transcribed_text: impl Into<String>,
        recording_path: Option<PathBuf>,
        metrics: ReadingMetrics,
        score: GameScore,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_text: original_text.into(),
            transcribed_text: transcribed_text.into(),
            recording_path,
            metrics,
            score,
            timestamp: Utc::now(),
        }
    }
}
