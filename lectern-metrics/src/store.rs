//! Session history persistence
//!
//! The history lives in a single JSON blob, read-modify-written on every
//! change and capped at [`MAX_SESSION_HISTORY`] entries. That suits the
//! small bounded history far better than a database engine would.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::models::ReadingSession;

/// Most sessions kept on disk; older entries fall off the end.
pub const MAX_SESSION_HISTORY: usize = 100;

const SESSIONS_FILE: &str = "sessions.json";

/// Storage interface for the session history.
///
/// `save`, `load_all`, and `delete` are the primitives; the statistics
/// queries are provided methods over `load_all` and report zero values
/// when the history is empty or unreadable.
pub trait SessionStore {
    /// Persist a session, replacing any earlier entry with the same id.
    fn save(&self, session: &ReadingSession) -> Result<()>;

    /// All stored sessions, newest first.
    fn load_all(&self) -> Result<Vec<ReadingSession>>;

    /// Remove the session with the given id. Removing an unknown id is not
    /// an error.
    fn delete(&self, id: Uuid) -> Result<()>;

    fn session_count(&self) -> usize {
        self.load_all().map(|s| s.len()).unwrap_or(0)
    }

    fn average_score(&self) -> f64 {
        let sessions = match self.load_all() {
            Ok(sessions) if !sessions.is_empty() => sessions,
            _ => return 0.0,
        };
        let scores: Vec<f64> = sessions
            .iter()
            .map(|s| s.score.overall_score as f64)
            .collect();
        statistical::mean(&scores)
    }

    fn best_score(&self) -> i32 {
        self.load_all()
            .map(|sessions| {
                sessions
                    .iter()
                    .map(|s| s.score.overall_score)
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0)
    }

    /// The `limit` newest sessions.
    fn recent_sessions(&self, limit: usize) -> Vec<ReadingSession> {
        let mut sessions = self.load_all().unwrap_or_default();
        sessions.truncate(limit);
        sessions
    }

    fn progress_stats(&self) -> ProgressStats {
        let sessions = self.load_all().unwrap_or_default();
        ProgressStats::from_sessions(&sessions)
    }
}

/// Aggregate statistics over the stored history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub total_sessions: usize,
    pub average_accuracy: f64,
    pub average_wpm: f64,
    pub average_score: f64,
    pub best_score: i32,
    /// Mean overall score of the 5 newest sessions minus the mean of the
    /// 5 before them. Positive means improving; zero until ten sessions
    /// exist.
    pub improvement_trend: f64,
}

impl Default for ProgressStats {
    fn default() -> Self {
        Self {
            total_sessions: 0,
            average_accuracy: 0.0,
            average_wpm: 0.0,
            average_score: 0.0,
            best_score: 0,
            improvement_trend: 0.0,
        }
    }
}

impl ProgressStats {
    /// Compute stats from a newest-first session list.
    pub fn from_sessions(sessions: &[ReadingSession]) -> Self {
        if sessions.is_empty() {
            return Self::default();
        }

        let scores: Vec<f64> = sessions
            .iter()
            .map(|s| s.score.overall_score as f64)
            .collect();
        let accuracies: Vec<f64> = sessions.iter().map(|s| s.metrics.accuracy).collect();
        let wpms: Vec<f64> = sessions.iter().map(|s| s.metrics.wpm).collect();

        let improvement_trend = if sessions.len() >= 10 {
            statistical::mean(&scores[..5]) - statistical::mean(&scores[5..10])
        } else {
            0.0
        };

        Self {
            total_sessions: sessions.len(),
            average_accuracy: statistical::mean(&accuracies),
            average_wpm: statistical::mean(&wpms),
            average_score: statistical::mean(&scores),
            best_score: sessions
                .iter()
                .map(|s| s.score.overall_score)
                .max()
                .unwrap_or(0),
            improvement_trend,
        }
    }
}

/// JSON-file session store.
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    /// Store rooted at `dir`; the blob file is created on first save.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(SESSIONS_FILE),
        }
    }

    /// Store under the platform data directory
    /// (`~/.local/share/lectern` on Linux).
    pub fn at_default_location() -> Result<Self> {
        let base = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(base.join("lectern")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_blob(&self) -> Result<Vec<ReadingSession>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|e| StoreError::DecodingFailed(e.to_string()))
    }

    fn write_blob(&self, sessions: &[ReadingSession]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(sessions)
            .map_err(|e| StoreError::EncodingFailed(e.to_string()))?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl SessionStore for JsonSessionStore {
    fn save(&self, session: &ReadingSession) -> Result<()> {
        let mut sessions = self.read_blob()?;

        // Same id means an updated take on the same session
        sessions.retain(|s| s.id != session.id);
        sessions.push(session.clone());

        sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sessions.truncate(MAX_SESSION_HISTORY);

        self.write_blob(&sessions)?;
        debug!("💾 Saved session {} ({} in history)", session.id, sessions.len());
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<ReadingSession>> {
        let mut sessions = self.read_blob()?;
        sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(sessions)
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let mut sessions = self.read_blob()?;
        sessions.retain(|s| s.id != id);
        self.write_blob(&sessions)?;
        info!("🗑️ Deleted session {}", id);
        Ok(())
    }
}
