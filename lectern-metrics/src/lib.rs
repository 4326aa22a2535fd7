//! Reading session models and history persistence
//!
//! The data layer for read-aloud practice: the measurements taken from one
//! recording, the game score derived from them, and the capped session
//! history kept on disk as a single JSON blob.
//!
//! # Features
//!
//! - `ReadingMetrics` / `GameScore` / `Achievement` / `ReadingSession` models
//! - camelCase serialization compatible with existing session archives
//! - `SessionStore` trait with JSON-file implementation
//! - History capped at 100 sessions, newest first, deduplicated by id
//! - Aggregate progress statistics with an improvement trend
//!
//! # Example Usage
//!
//! ```no_run
//! use lectern_metrics::{JsonSessionStore, SessionStore};
//!
//! let store = JsonSessionStore::at_default_location()?;
//! let sessions = store.load_all()?;
//! println!("{} sessions, best score {}", sessions.len(), store.best_score());
//! # Ok::<(), lectern_metrics::StoreError>(())
//! ```

pub mod error;
pub mod models;
pub mod store;

pub use error::{Result, StoreError};
pub use models::{Achievement, GameScore, ReadingMetrics, ReadingSession};
pub use store::{JsonSessionStore, ProgressStats, SessionStore, MAX_SESSION_HISTORY};
