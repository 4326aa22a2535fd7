//! Game scoring for reading sessions
//!
//! Turns the raw measurements of a session into a 0-100 game score with
//! accuracy, speed, and completion components, then awards achievements
//! from a fixed rule list.
//!
//! ```
//! use lectern_metrics::ReadingMetrics;
//! use lectern_scoring::calculate_score;
//!
//! let metrics = ReadingMetrics {
//!     accuracy: 1.0,
//!     completion_rate: 1.0,
//!     wpm: 155.0,
//!     ..Default::default()
//! };
//!
//! let score = calculate_score(&metrics);
//! assert_eq!(score.overall_score, 100);
//! assert!(!score.achievements.is_empty());
//! ```

pub mod engine;

pub use engine::{calculate_score, check_achievements, speed_score};
