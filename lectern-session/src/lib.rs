//! Read-aloud session orchestration
//!
//! Ties the other lectern crates together into one state machine:
//! validate the reading text, capture audio, transcribe it, analyze
//! accuracy and pace, score the run, persist it, and surface errors
//! with recovery hints. The coordinator is generic over its three
//! side-effectful collaborators so tests can swap in fakes.
//!
//! # Example Usage
//!
//! ```no_run
//! use lectern_capture::MicRecorder;
//! use lectern_metrics::JsonSessionStore;
//! use lectern_session::{SessionCoordinator, SessionState};
//! use lectern_transcribe::{ApiConfig, WhisperClient};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = ApiConfig::load()?;
//! config.validate()?;
//!
//! let mut session = SessionCoordinator::new(
//!     MicRecorder::in_temp_dir(),
//!     WhisperClient::from_config(&config),
//!     JsonSessionStore::at_default_location()?,
//! );
//!
//! session.set_input_text("The quick brown fox jumps over the lazy dog.");
//! session.start_recording().await;
//! // ... the user reads aloud ...
//! session.finish_recording().await;
//!
//! if let SessionState::Results = session.state() {
//!     let done = session.current_session().unwrap();
//!     println!("Score: {}", done.score.overall_score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod error;
pub mod state;
pub mod validate;

pub use coordinator::SessionCoordinator;
pub use error::{Result, SessionError};
pub use state::SessionState;
pub use validate::{
    count_words, validate_text, ValidationOutcome, MAX_TEXT_LENGTH, MAX_WORD_COUNT,
    MIN_TEXT_LENGTH,
};
