//! Microphone capture for reading sessions
//!
//! Records the default input device to a 16-bit mono WAV file. The cpal
//! stream is not `Send`, so it lives on a dedicated audio thread and the
//! recorder handle talks to it over channels; the handle itself can move
//! freely between async tasks.
//!
//! # Example Usage
//!
//! ```no_run
//! use lectern_capture::{AudioRecorder, MicRecorder};
//!
//! # async fn demo() -> lectern_capture::Result<()> {
//! let mut recorder = MicRecorder::in_temp_dir();
//! recorder.start_recording().await?;
//! // ... reader reads aloud ...
//! if let Some(path) = recorder.stop_recording().await {
//!     println!("saved {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod recorder;

pub use error::{CaptureError, Result};
pub use recorder::{AudioRecorder, MicRecorder};
