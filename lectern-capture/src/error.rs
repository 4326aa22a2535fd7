//! Error types for audio capture

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CaptureError>;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("Recording failed: {0}")]
    RecordingFailed(String),

    #[error("Already recording")]
    AlreadyRecording,

    #[error("No active recording")]
    NoActiveRecording,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaptureError {
    pub fn recording<S: Into<String>>(msg: S) -> Self {
        Self::RecordingFailed(msg.into())
    }
}
