//! Session-level error taxonomy with user-facing messaging.
//!
//! Collaborator errors are wrapped rather than stringified so the
//! orchestrator can decide retryability per kind. The rendered message
//! shown in the error state is [`SessionError::display_message`].

use lectern_capture::CaptureError;
use lectern_metrics::StoreError;
use lectern_transcribe::{ConfigError, TranscribeError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Text validation error: {0}")]
    InvalidText(String),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Transcribe(#[from] TranscribeError),

    #[error(transparent)]
    Credential(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("An unexpected error occurred: {0}")]
    Unknown(String),
}

impl SessionError {
    /// Human-readable description, safe to show directly to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// A concrete next step the user can take, when one exists.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidText(_) => Some("Please check your text input and try again"),
            Self::Capture(CaptureError::PermissionDenied) => {
                Some("Please enable microphone access in your system privacy settings")
            }
            Self::Capture(CaptureError::RecordingFailed(_)) => {
                Some("Try checking your microphone connection and try again")
            }
            Self::Capture(CaptureError::AlreadyRecording) => {
                Some("Stop the current recording before starting a new one")
            }
            Self::Capture(CaptureError::NoActiveRecording) => {
                Some("Start a new recording session")
            }
            Self::Capture(CaptureError::Io(_)) => {
                Some("Check available storage space and try again")
            }
            Self::Transcribe(TranscribeError::NoCredential)
            | Self::Credential(ConfigError::MissingCredential)
            | Self::Credential(ConfigError::InvalidCredentialFormat) => {
                Some("Please configure your OpenAI API key in the app settings")
            }
            Self::Transcribe(TranscribeError::InvalidEndpoint(_)) => {
                Some("There's a configuration issue. Please restart the app")
            }
            Self::Transcribe(TranscribeError::Network(_)) => {
                Some("Check your internet connection and try again")
            }
            Self::Transcribe(TranscribeError::Service(_)) => {
                Some("There may be an issue with the speech recognition service. Please try again later")
            }
            Self::Transcribe(TranscribeError::MalformedResponse) => {
                Some("The speech recognition service returned an unexpected response. Please try again")
            }
            Self::Store(_) => Some("Try restarting the app. Your data should be preserved"),
            Self::Unknown(_) => Some("Please try again. If the problem persists, restart the app"),
        }
    }

    /// Whether retrying without changing anything can plausibly succeed.
    ///
    /// Permission and credential problems require user action outside the
    /// session first, so they are not retryable. Network, service,
    /// recording and persistence failures are.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Capture(CaptureError::PermissionDenied) => false,
            Self::Capture(_) => true,
            Self::Transcribe(TranscribeError::NoCredential) => false,
            Self::Transcribe(_) => true,
            Self::Credential(_) => false,
            Self::Store(_) => true,
            Self::InvalidText(_) => false,
            Self::Unknown(_) => true,
        }
    }

    /// The message carried by the error state: description plus recovery
    /// hint, separated by a blank line, when a hint exists.
    pub fn display_message(&self) -> String {
        match self.recovery_suggestion() {
            Some(hint) => format!("{}\n\n{}", self.user_message(), hint),
            None => self.user_message(),
        }
    }
}
