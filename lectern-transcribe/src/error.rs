//! Error types for transcription and credential configuration

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranscribeError>;

#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("No API credential configured")]
    NoCredential,

    #[error("Invalid API endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Transcription service error: {0}")]
    Service(String),

    #[error("Could not understand the service response")]
    MalformedResponse,
}

impl TranscribeError {
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    pub fn service<S: Into<String>>(msg: S) -> Self {
        Self::Service(msg.into())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key is not configured")]
    MissingCredential,

    #[error("API key format is invalid (expected an sk- prefix)")]
    InvalidCredentialFormat,
}
