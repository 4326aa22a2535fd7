//! Error types for session persistence

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to encode session data: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode session data: {0}")]
    DecodingFailed(String),

    #[error("Session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("No user data directory available")]
    NoDataDir,
}
