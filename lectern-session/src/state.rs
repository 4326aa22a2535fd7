//! Reading session state machine states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The phases a reading session moves through.
///
/// `Error` carries the rendered message for display. There are no
/// terminal states: `Results` and `Error` both resume via user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    TextInput,
    Recording,
    Processing,
    Results,
    Error(String),
}

impl Default for SessionState {
    fn default() -> Self {
        Self::TextInput
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextInput => write!(f, "text input"),
            Self::Recording => write!(f, "recording"),
            Self::Processing => write!(f, "processing"),
            Self::Results => write!(f, "results"),
            Self::Error(_) => write!(f, "error"),
        }
    }
}

impl SessionState {
    /// The error message, when the session is in the error state.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}
