//! Speech-to-text for reading sessions via the OpenAI Whisper API
//!
//! One endpoint, one job: upload a recorded WAV and get the transcript
//! back. Credentials come from a TOML config file under the user config
//! directory, with the `OPENAI_API_KEY` environment variable taking
//! precedence.
//!
//! # Example Usage
//!
//! ```no_run
//! use lectern_transcribe::{ApiConfig, Transcriber, WhisperClient};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = ApiConfig::load()?;
//! config.validate()?;
//!
//! let client = WhisperClient::from_config(&config);
//! let transcription = client.transcribe("recording.wav".as_ref()).await?;
//! println!("{}", transcription.text);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod whisper;

pub use config::ApiConfig;
pub use error::{ConfigError, Result, TranscribeError};
pub use whisper::{estimate_cost, Transcriber, Transcription, WhisperClient};
