//! OpenAI Whisper transcription client.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::error::{Result, TranscribeError};

/// Whisper reports no per-request confidence, so every transcription
/// carries this fixed value and downstream scoring stays consistent.
const FIXED_CONFIDENCE: f64 = 0.95;

/// Whisper list price per minute of audio, in USD.
const COST_PER_MINUTE: f64 = 0.006;

const MODEL: &str = "whisper-1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Transcription surface used by the session coordinator.
///
/// One production implementation exists ([`WhisperClient`]); tests supply
/// their own doubles.
#[allow(async_fn_in_trait)]
pub trait Transcriber {
    /// Transcribe the audio artifact at `audio_path`.
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcription>;
}

/// A finished transcription.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    pub text: String,
    pub confidence: f64,
}

#[derive(Deserialize)]
struct WhisperResponse {
    text: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// HTTP client for the OpenAI `/audio/transcriptions` endpoint.
#[derive(Clone)]
pub struct WhisperClient {
    inner: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WhisperClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, "https://api.openai.com/v1")
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            inner: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::with_base_url(&config.openai_api_key, &config.api_base_url)
    }
}

impl Transcriber for WhisperClient {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcription> {
        if self.api_key.is_empty() {
            return Err(TranscribeError::NoCredential);
        }

        let url = format!(
            "{}/audio/transcriptions",
            self.base_url.trim_end_matches('/')
        );
        reqwest::Url::parse(&url).map_err(|_| TranscribeError::InvalidEndpoint(url.clone()))?;

        let audio = tokio::fs::read(audio_path)
            .await
            .map_err(|e| TranscribeError::network(format!("Failed to read audio file: {}", e)))?;

        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string());

        debug!("Uploading {} bytes as '{}'", audio.len(), file_name);

        let part = Part::bytes(audio)
            .file_name(file_name)
            .mime_str("audio/wav")
            .map_err(|e| TranscribeError::network(e.to_string()))?;

        let form = Form::new()
            .text("model", MODEL)
            .text("response_format", "json")
            .part("file", part);

        let response = self
            .inner
            .post(url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| TranscribeError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));
            return Err(TranscribeError::service(message));
        }

        let parsed: WhisperResponse = response
            .json()
            .await
            .map_err(|_| TranscribeError::MalformedResponse)?;

        info!("📝 Transcribed {} characters", parsed.text.len());

        Ok(Transcription {
            text: parsed.text,
            confidence: FIXED_CONFIDENCE,
        })
    }
}

/// Estimated Whisper cost in USD for `duration_secs` of audio.
pub fn estimate_cost(duration_secs: f64) -> f64 {
    duration_secs / 60.0 * COST_PER_MINUTE
}
