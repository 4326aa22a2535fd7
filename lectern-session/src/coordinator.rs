//! Session orchestration.
//!
//! [`SessionCoordinator`] owns the collaborators and all mutable session
//! state. Every transition goes through a `&mut self` method, so there is
//! exactly one writer and no locking discipline to get wrong. The
//! processing pipeline runs as one awaitable unit of work: transcription
//! and the save attempt are the only suspension points, everything in
//! between is pure computation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use lectern_analysis::{calculate_wpm, compare_texts};
use lectern_capture::{AudioRecorder, CaptureError};
use lectern_metrics::{ReadingMetrics, ReadingSession, SessionStore};
use lectern_scoring::calculate_score;
use lectern_transcribe::Transcriber;
use tracing::{debug, info, warn};

use crate::error::{Result, SessionError};
use crate::state::SessionState;
use crate::validate::{count_words, validate_text};

/// Drives a reading session from text entry through recording,
/// transcription, scoring and persistence.
pub struct SessionCoordinator<R, T, S> {
    recorder: R,
    transcriber: T,
    store: S,
    state: SessionState,
    input_text: String,
    current_session: Option<ReadingSession>,
    alert: Option<String>,
    recording_started: Option<Instant>,
}

impl<R, T, S> SessionCoordinator<R, T, S>
where
    R: AudioRecorder,
    T: Transcriber,
    S: SessionStore,
{
    pub fn new(recorder: R, transcriber: T, store: S) -> Self {
        Self {
            recorder,
            transcriber,
            store,
            state: SessionState::TextInput,
            input_text: String::new(),
            current_session: None,
            alert: None,
            recording_started: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    /// The completed session from the most recent successful pipeline run.
    pub fn current_session(&self) -> Option<&ReadingSession> {
        self.current_session.as_ref()
    }

    /// The pending non-fatal alert, if any.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Seconds of audio captured so far, `0.0` when idle.
    pub fn recording_duration(&self) -> f64 {
        self.recorder.current_duration()
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    /// Session history, for presentation layers that list past runs.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Validate the input text and begin capturing.
    ///
    /// Invalid text leaves the state untouched and raises a dismissible
    /// alert instead. A capture failure moves to the error state.
    pub async fn start_recording(&mut self) {
        let outcome = validate_text(&self.input_text);
        if !outcome.is_valid {
            let message = outcome
                .error_message
                .unwrap_or_else(|| "Please enter valid text before recording".to_string());
            debug!(%message, "🚫 Rejected reading text");
            self.alert = Some(message);
            return;
        }
        self.begin_capture().await;
    }

    /// Abandon the in-flight recording and return to text entry.
    /// The input text is preserved.
    pub async fn cancel_recording(&mut self) {
        self.recorder.cancel_recording().await;
        self.recording_started = None;
        self.state = SessionState::TextInput;
    }

    /// Stop capturing and run the processing pipeline on the artifact.
    pub async fn finish_recording(&mut self) {
        match self.recorder.stop_recording().await {
            Some(path) => self.process_recording(path).await,
            None => {
                let err = SessionError::from(CaptureError::NoActiveRecording);
                warn!("❌ No recording artifact to process");
                self.state = SessionState::Error(err.display_message());
            }
        }
    }

    /// Transcribe, analyze, score and persist one recording artifact.
    ///
    /// Ends in `Results` carrying the completed session. A persistence
    /// failure is logged and swallowed; any other failure ends in
    /// `Error` with a rendered message.
    pub async fn process_recording(&mut self, audio_path: PathBuf) {
        self.state = SessionState::Processing;
        debug!(artifact = %audio_path.display(), "🎤 Processing recording");

        match self.run_pipeline(&audio_path).await {
            Ok(session) => {
                info!("🏆 Overall score: {}", session.score.overall_score);
                self.current_session = Some(session);
                self.state = SessionState::Results;
            }
            Err(err) => {
                warn!("❌ Processing failed: {}", err);
                self.state = SessionState::Error(err.display_message());
            }
        }
    }

    /// Record the same text again, with a fresh start time.
    pub async fn retry_recording(&mut self) {
        self.begin_capture().await;
    }

    /// Clear everything and return to text entry.
    pub fn start_new_session(&mut self) {
        self.input_text.clear();
        self.current_session = None;
        self.alert = None;
        self.recording_started = None;
        self.state = SessionState::TextInput;
        debug!("📝 Ready for a new session");
    }

    /// Leave the error state: back to the completed results when one
    /// exists, otherwise restart capture with a fresh start time.
    pub async fn retry_from_error(&mut self) {
        if !matches!(self.state, SessionState::Error(_)) {
            self.state = SessionState::TextInput;
            return;
        }
        if self.current_session.is_some() {
            self.state = SessionState::Results;
        } else {
            self.begin_capture().await;
        }
    }

    async fn begin_capture(&mut self) {
        match self.recorder.start_recording().await {
            Ok(()) => {
                self.recording_started = Some(Instant::now());
                self.state = SessionState::Recording;
                info!("🎤 Recording started");
            }
            Err(err) => {
                let err = SessionError::from(err);
                warn!("❌ Could not start recording: {}", err);
                self.state = SessionState::Error(err.display_message());
            }
        }
    }

    async fn run_pipeline(&self, audio_path: &Path) -> Result<ReadingSession> {
        let transcription = self.transcriber.transcribe(audio_path).await?;
        debug!(
            chars = transcription.text.len(),
            confidence = transcription.confidence,
            "transcription complete"
        );

        // Duration comes from the recorded start time, word count from
        // the original input text, not the transcript.
        let duration = self
            .recording_started
            .map(|started| started.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        let word_count = count_words(&self.input_text);
        let wpm = calculate_wpm(word_count, duration);

        let accuracy = compare_texts(&self.input_text, &transcription.text);
        debug!(
            overall = accuracy.overall_accuracy,
            completion = accuracy.completion_rate,
            wpm,
            "accuracy analysis complete"
        );

        let metrics = ReadingMetrics {
            accuracy: accuracy.overall_accuracy,
            completion_rate: accuracy.completion_rate,
            confidence_score: transcription.confidence,
            wpm,
            duration,
            word_count,
            added_words: accuracy.added_words,
            missed_words: accuracy.missed_words,
        };
        let score = calculate_score(&metrics);

        let session = ReadingSession::new(
            self.input_text.clone(),
            transcription.text,
            Some(audio_path.to_path_buf()),
            metrics,
            score,
        );

        if let Err(err) = self.store.save(&session) {
            warn!("⚠️ Failed to save session: {}", err);
        }

        Ok(session)
    }
}
