//! End-to-end session flow against mock collaborators
//!
//! Exercises the full state machine without microphones, network, or
//! disk: the recorder hands back a canned artifact path, the transcriber
//! returns a scripted transcript (optionally failing first), and the
//! store keeps sessions in memory.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use lectern_capture::{AudioRecorder, CaptureError};
use lectern_metrics::{ReadingSession, SessionStore, StoreError};
use lectern_session::{SessionCoordinator, SessionState};
use lectern_transcribe::{TranscribeError, Transcriber, Transcription};
use uuid::Uuid;

const PASSAGE: &str = "The quick brown fox jumps over the lazy dog";

struct MockRecorder {
    artifact: Option<PathBuf>,
    deny_permission: bool,
    recording: bool,
    starts: usize,
    cancels: usize,
}

impl MockRecorder {
    fn with_artifact(path: &str) -> Self {
        Self {
            artifact: Some(PathBuf::from(path)),
            deny_permission: false,
            recording: false,
            starts: 0,
            cancels: 0,
        }
    }

    fn denying_permission() -> Self {
        Self {
            artifact: None,
            deny_permission: true,
            recording: false,
            starts: 0,
            cancels: 0,
        }
    }
}

impl AudioRecorder for MockRecorder {
    async fn start_recording(&mut self) -> lectern_capture::Result<()> {
        self.starts += 1;
        if self.deny_permission {
            return Err(CaptureError::PermissionDenied);
        }
        self.recording = true;
        Ok(())
    }

    async fn stop_recording(&mut self) -> Option<PathBuf> {
        if !self.recording {
            return None;
        }
        self.recording = false;
        self.artifact.clone()
    }

    async fn cancel_recording(&mut self) {
        self.cancels += 1;
        self.recording = false;
    }

    fn current_duration(&self) -> f64 {
        if self.recording {
            1.0
        } else {
            0.0
        }
    }

    fn is_recording(&self) -> bool {
        self.recording
    }
}

struct MockTranscriber {
    text: String,
    fail_remaining: Cell<usize>,
}

impl MockTranscriber {
    fn returning(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fail_remaining: Cell::new(0),
        }
    }

    /// Fail the first `n` calls with a network error, then succeed.
    fn failing_first(n: usize, text: &str) -> Self {
        Self {
            text: text.to_string(),
            fail_remaining: Cell::new(n),
        }
    }
}

impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio_path: &Path) -> lectern_transcribe::Result<Transcription> {
        let remaining = self.fail_remaining.get();
        if remaining > 0 {
            self.fail_remaining.set(remaining - 1);
            return Err(TranscribeError::network("connection reset"));
        }
        Ok(Transcription {
            text: self.text.clone(),
            confidence: 0.95,
        })
    }
}

#[derive(Default)]
struct MockStore {
    sessions: RefCell<Vec<ReadingSession>>,
    fail_saves: bool,
}

impl MockStore {
    fn failing() -> Self {
        Self {
            sessions: RefCell::new(Vec::new()),
            fail_saves: true,
        }
    }
}

impl SessionStore for MockStore {
    fn save(&self, session: &ReadingSession) -> lectern_metrics::Result<()> {
        if self.fail_saves {
            return Err(StoreError::EncodingFailed("simulated failure".to_string()));
        }
        self.sessions.borrow_mut().push(session.clone());
        Ok(())
    }

    fn load_all(&self) -> lectern_metrics::Result<Vec<ReadingSession>> {
        let mut sessions = self.sessions.borrow().clone();
        sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(sessions)
    }

    fn delete(&self, id: Uuid) -> lectern_metrics::Result<()> {
        self.sessions.borrow_mut().retain(|s| s.id != id);
        Ok(())
    }
}

fn session_with(
    recorder: MockRecorder,
    transcriber: MockTranscriber,
    store: MockStore,
) -> SessionCoordinator<MockRecorder, MockTranscriber, MockStore> {
    SessionCoordinator::new(recorder, transcriber, store)
}

/// A perfect read runs TextInput → Recording → Processing → Results and
/// lands in the store.
#[tokio::test]
async fn test_complete_session_reaches_results() {
    let mut session = session_with(
        MockRecorder::with_artifact("/tmp/take-1.wav"),
        MockTranscriber::returning(PASSAGE),
        MockStore::default(),
    );

    session.set_input_text(PASSAGE);
    assert_eq!(*session.state(), SessionState::TextInput);

    session.start_recording().await;
    assert_eq!(*session.state(), SessionState::Recording);
    assert!(session.is_recording());

    session.finish_recording().await;
    assert_eq!(*session.state(), SessionState::Results);
    assert!(!session.is_recording());

    let done = session.current_session().expect("completed session");
    assert_eq!(done.original_text, PASSAGE);
    assert_eq!(done.transcribed_text, PASSAGE);
    assert_eq!(done.metrics.word_count, 9);
    assert_relative_eq!(done.metrics.accuracy, 1.0);
    assert_relative_eq!(done.metrics.completion_rate, 1.0);
    assert_relative_eq!(done.metrics.confidence_score, 0.95);
    assert_eq!(done.score.accuracy_score, 100);
    assert_eq!(done.score.completion_score, 100);
    assert_eq!(
        done.recording_path.as_deref(),
        Some(Path::new("/tmp/take-1.wav"))
    );

    let names: Vec<&str> = done
        .score
        .achievements
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert!(names.contains(&"Word Perfect"));
    assert!(names.contains(&"Finisher"));
    assert!(names.contains(&"Perfectionist"));
    assert!(names.contains(&"First Steps"));

    let stored = session.store().sessions.borrow();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, done.id);
}

/// A dropped word shows up in the metrics and keeps accuracy below 1.0.
#[tokio::test]
async fn test_partial_read_scores_below_perfect() {
    let mut session = session_with(
        MockRecorder::with_artifact("/tmp/take-1.wav"),
        MockTranscriber::returning("Hello world this is test"),
        MockStore::default(),
    );

    session.set_input_text("Hello world this is a test");
    session.start_recording().await;
    session.finish_recording().await;

    assert_eq!(*session.state(), SessionState::Results);
    let done = session.current_session().expect("completed session");
    assert_eq!(done.metrics.missed_words, vec!["a"]);
    assert!(done.metrics.added_words.is_empty());
    assert_relative_eq!(done.metrics.completion_rate, 5.0 / 6.0);
    assert!(done.metrics.accuracy < 1.0);
    assert_eq!(done.metrics.word_count, 6);
}

/// Invalid text never leaves TextInput; it raises a dismissible alert
/// and the recorder is not touched.
#[tokio::test]
async fn test_invalid_text_raises_alert_and_stays_put() {
    let mut session = session_with(
        MockRecorder::with_artifact("/tmp/take-1.wav"),
        MockTranscriber::returning("hi"),
        MockStore::default(),
    );

    session.set_input_text("Hi");
    session.start_recording().await;

    assert_eq!(*session.state(), SessionState::TextInput);
    let alert = session.alert().expect("validation alert");
    assert!(alert.contains("too short"));
    assert_eq!(session.recorder().starts, 0);

    session.dismiss_alert();
    assert!(session.alert().is_none());
}

/// Cancelling a recording returns to text entry with the text intact.
#[tokio::test]
async fn test_cancel_returns_to_text_input_and_keeps_text() {
    let mut session = session_with(
        MockRecorder::with_artifact("/tmp/take-1.wav"),
        MockTranscriber::returning(PASSAGE),
        MockStore::default(),
    );

    session.set_input_text(PASSAGE);
    session.start_recording().await;
    session.cancel_recording().await;

    assert_eq!(*session.state(), SessionState::TextInput);
    assert_eq!(session.input_text(), PASSAGE);
    assert!(!session.is_recording());
    assert_eq!(session.recorder().cancels, 1);
}

/// A denied microphone lands in the error state with the recovery hint.
#[tokio::test]
async fn test_permission_denied_moves_to_error() {
    let mut session = session_with(
        MockRecorder::denying_permission(),
        MockTranscriber::returning(PASSAGE),
        MockStore::default(),
    );

    session.set_input_text(PASSAGE);
    session.start_recording().await;

    let message = session.state().error_message().expect("error state");
    assert!(message.contains("Microphone permission denied"));
    assert!(message.contains("system privacy settings"));
    assert!(session.current_session().is_none());
}

/// A transcription failure ends in Error with cause and hint, and
/// nothing is persisted.
#[tokio::test]
async fn test_transcription_failure_moves_to_error_without_saving() {
    let mut session = session_with(
        MockRecorder::with_artifact("/tmp/take-1.wav"),
        MockTranscriber::failing_first(1, PASSAGE),
        MockStore::default(),
    );

    session.set_input_text(PASSAGE);
    session.start_recording().await;
    session.finish_recording().await;

    let message = session.state().error_message().expect("error state");
    assert!(message.contains("Network request failed: connection reset"));
    assert!(message.contains("Check your internet connection and try again"));
    assert!(session.current_session().is_none());
    assert!(session.store().sessions.borrow().is_empty());
}

/// With no completed session, retrying from the error state restarts
/// capture, and the next take can succeed.
#[tokio::test]
async fn test_retry_from_error_restarts_capture() {
    let mut session = session_with(
        MockRecorder::with_artifact("/tmp/take-2.wav"),
        MockTranscriber::failing_first(1, PASSAGE),
        MockStore::default(),
    );

    session.set_input_text(PASSAGE);
    session.start_recording().await;
    session.finish_recording().await;
    assert!(matches!(session.state(), SessionState::Error(_)));

    session.retry_from_error().await;
    assert_eq!(*session.state(), SessionState::Recording);
    assert_eq!(session.recorder().starts, 2);

    session.finish_recording().await;
    assert_eq!(*session.state(), SessionState::Results);
    assert!(session.current_session().is_some());
    assert_eq!(session.store().sessions.borrow().len(), 1);
}

/// With a completed session on hand, retrying from the error state goes
/// back to those results.
#[tokio::test]
async fn test_retry_from_error_returns_to_results_when_session_exists() {
    let mut session = session_with(
        MockRecorder::with_artifact("/tmp/take-1.wav"),
        MockTranscriber::returning(PASSAGE),
        MockStore::default(),
    );

    session.set_input_text(PASSAGE);
    session.start_recording().await;
    session.finish_recording().await;
    assert_eq!(*session.state(), SessionState::Results);

    // Stopping again with nothing live is an error.
    session.finish_recording().await;
    let message = session.state().error_message().expect("error state");
    assert!(message.contains("No active recording"));

    session.retry_from_error().await;
    assert_eq!(*session.state(), SessionState::Results);
    assert!(session.current_session().is_some());
}

/// A failing store is logged and swallowed; the user still gets results.
#[tokio::test]
async fn test_store_failure_still_reaches_results() {
    let mut session = session_with(
        MockRecorder::with_artifact("/tmp/take-1.wav"),
        MockTranscriber::returning(PASSAGE),
        MockStore::failing(),
    );

    session.set_input_text(PASSAGE);
    session.start_recording().await;
    session.finish_recording().await;

    assert_eq!(*session.state(), SessionState::Results);
    let done = session.current_session().expect("completed session");
    assert_eq!(done.score.completion_score, 100);
    assert!(session.store().sessions.borrow().is_empty());
}

/// Trying again from the results keeps the old session visible until
/// the new take completes.
#[tokio::test]
async fn test_retry_recording_starts_a_fresh_take() {
    let mut session = session_with(
        MockRecorder::with_artifact("/tmp/take-1.wav"),
        MockTranscriber::returning(PASSAGE),
        MockStore::default(),
    );

    session.set_input_text(PASSAGE);
    session.start_recording().await;
    session.finish_recording().await;
    assert_eq!(*session.state(), SessionState::Results);

    session.retry_recording().await;
    assert_eq!(*session.state(), SessionState::Recording);
    assert_eq!(session.recorder().starts, 2);
    assert!(session.current_session().is_some());
}

/// Starting over clears the text, the session, and any alert.
#[tokio::test]
async fn test_start_new_session_clears_everything() {
    let mut session = session_with(
        MockRecorder::with_artifact("/tmp/take-1.wav"),
        MockTranscriber::returning(PASSAGE),
        MockStore::default(),
    );

    session.set_input_text(PASSAGE);
    session.start_recording().await;
    session.finish_recording().await;
    assert!(session.current_session().is_some());

    session.start_new_session();
    assert_eq!(*session.state(), SessionState::TextInput);
    assert!(session.input_text().is_empty());
    assert!(session.current_session().is_none());
    assert!(session.alert().is_none());
}
