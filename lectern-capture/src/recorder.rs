//! Microphone recorder writing 16-bit mono WAV files.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::error::{CaptureError, Result};

const START_TIMEOUT: Duration = Duration::from_secs(5);
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

type SharedWriter = Arc<Mutex<Option<hound::WavWriter<std::io::BufWriter<std::fs::File>>>>>;

/// Capture surface used by the session coordinator.
///
/// One production implementation exists ([`MicRecorder`]); tests supply
/// their own doubles.
#[allow(async_fn_in_trait)]
pub trait AudioRecorder {
    /// Begin capturing. Fails when a recording is already live or the
    /// input device cannot be opened.
    async fn start_recording(&mut self) -> Result<()>;

    /// Stop capturing and return the finished artifact, if any.
    async fn stop_recording(&mut self) -> Option<PathBuf>;

    /// Stop capturing and throw the artifact away.
    async fn cancel_recording(&mut self);

    /// Seconds since capture began, `0.0` when idle.
    fn current_duration(&self) -> f64;

    fn is_recording(&self) -> bool;
}

/// Records the default input device to timestamped WAV files.
///
/// The cpal stream is not `Send`, so each recording runs on its own
/// audio thread; this handle only holds channels into it and can move
/// between tasks freely.
pub struct MicRecorder {
    output_dir: PathBuf,
    active: Option<ActiveRecording>,
}

struct ActiveRecording {
    path: PathBuf,
    started_at: Instant,
    stop_tx: mpsc::Sender<()>,
    done_rx: mpsc::Receiver<Result<PathBuf>>,
}

impl MicRecorder {
    /// Recorder writing WAV files under `output_dir`.
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            active: None,
        }
    }

    /// Recorder writing into the system temp directory.
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join("lectern"))
    }
}

impl AudioRecorder for MicRecorder {
    async fn start_recording(&mut self) -> Result<()> {
        if self.active.is_some() {
            return Err(CaptureError::AlreadyRecording);
        }

        let path = self.output_dir.join(recording_file_name(Utc::now()));

        let (ready_tx, ready_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel();

        let thread_path = path.clone();
        thread::Builder::new()
            .name("lectern-capture".into())
            .spawn(move || run_capture_thread(thread_path, ready_tx, stop_rx, done_tx))
            .map_err(CaptureError::Io)?;

        match ready_rx.recv_timeout(START_TIMEOUT) {
            Ok(Ok(())) => {
                self.active = Some(ActiveRecording {
                    path,
                    started_at: Instant::now(),
                    stop_tx,
                    done_rx,
                });
                Ok(())
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(CaptureError::recording("Audio thread did not start in time")),
        }
    }

    async fn stop_recording(&mut self) -> Option<PathBuf> {
        let active = match self.active.take() {
            Some(active) => active,
            None => {
                warn!("Stop requested with no active recording");
                return None;
            }
        };

        let elapsed = active.started_at.elapsed().as_secs_f64();
        let _ = active.stop_tx.send(());

        match active.done_rx.recv_timeout(STOP_TIMEOUT) {
            Ok(Ok(path)) => {
                info!("🛑 Recording stopped after {:.1}s: {}", elapsed, path.display());
                Some(path)
            }
            Ok(Err(e)) => {
                warn!("Recording could not be finalized: {}", e);
                None
            }
            Err(_) => {
                warn!("Audio thread did not confirm stop");
                None
            }
        }
    }

    async fn cancel_recording(&mut self) {
        if let Some(active) = self.active.take() {
            let _ = active.stop_tx.send(());
            let _ = active.done_rx.recv_timeout(STOP_TIMEOUT);
            if let Err(e) = std::fs::remove_file(&active.path) {
                debug!("Could not remove discarded recording: {}", e);
            }
            info!("🚫 Recording cancelled");
        }
    }

    fn current_duration(&self) -> f64 {
        self.active
            .as_ref()
            .map(|a| a.started_at.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn is_recording(&self) -> bool {
        self.active.is_some()
    }
}

fn recording_file_name(now: DateTime<Utc>) -> String {
    format!("recording-{}.wav", now.format("%Y%m%d-%H%M%S%3f"))
}

/// Owns the cpal stream for one recording, start to finish.
fn run_capture_thread(
    path: PathBuf,
    ready_tx: mpsc::Sender<Result<()>>,
    stop_rx: mpsc::Receiver<()>,
    done_tx: mpsc::Sender<Result<PathBuf>>,
) {
    let writer: SharedWriter = Arc::new(Mutex::new(None));

    let stream = match open_stream(&path, Arc::clone(&writer)) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return;
        }
    };

    let _ = ready_tx.send(Ok(()));

    // Blocks until stop is requested or the handle is dropped
    let _ = stop_rx.recv();

    drop(stream);

    let result = match writer.lock().take() {
        Some(w) => w
            .finalize()
            .map(|_| path.clone())
            .map_err(|e| CaptureError::recording(format!("Failed to finalize WAV: {}", e))),
        None => Err(CaptureError::recording("WAV writer disappeared")),
    };
    let _ = done_tx.send(result);
}

fn open_stream(path: &std::path::Path, writer: SharedWriter) -> Result<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| CaptureError::recording("No input device available"))?;
    let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

    let supported = device
        .default_input_config()
        .map_err(|e| CaptureError::recording(format!("Failed to read device config: {}", e)))?;

    let channels = supported.channels() as usize;
    let sample_rate = supported.sample_rate().0;
    let sample_format = supported.sample_format();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let wav = hound::WavWriter::create(path, spec)
        .map_err(|e| CaptureError::recording(format!("Failed to create WAV file: {}", e)))?;
    *writer.lock() = Some(wav);

    info!("🎤 Recording from '{}' at {} Hz", device_name, sample_rate);

    let config: cpal::StreamConfig = supported.into();
    let stream = match sample_format {
        SampleFormat::F32 => build_stream::<f32>(&device, &config, channels, writer),
        SampleFormat::I16 => build_stream::<i16>(&device, &config, channels, writer),
        SampleFormat::U16 => build_stream::<u16>(&device, &config, channels, writer),
        other => Err(CaptureError::recording(format!(
            "Unsupported sample format: {}",
            other
        ))),
    }?;

    stream
        .play()
        .map_err(|e| CaptureError::recording(format!("Failed to start stream: {}", e)))?;

    Ok(stream)
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    writer: SharedWriter,
) -> Result<cpal::Stream>
where
    T: SizedSample,
    i16: FromSample<T>,
{
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                write_frames(data, channels, &writer);
            },
            |err| error!("Audio stream error: {}", err),
            None,
        )
        .map_err(|e| CaptureError::recording(format!("Failed to build input stream: {}", e)))
}

fn write_frames<T>(data: &[T], channels: usize, writer: &SharedWriter)
where
    T: Sample,
    i16: FromSample<T>,
{
    let mut guard = writer.lock();
    if let Some(w) = guard.as_mut() {
        // Left channel only for the mono downmix
        for frame in data.chunks(channels.max(1)) {
            let _ = w.write_sample(i16::from_sample(frame[0]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_idle_recorder_reports_zero_duration() {
        let recorder = MicRecorder::in_temp_dir();
        assert!(!recorder.is_recording());
        assert_eq!(recorder.current_duration(), 0.0);
    }

    #[tokio::test]
    async fn test_stop_without_start_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let mut recorder = MicRecorder::new(dir.path());
        assert!(recorder.stop_recording().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_without_start_is_harmless() {
        let dir = TempDir::new().unwrap();
        let mut recorder = MicRecorder::new(dir.path());
        recorder.cancel_recording().await;
        assert!(!recorder.is_recording());
    }

    #[tokio::test]
    async fn test_double_start_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut recorder = MicRecorder::new(dir.path());
        // Fake an active recording so no device is needed.
        let (stop_tx, _stop_rx) = mpsc::channel();
        let (_done_tx, done_rx) = mpsc::channel();
        recorder.active = Some(ActiveRecording {
            path: dir.path().join("recording.wav"),
            started_at: Instant::now(),
            stop_tx,
            done_rx,
        });

        assert!(matches!(
            recorder.start_recording().await,
            Err(CaptureError::AlreadyRecording)
        ));
    }

    #[test]
    fn test_recording_file_name_format() {
        let ts = chrono::DateTime::parse_from_rfc3339("2025-03-04T05:06:07.123Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(recording_file_name(ts), "recording-20250304-050607123.wav");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CaptureError::PermissionDenied.to_string(),
            "Microphone permission denied"
        );
        assert_eq!(CaptureError::AlreadyRecording.to_string(), "Already recording");
    }
}
