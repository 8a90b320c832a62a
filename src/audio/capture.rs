//! Audio capture abstraction
//!
//! Supplies the raw voice sample for a round, either from an uploaded WAV
//! file or from a blocking fixed-duration microphone recording. Captured
//! audio lands in a scratch directory as mono PCM WAV.

use crate::{Result, VoiceoffError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{debug, info, warn};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Handle to a captured or synthesized audio clip
///
/// Resolves to a file path playable as mono PCM WAV. Handles are cheap to
/// clone; the underlying file outlives the handle (scratch files are only
/// overwritten by the next capture/synthesis, never deleted mid-round).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioHandle(PathBuf);

impl AudioHandle {
    /// Create a handle for an existing audio file
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    /// Path to the playable WAV file
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Audio capture trait
///
/// The game calls these to obtain the player's real voice sample.
pub trait AudioCapture {
    /// Store uploaded WAV bytes and return a handle to them
    ///
    /// `name` is the upload's file name, used by the game to detect
    /// re-submissions of the same file.
    fn capture_from_upload(&mut self, bytes: &[u8], name: &str) -> Result<AudioHandle>;

    /// Record from the default microphone for a fixed duration
    ///
    /// Blocks the caller until the duration elapses; not cancellable.
    fn capture_from_mic(&mut self, duration_secs: u32, sample_rate: u32) -> Result<AudioHandle>;
}

/// File-backed capture implementation
///
/// Uploads are validated as WAV and copied into the scratch directory;
/// mic recordings use cpal's default input device and are encoded as
/// 16-bit mono PCM with hound.
pub struct WavCapture {
    /// Scratch directory for captured audio
    dir: PathBuf,
}

impl WavCapture {
    /// Create a capture backend writing into `dir` (created if missing)
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path where the real voice sample is stored
    fn real_path(&self) -> PathBuf {
        self.dir.join("real.wav")
    }
}

impl AudioCapture for WavCapture {
    fn capture_from_upload(&mut self, bytes: &[u8], name: &str) -> Result<AudioHandle> {
        debug!("Upload '{}': {} bytes", name, bytes.len());

        // Reject anything that doesn't parse as WAV before it enters the game
        hound::WavReader::new(Cursor::new(bytes))
            .map_err(|e| VoiceoffError::Input(format!("'{}' is not a valid WAV file: {}", name, e)))?;

        let path = self.real_path();
        std::fs::write(&path, bytes)?;
        info!("Stored upload '{}' at {:?}", name, path);
        Ok(AudioHandle::new(path))
    }

    fn capture_from_mic(&mut self, duration_secs: u32, sample_rate: u32) -> Result<AudioHandle> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| VoiceoffError::Capture("no default input device".to_string()))?;
        info!(
            "Recording {}s at {} Hz from {:?}",
            duration_secs,
            sample_rate,
            device.name().unwrap_or_else(|_| "unknown".to_string())
        );

        let stream_config = cpal::StreamConfig {
            channels: 1,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let path = self.real_path();
        let writer = hound::WavWriter::create(&path, spec)
            .map_err(|e| VoiceoffError::Capture(format!("Failed to create WAV file: {}", e)))?;
        let writer = Arc::new(Mutex::new(Some(writer)));

        // The stream callback runs on cpal's audio thread; samples are
        // funneled into the shared writer until the stream is dropped.
        let writer_clone = Arc::clone(&writer);
        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut guard) = writer_clone.lock() {
                        if let Some(w) = guard.as_mut() {
                            for &sample in data {
                                let clamped = sample.clamp(-1.0, 1.0);
                                let value = (clamped * i16::MAX as f32) as i16;
                                // A full disk mid-recording truncates the clip
                                let _ = w.write_sample(value);
                            }
                        }
                    }
                },
                |e| warn!("Input stream error: {}", e),
                None,
            )
            .map_err(|e| VoiceoffError::Capture(format!("Failed to open input stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| VoiceoffError::Capture(format!("Failed to start recording: {}", e)))?;

        // Synchronous by design: the round does not advance until the
        // recording window has elapsed.
        std::thread::sleep(Duration::from_secs(u64::from(duration_secs)));
        drop(stream);

        let writer = writer
            .lock()
            .map_err(|_| VoiceoffError::Capture("recording writer poisoned".to_string()))?
            .take();
        if let Some(w) = writer {
            w.finalize()
                .map_err(|e| VoiceoffError::Capture(format!("Failed to finalize WAV: {}", e)))?;
        }

        info!("Recording finished, saved to {:?}", path);
        Ok(AudioHandle::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes() -> Vec<u8> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..100i16 {
            writer.write_sample(i).unwrap();
        }
        writer.finalize().unwrap();
        std::fs::read(&path).unwrap()
    }

    #[test]
    fn test_upload_valid_wav() {
        let dir = tempfile::tempdir().unwrap();
        let mut capture = WavCapture::new(dir.path().join("scratch")).unwrap();

        let handle = capture.capture_from_upload(&wav_bytes(), "me.wav").unwrap();
        assert!(handle.path().exists());
        assert_eq!(handle.path().file_name().unwrap(), "real.wav");
    }

    #[test]
    fn test_upload_rejects_non_wav() {
        let dir = tempfile::tempdir().unwrap();
        let mut capture = WavCapture::new(dir.path().join("scratch")).unwrap();

        let result = capture.capture_from_upload(b"definitely not audio", "junk.wav");
        assert!(matches!(result, Err(VoiceoffError::Input(_))));
    }
}
