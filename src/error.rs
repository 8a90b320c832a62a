//! Error types for voiceoff

use std::io;
use thiserror::Error;

/// Main error type for voiceoff
#[derive(Error, Debug)]
pub enum VoiceoffError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Audio capture error: {0}")]
    Capture(String),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for voiceoff operations
pub type Result<T> = std::result::Result<T, VoiceoffError>;

impl From<String> for VoiceoffError {
    fn from(s: String) -> Self {
        VoiceoffError::Other(s)
    }
}

impl From<&str> for VoiceoffError {
    fn from(s: &str) -> Self {
        VoiceoffError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for VoiceoffError {
    fn from(e: serde_json::Error) -> Self {
        VoiceoffError::Other(format!("JSON error: {}", e))
    }
}
