//! voiceoff - real voice vs AI voice guessing game
//!
//! The player supplies a voice sample (mic recording or WAV upload), the
//! sample is transcribed and read back by a synthesized voice, and the player
//! must pick which of two clips is their real voice. Scores persist to a
//! JSON leaderboard.

pub mod audio;
pub mod config;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod speech;

pub use error::{Result, VoiceoffError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "voiceoff";
