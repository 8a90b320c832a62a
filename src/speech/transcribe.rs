//! Speech-to-text abstraction
//!
//! The game uses this to turn the player's voice sample into the text the
//! AI voice will read back.

use crate::audio::AudioHandle;
use crate::Result;

/// Speech-to-text trait
///
/// An empty string is a normal result (nothing recognizable was said) and is
/// handled by the game as an invalid round, not an error. `Err` is reserved
/// for service-level failures.
pub trait Transcriber {
    /// Transcribe the audio clip to text
    fn transcribe(&mut self, audio: &AudioHandle) -> Result<String>;
}
