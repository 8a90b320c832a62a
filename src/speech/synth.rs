//! Text-to-speech abstraction
//!
//! The game uses this to produce the "AI" rendition of the player's words.

use crate::audio::AudioHandle;
use crate::Result;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Default synthesis voice (full service name)
pub const DEFAULT_VOICE: &str = "en-US-JennyNeural";

/// Short aliases for neural voices
///
/// Lets the config say `voice = jenny` instead of the full service
/// identifier. Unknown names pass through unchanged so any valid service
/// voice can still be configured directly.
pub static VOICES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("jenny", "en-US-JennyNeural");
    m.insert("guy", "en-US-GuyNeural");
    m.insert("aria", "en-US-AriaNeural");
    m.insert("davis", "en-US-DavisNeural");
    m.insert("jane", "en-US-JaneNeural");
    m.insert("sonia", "en-GB-SoniaNeural");
    m.insert("ryan", "en-GB-RyanNeural");
    m.insert("natasha", "en-AU-NatashaNeural");
    m
});

/// Resolve a configured voice name to the full service identifier
pub fn resolve_voice(name: &str) -> String {
    VOICES
        .get(name.to_lowercase().as_str())
        .map(|full| (*full).to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Text-to-speech trait
///
/// `Err` means the service canceled or failed; the round must not advance
/// and the caller surfaces a user-visible message.
pub trait Synthesizer {
    /// Synthesize `text` with the given voice, returning the rendered clip
    fn synthesize(&mut self, text: &str, voice: &str) -> Result<AudioHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_alias() {
        assert_eq!(resolve_voice("jenny"), "en-US-JennyNeural");
        assert_eq!(resolve_voice("Guy"), "en-US-GuyNeural");
    }

    #[test]
    fn test_resolve_full_name_passthrough() {
        assert_eq!(resolve_voice("de-DE-KatjaNeural"), "de-DE-KatjaNeural");
    }
}
