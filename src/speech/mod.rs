//! Speech service abstractions

pub mod backends;
pub mod synth;
pub mod transcribe;

pub use synth::{resolve_voice, Synthesizer, DEFAULT_VOICE, VOICES};
pub use transcribe::Transcriber;
