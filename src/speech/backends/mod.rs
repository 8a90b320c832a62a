//! Speech service backends

// Azure Cognitive Services Speech REST backend (STT + TTS)
pub mod azure;
