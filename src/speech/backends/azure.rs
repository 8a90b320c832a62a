//! Azure Speech REST backend
//!
//! Implements both [`Transcriber`] and [`Synthesizer`] against the Azure
//! Cognitive Services Speech REST API with synchronous, blocking requests:
//! - STT: the short-audio recognition endpoint, WAV in, JSON out
//! - TTS: the v1 synthesis endpoint, SSML in, riff mono PCM WAV out
//!
//! A `NoMatch` recognition result is reported as an empty transcription,
//! which the game treats as an invalid round rather than a failure.

use crate::audio::AudioHandle;
use crate::config::Config;
use crate::speech::{Synthesizer, Transcriber};
use crate::{Result, VoiceoffError};
use log::{debug, info, warn};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Request timeout for both endpoints
///
/// The game layer sets no timeout of its own; this is the HTTP client's
/// safety net so a dead connection can't hang the interactive loop forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response body of the short-audio recognition endpoint
#[derive(Debug, Deserialize)]
struct RecognitionResponse {
    #[serde(rename = "RecognitionStatus")]
    status: String,

    #[serde(rename = "DisplayText", default)]
    display_text: Option<String>,
}

/// Shared connection details for the Azure speech service
#[derive(Clone)]
struct ServiceAuth {
    key: String,
    region: String,
}

impl ServiceAuth {
    fn from_config(config: &Config) -> Result<Self> {
        let key = config.speech_key();
        let region = config.speech_region();
        if key.is_empty() || region.is_empty() {
            return Err(VoiceoffError::Config(
                "speech service key/region not configured \
                 (set [speech] key/region or SPEECH_KEY/SPEECH_REGION)"
                    .to_string(),
            ));
        }
        Ok(Self { key, region })
    }
}

/// Speech-to-text via the Azure short-audio endpoint
pub struct AzureTranscriber {
    client: reqwest::blocking::Client,
    auth: ServiceAuth,
    language: String,
}

impl AzureTranscriber {
    /// Create a transcriber from config (key, region, language)
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| VoiceoffError::Transcription(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            auth: ServiceAuth::from_config(config)?,
            language: config.speech_language(),
        })
    }
}

impl Transcriber for AzureTranscriber {
    fn transcribe(&mut self, audio: &AudioHandle) -> Result<String> {
        let bytes = std::fs::read(audio.path())?;
        debug!("Transcribing {:?} ({} bytes)", audio.path(), bytes.len());

        let url = format!(
            "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1?language={}",
            self.auth.region, self.language
        );

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", self.auth.key.as_str())
            .header("Content-Type", "audio/wav")
            .header("Accept", "application/json")
            .body(bytes)
            .send()
            .map_err(|e| VoiceoffError::Transcription(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(VoiceoffError::Transcription(format!(
                "Service returned {}",
                response.status()
            )));
        }

        let body: RecognitionResponse = response
            .json()
            .map_err(|e| VoiceoffError::Transcription(format!("Bad response body: {}", e)))?;

        if body.status == "Success" {
            let text = body.display_text.unwrap_or_default();
            info!("Recognized: '{}'", text);
            Ok(text)
        } else {
            // NoMatch, InitialSilenceTimeout, etc. are not service failures
            warn!("Recognition status: {}", body.status);
            Ok(String::new())
        }
    }
}

/// Text-to-speech via the Azure v1 synthesis endpoint
pub struct AzureSynthesizer {
    client: reqwest::blocking::Client,
    auth: ServiceAuth,
    /// Scratch directory for the rendered clip
    dir: PathBuf,
}

impl AzureSynthesizer {
    /// Create a synthesizer from config, writing output into `dir`
    pub fn from_config(config: &Config, dir: PathBuf) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| VoiceoffError::Synthesis(format!("HTTP client error: {}", e)))?;

        std::fs::create_dir_all(&dir)?;

        Ok(Self {
            client,
            auth: ServiceAuth::from_config(config)?,
            dir,
        })
    }

    /// Build the SSML request body for `text` spoken by `voice`
    fn ssml(text: &str, voice: &str) -> String {
        let escaped = text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        format!(
            "<speak version='1.0' xml:lang='en-US'>\
             <voice name='{}'>{}</voice>\
             </speak>",
            voice, escaped
        )
    }
}

impl Synthesizer for AzureSynthesizer {
    fn synthesize(&mut self, text: &str, voice: &str) -> Result<AudioHandle> {
        debug!("Synthesizing {} chars with voice {}", text.len(), voice);

        let url = format!(
            "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
            self.auth.region
        );

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", self.auth.key.as_str())
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", "riff-44100hz-16bit-mono-pcm")
            .body(Self::ssml(text, voice))
            .send()
            .map_err(|e| VoiceoffError::Synthesis(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(VoiceoffError::Synthesis(format!(
                "Service returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| VoiceoffError::Synthesis(format!("Failed to read audio: {}", e)))?;

        let path = self.dir.join("ai.wav");
        std::fs::write(&path, &bytes)?;
        info!("Synthesized clip saved to {:?} ({} bytes)", path, bytes.len());
        Ok(AudioHandle::new(path))
    }
}
