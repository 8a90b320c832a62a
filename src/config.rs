//! Configuration management

use crate::{Result, VoiceoffError};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Application configuration
///
/// Persistent settings for the speech service credentials, audio capture
/// parameters, and leaderboard location. Stored as an INI file at
/// `~/.voiceoff.cfg`, created with defaults on first run.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.voiceoff.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from the default location or create default
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from an explicit path or create default there
    pub fn load_from(path: PathBuf) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| VoiceoffError::Config(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| VoiceoffError::Config(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| VoiceoffError::Config(format!("Failed to save config: {}", e)))
    }

    /// Default config file path (~/.voiceoff.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".voiceoff.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("speech"))
            .set("key", "")
            .set("region", "")
            .set("voice", "jenny")
            .set("language", "en-US");

        ini.with_section(Some("audio"))
            .set("record_seconds", "5")
            .set("sample_rate", "44100")
            .set("scratch_dir", "temp_audio");

        ini.with_section(Some("leaderboard"))
            .set("path", "leaderboard.json");

        ini
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: u32) -> u32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    // Game-specific configuration getters

    /// Speech service subscription key
    ///
    /// The SPEECH_KEY environment variable overrides the config file, so the
    /// credential never has to be written to disk.
    pub fn speech_key(&self) -> String {
        std::env::var("SPEECH_KEY").unwrap_or_else(|_| self.get_string("speech", "key", ""))
    }

    /// Speech service region (e.g. "westeurope")
    pub fn speech_region(&self) -> String {
        std::env::var("SPEECH_REGION").unwrap_or_else(|_| self.get_string("speech", "region", ""))
    }

    /// Recognition language
    pub fn speech_language(&self) -> String {
        self.get_string("speech", "language", "en-US")
    }

    /// Synthesis voice (alias or full service name)
    pub fn voice(&self) -> String {
        self.get_string("speech", "voice", "jenny")
    }

    /// Mic recording duration in seconds
    pub fn record_seconds(&self) -> u32 {
        self.get_int("audio", "record_seconds", 5)
    }

    /// Mic recording sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.get_int("audio", "sample_rate", 44100)
    }

    /// Scratch directory for captured and synthesized audio
    pub fn scratch_dir(&self) -> PathBuf {
        PathBuf::from(self.get_string("audio", "scratch_dir", "temp_audio"))
    }

    /// Leaderboard file path
    pub fn leaderboard_path(&self) -> PathBuf {
        PathBuf::from(self.get_string("leaderboard", "path", "leaderboard.json"))
    }
}
