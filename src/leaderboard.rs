//! Leaderboard persistence
//!
//! Append-only score history backed by a single JSON file: an array of
//! `{ "name", "correct", "total" }` objects in append order. The file is
//! read and rewritten whole on every append; an absent, empty, or corrupt
//! file is treated as an empty list, so a damaged leaderboard silently
//! restarts from scratch rather than blocking the game.

use crate::{Result, VoiceoffError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One persisted score record
///
/// Captures a player's cumulative session score at the moment a guess was
/// submitted, not a per-round delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player name (non-empty)
    pub name: String,

    /// Cumulative correct guesses at submission time
    pub correct: u32,

    /// Cumulative rounds played at submission time (>= correct)
    pub total: u32,
}

/// File-backed leaderboard store
pub struct LeaderboardStore {
    /// Path to the JSON file
    path: PathBuf,
}

impl LeaderboardStore {
    /// Create a store backed by the given file (not created until first append)
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, preserving all prior entries
    ///
    /// Corrupt existing content is discarded and overwritten; only the name
    /// being empty or the write itself failing can error.
    pub fn append(&self, name: &str, correct: u32, total: u32) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VoiceoffError::Input("player name must not be empty".to_string()));
        }

        let mut entries = self.read_all();
        entries.push(ScoreEntry {
            name: name.to_string(),
            correct,
            total,
        });

        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, json)?;
        info!("Appended score for '{}' ({}/{})", name, correct, total);
        Ok(())
    }

    /// Read all entries in append order
    ///
    /// Never fails: an absent, empty, or unparseable file yields an empty
    /// list.
    pub fn read_all(&self) -> Vec<ScoreEntry> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Leaderboard file {:?} not readable: {}", self.path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Leaderboard file {:?} is corrupt, treating as empty: {}", self.path, e);
                Vec::new()
            }
        }
    }

    /// Replace contents with an empty list (idempotent)
    pub fn clear(&self) -> Result<()> {
        std::fs::write(&self.path, "[]")?;
        info!("Leaderboard cleared");
        Ok(())
    }
}
