//! High score leaderboard system
//!
//! Persisted to LocalStorage on the web and to a JSON file natively; tracks
//! the top 10 runs.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::Session;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name
    pub name: String,
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub date: f64,
    /// Names of achievements unlocked at the time
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snakeHighScores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert an entry, keeping the list sorted and truncated.
    ///
    /// Ties go below existing entries with the same score.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let rank = self.potential_rank(entry.score)?;
        self.entries.insert(rank - 1, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Record the session's current run under `name`
    pub fn record(&mut self, name: &str, session: &Session, date: f64) -> Option<usize> {
        self.add(HighScoreEntry {
            name: name.to_string(),
            score: session.state.score,
            level: session.state.level,
            date,
            achievements: session.achievements.unlocked_names(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Restore ordering and size after loading data from outside
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Load from a JSON file, falling back to an empty board
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No high scores at {} ({}), starting fresh", path.display(), e);
                return Self::new();
            }
        };
        match serde_json::from_str::<HighScores>(&json) {
            Ok(mut scores) => {
                scores.normalize();
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Ignoring corrupt high scores at {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Write to a JSON file
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(mut scores) = serde_json::from_str::<HighScores>(&json) {
                    scores.normalize();
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }
}
