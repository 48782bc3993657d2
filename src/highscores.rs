//! Local leaderboard of finished sessions
//!
//! Persisted as JSON, tracks the top 10 final scores. Also usable as the
//! session's score sink, so finished games land here without extra wiring.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::host::ScoreSink;

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Final score of the session
    pub score: u32,
    /// Identifier the session reported alongside the score
    pub game_id: u32,
}

/// Leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the board
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a score (if it qualifies). Returns the 1-indexed rank achieved.
    pub fn add_score(&mut self, score: u32, game_id: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = ScoreEntry { score, game_id };
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard, empty when absent or invalid
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Leaderboard>(&json) {
                Ok(board) => {
                    log::info!("Loaded {} leaderboard entries", board.entries.len());
                    board
                }
                Err(e) => {
                    log::warn!("Bad leaderboard file ({e}), starting fresh");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No leaderboard found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save the leaderboard; failures are logged and dropped
    pub fn save(&self, path: &Path) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Could not save leaderboard: {e}");
                } else {
                    log::info!("Leaderboard saved ({} entries)", self.entries.len());
                }
            }
            Err(e) => log::warn!("Could not serialize leaderboard: {e}"),
        }
    }
}

impl ScoreSink for Leaderboard {
    fn report(&mut self, final_score: u32, game_id: u32) {
        match self.add_score(final_score, game_id) {
            Some(rank) => log::info!("Final score {final_score} ranked #{rank}"),
            None => log::info!("Final score {final_score} did not place"),
        }
    }
}
