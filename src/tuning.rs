//! Data-driven game balance
//!
//! Every knob the session consults lives here so balance passes never touch
//! simulation code. Defaults mirror the shipped game; a JSON override file
//! can replace any subset of them.

use serde::{Deserialize, Serialize};

/// Balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Score needed to win
    pub max_score: u32,
    /// Score added per good catch
    pub score_increment: u32,
    /// Score deducted per bad catch
    pub score_decrement: u32,
    /// Bad catches that end the session
    pub max_mistakes: u32,
    /// Lives shown in the HUD (one removed per mistake)
    pub total_lives: u32,
    /// Horizontal half-extent of the playable area (world units)
    pub screen_bounds: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Fall-speed growth per second of play
    pub speed_increase_rate: f32,
    /// Fall speed at session start
    pub initial_fall_speed: f32,
    /// Number of fixed spawn lanes across the playable width
    pub spawn_lanes: usize,
    /// Number of player appearance stages
    pub sprite_stages: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_score: 100,
            score_increment: 10,
            score_decrement: 10,
            max_mistakes: 3,
            total_lives: 3,
            screen_bounds: 8.0,
            spawn_interval: 2.0,
            speed_increase_rate: 0.1,
            initial_fall_speed: 2.0,
            spawn_lanes: 5,
            sprite_stages: 4,
        }
    }
}

impl Tuning {
    /// Parse a JSON override; a malformed document falls back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Bad tuning JSON ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Load a tuning file, falling back to defaults when absent or invalid
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(_) => {
                log::info!("No tuning file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Clamp degenerate values that would wedge the session
    pub fn sanitized(mut self) -> Self {
        self.max_score = self.max_score.max(1);
        self.score_increment = self.score_increment.max(1);
        self.max_mistakes = self.max_mistakes.max(1);
        self.spawn_interval = self.spawn_interval.max(0.05);
        self.spawn_lanes = self.spawn_lanes.max(1);
        self.sprite_stages = self.sprite_stages.max(1);
        self.screen_bounds = self.screen_bounds.max(0.1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_game() {
        let t = Tuning::default();
        assert_eq!(t.max_score, 100);
        assert_eq!(t.score_increment, 10);
        assert_eq!(t.max_mistakes, 3);
        assert_eq!(t.total_lives, 3);
        assert_eq!(t.screen_bounds, 8.0);
        assert_eq!(t.spawn_interval, 2.0);
    }

    #[test]
    fn test_partial_json_override() {
        let t = Tuning::from_json(r#"{"max_score": 50, "spawn_lanes": 3}"#);
        assert_eq!(t.max_score, 50);
        assert_eq!(t.spawn_lanes, 3);
        // Everything else stays at defaults
        assert_eq!(t.score_increment, 10);
    }

    #[test]
    fn test_bad_json_falls_back() {
        let t = Tuning::from_json("not json");
        assert_eq!(t, Tuning::default());
    }

    #[test]
    fn test_sanitized_clamps_zeroes() {
        let t = Tuning {
            max_score: 0,
            score_increment: 0,
            max_mistakes: 0,
            spawn_interval: 0.0,
            spawn_lanes: 0,
            sprite_stages: 0,
            ..Tuning::default()
        }
        .sanitized();
        assert!(t.max_score >= 1);
        assert!(t.score_increment >= 1);
        assert!(t.max_mistakes >= 1);
        assert!(t.spawn_interval > 0.0);
        assert!(t.spawn_lanes >= 1);
        assert!(t.sprite_stages >= 1);
    }
}
