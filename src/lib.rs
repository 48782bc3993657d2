//! Sky Catch - a catch-the-falling-objects arcade minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (session state machine, spawning, catches)
//! - `host`: Abstract collaborator contracts (UI, audio, scene, score sink)
//! - `tuning`: Data-driven game balance
//! - `settings`: Audio preferences
//! - `highscores`: Local leaderboard of finished sessions

pub mod highscores;
pub mod host;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::Leaderboard;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz is plenty for a catch game)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Vertical coordinate objects spawn at (world units)
    pub const SPAWN_HEIGHT: f32 = 6.0;
    /// Vertical coordinate of the catcher
    pub const CATCH_HEIGHT: f32 = -4.0;
    /// Objects below this are gone for good (missed, no penalty)
    pub const FLOOR_HEIGHT: f32 = -6.0;
    /// Half-width of the catch window around the catcher center
    pub const CATCH_HALF_WIDTH: f32 = 0.8;
    /// Radius of a falling object for overlap checks
    pub const OBJECT_RADIUS: f32 = 0.4;

    /// How long the remaining-lives message stays on screen (seconds)
    pub const MESSAGE_DURATION_SECS: f32 = 1.0;

    /// Identifier the score sink receives with the final score.
    /// Same value on win and loss.
    pub const GAME_ID: u32 = 8;
}
