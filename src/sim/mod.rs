//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep friendly
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod spawn;
pub mod state;
pub mod tick;

pub use spawn::{lane_x, spawn_object};
pub use state::{
    CatchKind, Catcher, FallingObject, GameSession, SessionEvent, SessionPhase, SoundCue,
};
pub use tick::{TickInput, tick};
