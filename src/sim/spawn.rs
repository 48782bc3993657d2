//! Spawn policy for falling collectibles
//!
//! Once per spawn interval while the session is Playing: pick one of the
//! fixed lanes uniformly at random, flip a fair coin for good/bad, and drop
//! the object at the session's current fall speed.

use glam::Vec2;
use rand::Rng;

use super::state::{CatchKind, FallingObject, GameSession, SessionPhase};
use crate::consts::SPAWN_HEIGHT;

/// Horizontal center of the given lane index
pub fn lane_x(lane: usize, lanes: usize, bounds: f32) -> f32 {
    debug_assert!(lane < lanes);
    if lanes == 1 {
        return 0.0;
    }
    // Lanes span the playable width evenly, endpoints included
    let t = lane as f32 / (lanes - 1) as f32;
    -bounds + t * 2.0 * bounds
}

/// Spawn a single object per the policy. No-op unless Playing.
pub fn spawn_object(session: &mut GameSession) {
    if session.phase != SessionPhase::Playing {
        return;
    }

    let lanes = session.tuning.spawn_lanes;
    let lane = session.rng.random_range(0..lanes);
    let kind = if session.rng.random::<f32>() > 0.5 {
        CatchKind::Good
    } else {
        CatchKind::Bad
    };

    let id = session.next_entity_id();
    let x = lane_x(lane, lanes, session.tuning.screen_bounds);
    session.objects.push(FallingObject {
        id,
        kind,
        pos: Vec2::new(x, SPAWN_HEIGHT),
        fall_speed: session.fall_speed,
    });
    log::debug!("Spawned {kind:?} object {id} in lane {lane}");
}
