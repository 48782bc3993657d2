//! Per-frame session update
//!
//! Advances the session deterministically: speed ramp, pointer projection,
//! spawn cadence, object motion, catch detection, message timeout. All
//! effect requests land on the session's event queue for the host to drain.

use super::spawn::spawn_object;
use super::state::{GameSession, SessionEvent, SessionPhase};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Current pointer position on the horizontal axis (world units)
    pub pointer_x: Option<f32>,
    /// Press of the start control
    pub start: bool,
    /// Press of the restart control (honored only after win/lose)
    pub restart: bool,
    /// Seed for the fresh session a restart creates
    pub restart_seed: u64,
    /// Idle/demo mode - AI steers the catcher
    pub auto_play: bool,
}

/// Advance the session by one timestep
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    if input.start {
        session.start();
    }
    if input.restart {
        session.restart(input.restart_seed);
    }

    // The transient message hides on schedule even if the session ended
    // while it was showing; the hide is a timer, not gameplay
    if session.message_timer > 0.0 {
        session.message_timer -= dt;
        if session.message_timer <= 0.0 {
            session.message_timer = 0.0;
            session.events.push(SessionEvent::HideMessage);
        }
    }

    if session.phase != SessionPhase::Playing {
        return;
    }

    session.time_ticks += 1;

    // Objects get faster the longer the session runs
    session.fall_speed += session.tuning.speed_increase_rate * dt;

    // Catcher follows the pointer, clamped to the playable width
    let pointer_x = if input.auto_play {
        Some(auto_target(session))
    } else {
        input.pointer_x
    };
    if let Some(x) = pointer_x {
        session
            .catcher
            .follow_pointer(x, session.tuning.screen_bounds);
    }

    // Spawn cadence
    session.spawn_timer -= dt;
    while session.spawn_timer <= 0.0 {
        spawn_object(session);
        session.spawn_timer += session.tuning.spawn_interval;
    }

    advance_objects(session, dt);
}

/// Move objects down, route catches, cull misses
fn advance_objects(session: &mut GameSession, dt: f32) {
    for obj in &mut session.objects {
        obj.fall(dt);
    }

    // Collect ids first - the collect handlers need &mut session
    let catcher_x = session.catcher.x;
    let caught: Vec<(u32, super::state::CatchKind)> = session
        .objects
        .iter()
        .filter(|o| o.overlaps_catcher(catcher_x))
        .map(|o| (o.id, o.kind))
        .collect();

    for (id, kind) in caught {
        session.objects.retain(|o| o.id != id);
        match kind {
            super::state::CatchKind::Good => session.collect_good(),
            super::state::CatchKind::Bad => session.collect_bad(),
        }
    }

    // Missed objects vanish below the floor, no penalty
    session.objects.retain(|o| o.pos.y > FLOOR_HEIGHT);
}

/// Demo-mode steering: chase the nearest good object, shy away from bad
/// ones near the catch line.
fn auto_target(session: &GameSession) -> f32 {
    use super::state::CatchKind;

    let nearest_good = session
        .objects
        .iter()
        .filter(|o| o.kind == CatchKind::Good)
        .min_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = nearest_good else {
        // Nothing worth catching - drift home and stay clear of bad drops
        return 0.0;
    };

    let mut x = target.pos.x;
    let danger = session.objects.iter().any(|o| {
        o.kind == CatchKind::Bad
            && o.pos.y < CATCH_HEIGHT + 2.0
            && (o.pos.x - x).abs() < CATCH_HALF_WIDTH * 2.0
    });
    if danger {
        // Sidestep until the bad object has passed
        x += CATCH_HALF_WIDTH * 4.0;
    }
    x
}
