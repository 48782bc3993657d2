//! Session state and core simulation types
//!
//! All state that must survive a frame lives here. The session is a small
//! state machine: NotStarted -> Playing -> Won | Lost, with a fresh instance
//! per play session.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting on the start control; nothing spawns, nothing moves
    NotStarted,
    /// Active gameplay
    Playing,
    /// Session ended at max score
    Won,
    /// Session ended at max mistakes
    Lost,
}

impl SessionPhase {
    /// Won or Lost - no further state changes until restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Won | SessionPhase::Lost)
    }
}

/// Kind of a falling collectible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatchKind {
    /// Worth points when caught
    Good,
    /// Costs a life when caught
    Bad,
}

/// A falling collectible entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub kind: CatchKind,
    pub pos: Vec2,
    /// Downward speed in world units per second, fixed at spawn time
    pub fall_speed: f32,
}

impl FallingObject {
    /// Advance the object straight down
    pub fn fall(&mut self, dt: f32) {
        self.pos.y -= self.fall_speed * dt;
    }

    /// Whether the object overlaps the catch window at the given catcher x
    pub fn overlaps_catcher(&self, catcher_x: f32) -> bool {
        self.pos.y <= CATCH_HEIGHT
            && (self.pos.x - catcher_x).abs() <= CATCH_HALF_WIDTH + OBJECT_RADIUS
    }
}

/// The player's catcher - follows the pointer on the horizontal axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catcher {
    /// Horizontal position, clamped to the screen bounds
    pub x: f32,
}

impl Default for Catcher {
    fn default() -> Self {
        Self { x: 0.0 }
    }
}

impl Catcher {
    /// Project a pointer position onto the catcher, clamped to bounds
    pub fn follow_pointer(&mut self, pointer_x: f32, bounds: f32) {
        self.x = pointer_x.clamp(-bounds, bounds);
    }
}

/// Effect requests emitted by the session and drained by the host.
///
/// Every variant is fire-and-forget; the host maps them onto whichever
/// collaborators are attached and silently skips the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Session left NotStarted; hide the start panel
    Started,
    /// Score changed; update the progress display
    ScoreChanged { score: u32, max: u32 },
    /// A life was lost; toggle indicators to show `remaining` of `total`
    LivesChanged { remaining: u32, total: u32 },
    /// Player appearance advanced to the given stage
    SpriteAdvanced { stage: usize },
    /// Play a named sound cue
    Sound(SoundCue),
    /// Show the transient remaining-lives message
    ShowMessage { text: String },
    /// Hide the transient message (fires after the display duration elapses)
    HideMessage,
    /// Session won; show the win panel
    Won,
    /// Session lost; show the lose panel
    Lost,
    /// Report the final score to the score sink
    ReportScore { score: u32, game_id: u32 },
    /// Enable the restart control
    EnableRestart,
    /// Reload the scene's initial layout
    ReloadScene,
}

/// Named sound cues, resolved to actual clips by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Good object caught
    Point,
    /// Bad object caught
    PointLoss,
    /// Session won
    Win,
    /// Session lost
    Lose,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Balance values this session was created with
    pub tuning: Tuning,
    /// Current phase
    pub phase: SessionPhase,
    /// Current score, always in [0, tuning.max_score]
    pub score: u32,
    /// Remaining lives, always in [0, tuning.total_lives]
    pub lives: u32,
    /// Bad catches so far; session is lost when this reaches max_mistakes
    pub mistakes: u32,
    /// Current fall speed for newly spawned objects; only ever ramps up
    pub fall_speed: f32,
    /// Player appearance stage, saturates at tuning.sprite_stages - 1
    pub sprite_stage: usize,
    /// The player's catcher
    pub catcher: Catcher,
    /// Live falling objects (sorted by id for determinism)
    pub objects: Vec<FallingObject>,
    /// Seconds until the next spawn
    pub spawn_timer: f32,
    /// Seconds the transient message stays visible; 0 when hidden
    pub message_timer: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// RNG for lane choice and the good/bad coin flip
    #[serde(skip, default = "detached_rng")]
    pub rng: Pcg32,
    /// Pending effect requests, drained by the host each frame
    #[serde(skip)]
    pub events: Vec<SessionEvent>,
    /// Next entity ID
    next_id: u32,
}

fn detached_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameSession {
    /// Create a fresh session in NotStarted. The tuning is sanitized here
    /// so a degenerate override file cannot wedge the spawn loop.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let lives = tuning.total_lives;
        let fall_speed = tuning.initial_fall_speed;
        Self {
            seed,
            tuning,
            phase: SessionPhase::NotStarted,
            score: 0,
            lives,
            mistakes: 0,
            fall_speed,
            sprite_stage: 0,
            catcher: Catcher::default(),
            objects: Vec::new(),
            spawn_timer: 0.0,
            message_timer: 0.0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all pending effect requests, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin the session. No-op unless the phase is NotStarted.
    pub fn start(&mut self) {
        if self.phase != SessionPhase::NotStarted {
            return;
        }
        self.phase = SessionPhase::Playing;
        // First spawn fires immediately, like InvokeRepeating with zero delay
        self.spawn_timer = 0.0;
        self.events.push(SessionEvent::Started);
        log::info!("Session started (seed {})", self.seed);
    }

    /// A good object was caught. No-op unless Playing.
    pub fn collect_good(&mut self) {
        if self.phase != SessionPhase::Playing {
            return;
        }

        self.score = (self.score + self.tuning.score_increment).min(self.tuning.max_score);
        self.events.push(SessionEvent::ScoreChanged {
            score: self.score,
            max: self.tuning.max_score,
        });
        self.events.push(SessionEvent::Sound(SoundCue::Point));

        // Appearance upgrades with each catch, saturating at the last stage
        if self.sprite_stage + 1 < self.tuning.sprite_stages {
            self.sprite_stage += 1;
            self.events.push(SessionEvent::SpriteAdvanced {
                stage: self.sprite_stage,
            });
        }

        if self.score == self.tuning.max_score {
            self.win();
        }
    }

    /// A bad object was caught. No-op unless Playing.
    pub fn collect_bad(&mut self) {
        if self.phase != SessionPhase::Playing {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        self.mistakes += 1;
        self.score = self.score.saturating_sub(self.tuning.score_decrement);

        self.events.push(SessionEvent::ScoreChanged {
            score: self.score,
            max: self.tuning.max_score,
        });
        self.events.push(SessionEvent::LivesChanged {
            remaining: self.lives,
            total: self.tuning.total_lives,
        });
        self.events.push(SessionEvent::Sound(SoundCue::PointLoss));

        // Transient message, hidden again once the timer runs out
        let text = if self.lives > 0 {
            format!("You have {} lives left!", self.lives)
        } else {
            "This is your last life!".to_string()
        };
        self.message_timer = MESSAGE_DURATION_SECS;
        self.events.push(SessionEvent::ShowMessage { text });

        if self.mistakes == self.tuning.max_mistakes {
            self.lose();
        }
    }

    /// Replace this session with a fresh one. No-op unless Won or Lost.
    pub fn restart(&mut self, seed: u64) {
        if !self.phase.is_terminal() {
            return;
        }
        let tuning = self.tuning.clone();
        *self = GameSession::new(seed, tuning);
        self.events.push(SessionEvent::ReloadScene);
        log::info!("Session restarted (seed {})", seed);
    }

    fn win(&mut self) {
        self.phase = SessionPhase::Won;
        log::info!("Session won with score {}", self.score);
        self.events.push(SessionEvent::Won);
        self.events.push(SessionEvent::Sound(SoundCue::Win));
        self.events.push(SessionEvent::ReportScore {
            score: self.score,
            game_id: GAME_ID,
        });
        self.events.push(SessionEvent::EnableRestart);
    }

    fn lose(&mut self) {
        self.phase = SessionPhase::Lost;
        log::info!("Session lost with score {}", self.score);
        self.events.push(SessionEvent::Lost);
        self.events.push(SessionEvent::Sound(SoundCue::Lose));
        self.events.push(SessionEvent::ReportScore {
            score: self.score,
            game_id: GAME_ID,
        });
        self.events.push(SessionEvent::EnableRestart);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn playing_session() -> GameSession {
        let mut s = GameSession::new(7, Tuning::default());
        s.start();
        s.drain_events();
        s
    }

    #[test]
    fn test_start_only_from_not_started() {
        let mut s = GameSession::new(1, Tuning::default());
        assert_eq!(s.phase, SessionPhase::NotStarted);
        s.start();
        assert_eq!(s.phase, SessionPhase::Playing);

        // Second start is ignored
        let before = s.drain_events();
        assert!(before.contains(&SessionEvent::Started));
        s.start();
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_collect_before_start_is_noop() {
        let mut s = GameSession::new(1, Tuning::default());
        s.collect_good();
        s.collect_bad();
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, s.tuning.total_lives);
        assert_eq!(s.mistakes, 0);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_ten_good_catches_win() {
        // max_score=100, score_increment=10 -> exactly 10 catches
        let mut s = playing_session();
        for _ in 0..9 {
            s.collect_good();
            assert_eq!(s.phase, SessionPhase::Playing);
        }
        s.collect_good();
        assert_eq!(s.score, 100);
        assert_eq!(s.phase, SessionPhase::Won);

        let events = s.drain_events();
        assert!(events.contains(&SessionEvent::Won));
        assert!(events.contains(&SessionEvent::Sound(SoundCue::Win)));
        assert!(events.contains(&SessionEvent::ReportScore {
            score: 100,
            game_id: crate::consts::GAME_ID
        }));
        assert!(events.contains(&SessionEvent::EnableRestart));
    }

    #[test]
    fn test_three_mistakes_lose_regardless_of_score() {
        let mut s = playing_session();
        for _ in 0..5 {
            s.collect_good();
        }
        s.collect_bad();
        s.collect_bad();
        assert_eq!(s.phase, SessionPhase::Playing);
        s.collect_bad();
        assert_eq!(s.phase, SessionPhase::Lost);
        assert_eq!(s.mistakes, 3);

        let events = s.drain_events();
        assert!(events.contains(&SessionEvent::Lost));
        assert!(events.contains(&SessionEvent::Sound(SoundCue::Lose)));
        assert!(events.contains(&SessionEvent::EnableRestart));
    }

    #[test]
    fn test_lives_message_text() {
        let mut s = playing_session();
        s.collect_bad();
        let events = s.drain_events();
        assert!(events.contains(&SessionEvent::ShowMessage {
            text: "You have 2 lives left!".to_string()
        }));

        s.collect_bad();
        let events = s.drain_events();
        assert!(events.contains(&SessionEvent::ShowMessage {
            text: "You have 1 lives left!".to_string()
        }));

        s.collect_bad();
        assert_eq!(s.phase, SessionPhase::Lost);
    }

    #[test]
    fn test_score_floor_at_zero() {
        let mut s = playing_session();
        s.collect_bad();
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, 2);
    }

    #[test]
    fn test_terminal_absorbs_collects() {
        let mut s = playing_session();
        for _ in 0..3 {
            s.collect_bad();
        }
        assert_eq!(s.phase, SessionPhase::Lost);
        s.drain_events();

        s.collect_good();
        s.collect_bad();
        assert_eq!(s.phase, SessionPhase::Lost);
        assert_eq!(s.score, 0);
        assert_eq!(s.mistakes, 3);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_sprite_stage_saturates() {
        let mut s = playing_session();
        let last = s.tuning.sprite_stages - 1;
        for _ in 0..s.tuning.sprite_stages + 3 {
            s.collect_good();
            if s.phase != SessionPhase::Playing {
                break;
            }
        }
        assert!(s.sprite_stage <= last);
    }

    #[test]
    fn test_degenerate_tuning_sanitized_on_construction() {
        // A zeroed spawn interval would make the spawn loop run forever;
        // the session must clamp it no matter where the tuning came from
        let tuning = Tuning {
            spawn_interval: 0.0,
            spawn_lanes: 0,
            max_score: 0,
            ..Tuning::default()
        };
        let s = GameSession::new(1, tuning);
        assert!(s.tuning.spawn_interval > 0.0);
        assert!(s.tuning.spawn_lanes >= 1);
        assert!(s.tuning.max_score >= 1);
    }

    #[test]
    fn test_restart_only_from_terminal() {
        let mut s = playing_session();
        s.collect_good();
        s.restart(99);
        // Still the same session - restart ignored mid-play
        assert_eq!(s.phase, SessionPhase::Playing);
        assert_eq!(s.score, 10);

        for _ in 0..3 {
            s.collect_bad();
        }
        assert_eq!(s.phase, SessionPhase::Lost);
        s.restart(99);
        assert_eq!(s.phase, SessionPhase::NotStarted);
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, s.tuning.total_lives);
        assert_eq!(s.mistakes, 0);
        assert_eq!(s.seed, 99);
        assert!(s.drain_events().contains(&SessionEvent::ReloadScene));
    }

    proptest! {
        /// Score stays in [0, max_score] and lives in [0, total_lives] for
        /// any interleaving of good and bad catches.
        #[test]
        fn prop_bounds_hold(ops in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut s = playing_session();
            for good in ops {
                if good {
                    s.collect_good();
                } else {
                    s.collect_bad();
                }
                prop_assert!(s.score <= s.tuning.max_score);
                prop_assert!(s.lives <= s.tuning.total_lives);
                prop_assert!(s.mistakes <= s.tuning.max_mistakes);
            }
        }

        /// A terminal phase is only ever reached by its own condition:
        /// Won iff score hit max, Lost iff mistakes hit max.
        #[test]
        fn prop_terminal_matches_condition(ops in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut s = playing_session();
            for good in ops {
                if good {
                    s.collect_good();
                } else {
                    s.collect_bad();
                }
            }
            match s.phase {
                SessionPhase::Won => prop_assert_eq!(s.score, s.tuning.max_score),
                SessionPhase::Lost => prop_assert_eq!(s.mistakes, s.tuning.max_mistakes),
                SessionPhase::Playing => {
                    prop_assert!(s.score < s.tuning.max_score);
                    prop_assert!(s.mistakes < s.tuning.max_mistakes);
                }
                SessionPhase::NotStarted => prop_assert!(false, "session was started"),
            }
        }
    }
}
