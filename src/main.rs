//! Sky Catch entry point
//!
//! Headless demo driver: loads tuning/settings, attaches logging host
//! adapters, and lets the demo AI play a session to completion. A real
//! front end would attach its own collaborators instead.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use sky_catch::consts::SIM_DT;
use sky_catch::host::{Host, LogAudio, LogUi, Panel, SceneLoader, ScoreSink, UiProjector};
use sky_catch::sim::{GameSession, SessionPhase, TickInput, tick};
use sky_catch::{Leaderboard, Settings, Tuning};

/// Scene adapter for the demo - there is no scene, so just say so
struct LogScene;

impl SceneLoader for LogScene {
    fn reload(&mut self) {
        log::info!("Scene: reloaded initial layout");
    }
}

/// Leaderboard kept on disk; every report persists immediately (best-effort)
struct FileBoard {
    board: Leaderboard,
    path: PathBuf,
}

impl ScoreSink for FileBoard {
    fn report(&mut self, final_score: u32, game_id: u32) {
        self.board.report(final_score, game_id);
        self.board.save(&self.path);
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Run one session to completion under the demo AI
fn run_session(session: &mut GameSession, host: &mut Host) {
    // Press start, then let the AI play
    let mut input = TickInput {
        start: true,
        auto_play: true,
        ..Default::default()
    };

    // Hard cap so a pathological tuning file cannot hang the demo
    let max_ticks = (3600.0 / SIM_DT) as u64;
    for _ in 0..max_ticks {
        tick(session, &input, SIM_DT);
        host.apply(session.drain_events());
        input.start = false;
        if session.phase.is_terminal() {
            break;
        }
    }

    match session.phase {
        SessionPhase::Won => log::info!("Demo session won with {} points", session.score),
        SessionPhase::Lost => log::info!("Demo session lost after {} mistakes", session.mistakes),
        _ => log::warn!("Demo session hit the tick cap without finishing"),
    }
}

fn main() {
    env_logger::init();
    log::info!("Sky Catch (headless demo) starting...");

    let settings = Settings::load(Path::new("settings.json"));
    let tuning = Tuning::load_or_default(Path::new("tuning.json"));
    let board_path = PathBuf::from("highscores.json");
    let board = Leaderboard::load(&board_path);

    let mut host = Host {
        ui: Some(Box::new(LogUi)),
        audio: Some(Box::new(LogAudio::new(settings))),
        scene: Some(Box::new(LogScene)),
        scores: Some(Box::new(FileBoard {
            board,
            path: board_path,
        })),
    };

    if let Some(ui) = &mut host.ui {
        ui.show_panel(Panel::Start);
    }

    let mut session = GameSession::new(time_seed(), tuning);
    run_session(&mut session, &mut host);

    // Exercise the restart path with a second session
    session.restart(time_seed().wrapping_add(1));
    host.apply(session.drain_events());
    run_session(&mut session, &mut host);
}
