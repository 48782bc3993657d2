//! Host collaborator contracts
//!
//! The simulation never talks to a screen, a speaker, or a network. It emits
//! [`SessionEvent`]s; the host attaches whichever collaborators it has and
//! [`Host::apply`] maps events onto them. A missing collaborator means that
//! feature is disabled, never an error.

use crate::sim::{SessionEvent, SoundCue};

/// On-screen panels the UI can show or hide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Start,
    Win,
    Lose,
}

/// Projection surface for everything the player sees
pub trait UiProjector {
    /// Score for the progress display (slider/bar filling toward `max`)
    fn set_score(&mut self, score: u32, max: u32);
    /// Toggle life indicators so `remaining` of `total` are lit
    fn set_lives(&mut self, remaining: u32, total: u32);
    /// Player appearance stage changed
    fn set_sprite_stage(&mut self, stage: usize);
    /// Show the transient text message
    fn show_message(&mut self, text: &str);
    /// Hide the transient text message
    fn hide_message(&mut self);
    fn show_panel(&mut self, panel: Panel);
    fn hide_panel(&mut self, panel: Panel);
    /// Make the restart control usable
    fn enable_restart(&mut self);
}

/// Fire-and-forget sound playback
pub trait AudioPlayer {
    fn play(&mut self, cue: SoundCue);
}

/// Scene reset on restart
pub trait SceneLoader {
    fn reload(&mut self);
}

/// Final-score delivery at session end. Best-effort: a failed report is
/// dropped, there is no retry.
pub trait ScoreSink {
    fn report(&mut self, final_score: u32, game_id: u32);
}

/// The bundle of attached collaborators
#[derive(Default)]
pub struct Host {
    pub ui: Option<Box<dyn UiProjector>>,
    pub audio: Option<Box<dyn AudioPlayer>>,
    pub scene: Option<Box<dyn SceneLoader>>,
    pub scores: Option<Box<dyn ScoreSink>>,
}

impl Host {
    /// Map drained session events onto the attached collaborators
    pub fn apply(&mut self, events: impl IntoIterator<Item = SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::Started => {
                    if let Some(ui) = &mut self.ui {
                        ui.hide_panel(Panel::Start);
                    }
                }
                SessionEvent::ScoreChanged { score, max } => {
                    if let Some(ui) = &mut self.ui {
                        ui.set_score(score, max);
                    }
                }
                SessionEvent::LivesChanged { remaining, total } => {
                    if let Some(ui) = &mut self.ui {
                        ui.set_lives(remaining, total);
                    }
                }
                SessionEvent::SpriteAdvanced { stage } => {
                    if let Some(ui) = &mut self.ui {
                        ui.set_sprite_stage(stage);
                    }
                }
                SessionEvent::Sound(cue) => {
                    if let Some(audio) = &mut self.audio {
                        audio.play(cue);
                    }
                }
                SessionEvent::ShowMessage { text } => {
                    if let Some(ui) = &mut self.ui {
                        ui.show_message(&text);
                    }
                }
                SessionEvent::HideMessage => {
                    if let Some(ui) = &mut self.ui {
                        ui.hide_message();
                    }
                }
                SessionEvent::Won => {
                    if let Some(ui) = &mut self.ui {
                        ui.show_panel(Panel::Win);
                    }
                }
                SessionEvent::Lost => {
                    if let Some(ui) = &mut self.ui {
                        ui.show_panel(Panel::Lose);
                    }
                }
                SessionEvent::ReportScore { score, game_id } => {
                    if let Some(scores) = &mut self.scores {
                        scores.report(score, game_id);
                    }
                }
                SessionEvent::EnableRestart => {
                    if let Some(ui) = &mut self.ui {
                        ui.enable_restart();
                    }
                }
                SessionEvent::ReloadScene => {
                    if let Some(scene) = &mut self.scene {
                        scene.reload();
                    }
                }
            }
        }
    }
}

/// UI adapter that narrates to the log - used by the headless demo driver
#[derive(Default)]
pub struct LogUi;

impl UiProjector for LogUi {
    fn set_score(&mut self, score: u32, max: u32) {
        log::info!("UI: score {score}/{max}");
    }
    fn set_lives(&mut self, remaining: u32, total: u32) {
        log::info!("UI: lives {remaining}/{total}");
    }
    fn set_sprite_stage(&mut self, stage: usize) {
        log::debug!("UI: sprite stage {stage}");
    }
    fn show_message(&mut self, text: &str) {
        log::info!("UI: message \"{text}\"");
    }
    fn hide_message(&mut self) {
        log::debug!("UI: message hidden");
    }
    fn show_panel(&mut self, panel: Panel) {
        log::info!("UI: show {panel:?} panel");
    }
    fn hide_panel(&mut self, panel: Panel) {
        log::info!("UI: hide {panel:?} panel");
    }
    fn enable_restart(&mut self) {
        log::info!("UI: restart enabled");
    }
}

/// Audio adapter that narrates to the log, honoring the volume settings
pub struct LogAudio {
    settings: crate::settings::Settings,
}

impl LogAudio {
    pub fn new(settings: crate::settings::Settings) -> Self {
        Self { settings }
    }
}

impl AudioPlayer for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        let vol = self.settings.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::info!("Audio: {cue:?} at volume {vol:.2}");
    }
}
