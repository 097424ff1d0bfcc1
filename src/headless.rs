//! Headless game runner
//!
//! Drives the simulation from an [`InputSource`] at a simulated display rate,
//! handing each frame's scene to a [`Renderer`]. Used by the native binary
//! and by integration tests.

use serde::Serialize;

use crate::clock::FixedStep;
use crate::consts::SIM_DT;
use crate::input::InputSource;
use crate::scene::{Renderer, Scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Side, tick};

/// Limits for a headless run
#[derive(Debug, Clone, Copy)]
pub struct RunLimits {
    /// Stop after this many rounds have ended
    pub rounds: u32,
    /// Hard stop, in display frames
    pub max_frames: u32,
    /// Simulated display refresh rate
    pub display_hz: f32,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            rounds: 3,
            max_frames: 60 * 60 * 5,
            display_hz: 60.0,
        }
    }
}

/// What happened during a headless run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub frames: u32,
    pub ticks: u64,
    pub rounds: u32,
    pub player_returns: u32,
    pub ai_returns: u32,
    pub wall_bounces: u32,
    /// Rounds the player lost
    pub player_misses: u32,
    /// Rounds the AI lost
    pub ai_misses: u32,
    pub best_rally: u32,
    pub final_phase: String,
}

impl RunSummary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PaddleHit(Side::Player) => self.player_returns += 1,
            GameEvent::PaddleHit(Side::Ai) => self.ai_returns += 1,
            GameEvent::WallBounce => self.wall_bounces += 1,
            GameEvent::BallOut(side) => {
                self.rounds += 1;
                match side {
                    Side::Player => self.player_misses += 1,
                    Side::Ai => self.ai_misses += 1,
                }
            }
            GameEvent::PhaseChanged { .. } => {}
        }
    }
}

/// Run a game until `limits` are hit, rendering every display frame.
///
/// Rendering errors are logged and the run continues.
pub fn run<I, R>(
    state: &mut GameState,
    input: &mut I,
    renderer: &mut R,
    settings: &Settings,
    limits: RunLimits,
) -> RunSummary
where
    I: InputSource,
    R: Renderer,
    R::Error: std::fmt::Debug,
{
    let mut summary = RunSummary::default();
    let mut clock = FixedStep::new();
    let frame_dt = 1.0 / limits.display_hz.max(1.0);

    while summary.frames < limits.max_frames && summary.rounds < limits.rounds {
        for _ in 0..clock.advance(frame_dt) {
            let tick_input = input.poll(state);
            tick(state, &tick_input, SIM_DT);
            for event in state.drain_events() {
                log::trace!("{:?}", event);
                summary.record(&event);
            }
        }

        let scene = Scene::build(state, settings);
        if let Err(e) = renderer.render(&scene) {
            log::warn!("Render error: {:?}", e);
        }
        summary.frames += 1;
    }

    summary.ticks = state.time_ticks;
    summary.best_rally = state.best_rally;
    summary.final_phase = format!("{:?}", state.phase);
    if state.phase == GamePhase::Playing {
        log::info!("Run stopped mid-rally after {} frames", summary.frames);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Scripted;
    use crate::renderer::AsciiRenderer;

    #[test]
    fn test_idle_run_stays_on_menu() {
        let mut state = GameState::new();
        let mut input = Scripted::new(Vec::new());
        let mut ascii = AsciiRenderer::default();
        let limits = RunLimits {
            max_frames: 30,
            ..Default::default()
        };

        let summary = run(&mut state, &mut input, &mut ascii, &Settings::default(), limits);
        assert_eq!(summary.frames, 30);
        assert_eq!(summary.rounds, 0);
        assert_eq!(summary.final_phase, "Menu");
        assert!(ascii.frame().contains("Welcome to"));
    }
}
