//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Bounds;
use super::body::Body;
use crate::consts::*;

/// Current screen/phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active rally
    Playing,
    /// Ball left the court; waiting for start to play again
    GameOver,
}

/// Which paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Ai,
}

/// Something that happened during a tick, for logging and frontends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    PaddleHit(Side),
    WallBounce,
    /// The ball got past this side's paddle
    BallOut(Side),
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Playable area; the ball leaving it sideways ends the round
    pub court: Bounds,
    pub ball: Body,
    /// Unit direction of travel
    pub ball_dir: Vec2,
    pub player: Body,
    pub ai: Body,
    /// Game over mascot rotation (radians)
    pub mascot_rotation: f32,
    /// Paddle returns in the current round
    pub rally: u32,
    /// Longest rally this session
    pub best_rally: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Paddle the ball overlapped last tick, so a lingering touch counts once
    #[serde(default)]
    pub(crate) contact: Option<Side>,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            court: Bounds::new(COURT_LEFT, COURT_RIGHT, COURT_TOP, COURT_BOTTOM),
            ball: Body::new(BALL_SIZE, BALL_SPAWN, BALL_SPEED),
            ball_dir: BALL_SERVE_DIR,
            player: Body::new(PADDLE_SIZE, Vec2::new(PLAYER_PADDLE_X, PADDLE_Y), PADDLE_SPEED),
            ai: Body::new(PADDLE_SIZE, Vec2::new(AI_PADDLE_X, PADDLE_Y), PADDLE_SPEED),
            mascot_rotation: 0.0,
            rally: 0,
            best_rally: 0,
            time_ticks: 0,
            contact: None,
            events: Vec::new(),
        }
    }

    /// Put ball and paddles back for a new round
    pub fn reset_round(&mut self) {
        self.ball.set_position(BALL_RESTART);
        self.ball_dir = BALL_SERVE_DIR;
        self.player.set_position(Vec2::new(PLAYER_PADDLE_X, PADDLE_Y));
        self.ai.set_position(Vec2::new(AI_PADDLE_X, PADDLE_Y));
        self.rally = 0;
        self.contact = None;
    }

    pub fn paddle(&self, side: Side) -> &Body {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    /// Change phase, recording and logging the transition
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        log::info!("Phase {:?} -> {:?}", from, to);
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let state = GameState::new();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.ball.position(), Vec2::new(128.0, 128.0));
        assert_eq!(state.ball_dir, Vec2::new(-1.0, 0.0));
        assert_eq!(state.player.position(), Vec2::new(32.0, 128.0));
        assert_eq!(state.ai.position(), Vec2::new(224.0, 128.0));
        assert_eq!(state.court, Bounds::new(16.0, 240.0, 16.0, 240.0));
    }

    #[test]
    fn test_reset_round() {
        let mut state = GameState::new();
        state.ball.set_position(Vec2::new(10.0, 10.0));
        state.ball_dir = Vec2::new(0.6, 0.8);
        state.player.set_position(Vec2::new(32.0, 48.0));
        state.ai.set_position(Vec2::new(224.0, 200.0));
        state.rally = 7;
        state.best_rally = 7;
        state.mascot_rotation = 1.5;

        state.reset_round();

        assert_eq!(state.ball.position(), Vec2::new(120.0, 120.0));
        assert_eq!(state.ball_dir, Vec2::new(-1.0, 0.0));
        assert_eq!(state.player.position(), Vec2::new(32.0, 128.0));
        assert_eq!(state.ai.position(), Vec2::new(224.0, 128.0));
        assert_eq!(state.rally, 0);
        // Session stats and cosmetics survive the reset
        assert_eq!(state.best_rally, 7);
        assert_eq!(state.mascot_rotation, 1.5);
    }

    #[test]
    fn test_phase_events() {
        let mut state = GameState::new();
        state.set_phase(GamePhase::Menu);
        assert!(state.events().is_empty());

        state.set_phase(GamePhase::Playing);
        let events = state.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Menu,
                to: GamePhase::Playing
            }]
        );
        assert!(state.events().is_empty());
    }
}
