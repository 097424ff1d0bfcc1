//! Simulation tick
//!
//! Advances the game by one timestep: the Menu/Playing/GameOver switch,
//! player movement, the AI paddle, and the ball.

use glam::Vec2;

use super::ai;
use super::state::{GameEvent, GamePhase, GameState, Side};
use crate::consts::MASCOT_SPIN_SPEED;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move paddle up (held)
    pub up: bool,
    /// Move paddle down (held)
    pub down: bool,
    /// Start/restart (just pressed this frame)
    pub start: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.set_phase(GamePhase::Playing);
            }
        }
        GamePhase::Playing => {
            move_player(state, input, dt);
            let target_y = state.ball.position().y;
            let court = state.court;
            ai::track(&mut state.ai, target_y, dt, &court);
            move_ball(state, dt);
        }
        GamePhase::GameOver => {
            state.mascot_rotation += MASCOT_SPIN_SPEED * dt;
            if input.start {
                state.reset_round();
                state.set_phase(GamePhase::Playing);
            }
        }
    }
}

fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let step = state.player.speed * dt;
    if input.up {
        state.player.shift_y(-step);
    }
    if input.down {
        state.player.shift_y(step);
    }
    let court = state.court;
    state.player.clamp_vertical(&court);
}

fn move_ball(state: &mut GameState, dt: f32) {
    let court = state.court;
    let next = state.ball.position() + state.ball_dir * state.ball.speed * dt;
    state.ball.set_position(next);

    // Out the sides ends the round before any bounce is applied
    let bounds = *state.ball.bounds();
    let missed = if bounds.right > court.right {
        Some(Side::Ai)
    } else if bounds.left < court.left {
        Some(Side::Player)
    } else {
        None
    };
    if let Some(side) = missed {
        end_round(state, side);
        return;
    }

    let half_h = state.ball.size().y / 2.0;
    let x = state.ball.position().x;
    // Touching a wall counts as a bounce even when travelling along it
    if bounds.top <= court.top {
        state.ball.set_position(Vec2::new(x, court.top + half_h));
        state.ball_dir.y = state.ball_dir.y.abs();
        state.push_event(GameEvent::WallBounce);
    } else if bounds.bottom >= court.bottom {
        state.ball.set_position(Vec2::new(x, court.bottom - half_h));
        state.ball_dir.y = -state.ball_dir.y.abs();
        state.push_event(GameEvent::WallBounce);
    }

    let contact = if state.ball.hits(&state.player) {
        Some(Side::Player)
    } else if state.ball.hits(&state.ai) {
        Some(Side::Ai)
    } else {
        None
    };

    if let Some(side) = contact {
        state.ball_dir = reflect_off(state, side);
        if state.contact != Some(side) {
            state.rally += 1;
            log::debug!("{:?} paddle return, rally {}", side, state.rally);
            state.push_event(GameEvent::PaddleHit(side));
        }
    }
    state.contact = contact;
}

/// New direction after touching a paddle: straight out from the paddle's
/// centre through the ball's centre.
fn reflect_off(state: &GameState, side: Side) -> Vec2 {
    let offset = state.ball.position() - state.paddle(side).position();
    offset.try_normalize().unwrap_or(match side {
        Side::Player => Vec2::X,
        Side::Ai => Vec2::NEG_X,
    })
}

fn end_round(state: &mut GameState, missed: Side) {
    state.best_rally = state.best_rally.max(state.rally);
    state.contact = None;
    log::info!(
        "{:?} missed the ball after a rally of {} (best {})",
        missed,
        state.rally,
        state.best_rally
    );
    state.push_event(GameEvent::BallOut(missed));
    state.set_phase(GamePhase::GameOver);
}
