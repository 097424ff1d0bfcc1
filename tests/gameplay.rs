use glam::Vec2;

use pon_gopher::Settings;
use pon_gopher::consts::*;
use pon_gopher::headless::{self, RunLimits};
use pon_gopher::input::{Autopilot, InputSource, Key, KeyState};
use pon_gopher::renderer::AsciiRenderer;
use pon_gopher::scene::{Renderer, Scene};
use pon_gopher::sim::{GameEvent, GamePhase, GameState, Side, TickInput, tick};

fn start() -> TickInput {
    TickInput {
        start: true,
        ..Default::default()
    }
}

/// Tick `n` times with the same input, collecting every event
fn run_ticks(state: &mut GameState, input: TickInput, n: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..n {
        tick(state, &input, SIM_DT);
        events.extend(state.drain_events());
    }
    events
}

#[test]
fn test_straight_serve_rallies_indefinitely() {
    let mut state = GameState::new();
    tick(&mut state, &start(), SIM_DT);

    // Neither paddle moves off the ball's line, so every return is flat
    let events = run_ticks(&mut state, TickInput::default(), 2000);

    assert_eq!(state.phase, GamePhase::Playing);
    assert!(state.rally >= 20, "rally was {}", state.rally);
    assert_eq!(state.ball.position().y, PADDLE_Y);
    assert!(events.contains(&GameEvent::PaddleHit(Side::Player)));
    assert!(events.contains(&GameEvent::PaddleHit(Side::Ai)));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::BallOut(_))));
}

#[test]
fn test_dodging_player_loses_round() {
    let mut state = GameState::new();
    tick(&mut state, &start(), SIM_DT);

    let up = TickInput {
        up: true,
        ..Default::default()
    };
    let events = run_ticks(&mut state, up, 120);

    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(events.contains(&GameEvent::BallOut(Side::Player)));
    assert!(events.contains(&GameEvent::PhaseChanged {
        from: GamePhase::Playing,
        to: GamePhase::GameOver,
    }));
    // The paddle stops moving once the round is over
    let player_y = state.player.position().y;
    assert!(player_y < PADDLE_Y);
    run_ticks(&mut state, up, 10);
    assert_eq!(state.player.position().y, player_y);
    // The AI kept the ball centred on itself the whole time
    assert_eq!(state.ai.position().y, PADDLE_Y);

    let mut ascii = AsciiRenderer::default();
    ascii
        .render(&Scene::build(&state, &Settings::default()))
        .unwrap();
    let frame = ascii.frame();
    assert!(frame.contains("lol"));
    assert!(frame.contains("rally 0  best 0"));
}

#[test]
fn test_restart_skips_menu_and_resets_layout() {
    let mut state = GameState::new();
    tick(&mut state, &start(), SIM_DT);
    let up = TickInput {
        up: true,
        ..Default::default()
    };
    run_ticks(&mut state, up, 120);
    assert_eq!(state.phase, GamePhase::GameOver);
    let spun = state.mascot_rotation;
    assert!(spun > 0.0);

    tick(&mut state, &start(), SIM_DT);

    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.ball.position(), Vec2::new(120.0, 120.0));
    assert_eq!(state.ball_dir, Vec2::new(-1.0, 0.0));
    assert_eq!(state.player.position(), Vec2::new(32.0, 128.0));
    assert_eq!(state.ai.position(), Vec2::new(224.0, 128.0));
    assert_eq!(state.rally, 0);
    assert_eq!(state.mascot_rotation, spun);
}

#[test]
fn test_keyboard_session() {
    let mut state = GameState::new();
    let mut keys = KeyState::new();

    keys.press(Key::Start);
    let input = keys.poll(&state);
    tick(&mut state, &input, SIM_DT);
    assert_eq!(state.phase, GamePhase::Playing);

    // Start still held: later ticks see no new press
    keys.press(Key::Down);
    let input = keys.poll(&state);
    assert!(!input.start);
    assert!(input.down);
    tick(&mut state, &input, SIM_DT);
    assert!(state.player.position().y > PADDLE_Y);
}

#[test]
fn test_ball_stays_in_court_while_playing() {
    let mut state = GameState::new();
    tick(&mut state, &start(), SIM_DT);
    let mut pilot = Autopilot::new();

    for _ in 0..3000 {
        let input = pilot.poll(&state);
        tick(&mut state, &input, SIM_DT);
        if state.phase == GamePhase::Playing {
            let b = state.ball.bounds();
            assert!(b.top >= COURT_TOP - 1e-3 && b.bottom <= COURT_BOTTOM + 1e-3);
            assert!(b.left >= COURT_LEFT && b.right <= COURT_RIGHT);
            assert!((state.ball_dir.length() - 1.0).abs() < 1e-4);
            for paddle in [&state.player, &state.ai] {
                assert!(paddle.bounds().top >= COURT_TOP - 1e-3);
                assert!(paddle.bounds().bottom <= COURT_BOTTOM + 1e-3);
            }
        }
    }
}

#[test]
fn test_headless_autopilot_plays() {
    let mut state = GameState::new();
    let mut pilot = Autopilot::new();
    let mut ascii = AsciiRenderer::default();
    let limits = RunLimits {
        rounds: 1,
        max_frames: 600,
        display_hz: 60.0,
    };

    let summary = headless::run(
        &mut state,
        &mut pilot,
        &mut ascii,
        &Settings::default(),
        limits,
    );

    assert!(summary.frames <= 600);
    assert_ne!(summary.final_phase, "Menu");
    assert!(summary.player_returns >= 1);
    assert!(summary.ticks >= summary.frames as u64);
    assert!(!ascii.frame().is_empty());
}
