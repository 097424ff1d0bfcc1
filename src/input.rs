//! Input sources feeding the simulation
//!
//! Frontends translate platform events into [`TickInput`]s. Keyboard state is
//! tracked by [`KeyState`]; [`Autopilot`] plays the player side for demos and
//! headless runs; [`Scripted`] replays a fixed sequence.

use crate::sim::{GamePhase, GameState, TickInput};

/// Anything that can produce the input for the next tick
pub trait InputSource {
    /// Input for the next tick. One-shot actions are consumed by this call.
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Start,
}

impl Key {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        match self {
            Key::Up => 0,
            Key::Down => 1,
            Key::Start => 2,
        }
    }

    /// Map a DOM `KeyboardEvent.code` (layout independent) to a game key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Key::Up),
            "KeyS" | "ArrowDown" => Some(Key::Down),
            "Space" | "Enter" => Some(Key::Start),
            _ => None,
        }
    }
}

/// Held/just-pressed tracking for keyboard input
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: [bool; Key::COUNT],
    pressed: [bool; Key::COUNT],
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Auto-repeat while held does not count as a new press.
    pub fn press(&mut self, key: Key) {
        let i = key.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held = [false; Key::COUNT];
        self.pressed = [false; Key::COUNT];
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Current input; clears just-pressed flags
    pub fn take_input(&mut self) -> TickInput {
        let input = TickInput {
            up: self.held[Key::Up.index()],
            down: self.held[Key::Down.index()],
            start: self.pressed[Key::Start.index()],
        };
        self.pressed = [false; Key::COUNT];
        input
    }
}

impl InputSource for KeyState {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        self.take_input()
    }
}

/// Ticks the autopilot waits on a menu/game over screen before pressing start
pub const AUTOPILOT_START_DELAY: u32 = 60;
/// Vertical slack before the autopilot bothers moving
pub const AUTOPILOT_DEADZONE: f32 = 4.0;
/// How far off the paddle centre the autopilot tries to meet the ball.
/// Off-centre hits put an angle on the return.
pub const AUTOPILOT_AIM: f32 = 12.0;

/// Demo player: chases the ball with the up/down keys and restarts on its own.
/// Alternates which half of the paddle it aims with on each return.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    waited: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        match state.phase {
            GamePhase::Menu | GamePhase::GameOver => {
                self.waited += 1;
                if self.waited >= AUTOPILOT_START_DELAY {
                    self.waited = 0;
                    log::debug!("Autopilot pressing start");
                    return TickInput {
                        start: true,
                        ..Default::default()
                    };
                }
                TickInput::default()
            }
            GamePhase::Playing => {
                self.waited = 0;
                let aim = if state.rally % 2 == 0 {
                    AUTOPILOT_AIM
                } else {
                    -AUTOPILOT_AIM
                };
                let dy = state.ball.position().y + aim - state.player.position().y;
                TickInput {
                    up: dy < -AUTOPILOT_DEADZONE,
                    down: dy > AUTOPILOT_DEADZONE,
                    start: false,
                }
            }
        }
    }
}

/// Replays a fixed list of inputs, then idles
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    inputs: Vec<TickInput>,
    cursor: usize,
}

impl Scripted {
    pub fn new(inputs: Vec<TickInput>) -> Self {
        Self { inputs, cursor: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.inputs.len()
    }
}

impl InputSource for Scripted {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        let input = self.inputs.get(self.cursor).copied().unwrap_or_default();
        self.cursor = (self.cursor + 1).min(self.inputs.len());
        input
    }
}
