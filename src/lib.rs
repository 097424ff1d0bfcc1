//! Pon-Gopher - a single-screen Pong against an AI paddle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, AABB collision, AI, game state)
//! - `input`: Input sources feeding the simulation
//! - `scene`: Renderer-agnostic draw list built from game state
//! - `renderer`: WebGPU and ASCII backends that consume a scene
//! - `settings`: Player preferences (display only)
//! - `headless`: Windowless runner for the native binary and tests

pub mod clock;
pub mod error;
pub mod headless;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, StartupError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical screen size in pixels
    pub const SCREEN_WIDTH: f32 = 256.0;
    pub const SCREEN_HEIGHT: f32 = 256.0;

    /// Court walls, 16px in from each screen edge
    pub const COURT_LEFT: f32 = 16.0;
    pub const COURT_RIGHT: f32 = SCREEN_WIDTH - 16.0;
    pub const COURT_TOP: f32 = 16.0;
    pub const COURT_BOTTOM: f32 = SCREEN_HEIGHT - 16.0;

    /// Ball defaults
    pub const BALL_SIZE: Vec2 = Vec2::new(28.0, 24.0);
    pub const BALL_SPEED: f32 = 350.0;
    pub const BALL_SPAWN: Vec2 = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
    /// Restart position is offset from the spawn by half a mascot tile
    pub const BALL_RESTART: Vec2 = Vec2::new(SCREEN_WIDTH / 2.0 - 8.0, SCREEN_HEIGHT / 2.0 - 8.0);
    pub const BALL_SERVE_DIR: Vec2 = Vec2::new(-1.0, 0.0);

    /// Paddle defaults
    pub const PADDLE_SIZE: Vec2 = Vec2::new(16.0, 64.0);
    pub const PADDLE_SPEED: f32 = 250.0;
    pub const PLAYER_PADDLE_X: f32 = COURT_LEFT + 8.0 + 8.0;
    pub const AI_PADDLE_X: f32 = COURT_RIGHT - 8.0 - 8.0;
    pub const PADDLE_Y: f32 = SCREEN_HEIGHT / 2.0;

    /// Mascot spin on the game over screen (radians/sec)
    pub const MASCOT_SPIN_SPEED: f32 = 0.2;
    /// Mascot sprite is a square tile of this many pixels
    pub const MASCOT_TILE: f32 = 16.0;

    /// Window defaults
    pub const WINDOW_TITLE: &str = "Pon-go";
    pub const DEFAULT_WINDOW_SCALE: u32 = 2;
}
