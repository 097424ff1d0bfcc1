//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure:
//! - Caller-supplied timestep only
//! - No randomness
//! - No rendering or platform dependencies

pub mod aabb;
pub mod ai;
pub mod body;
pub mod state;
pub mod tick;

pub use aabb::Bounds;
pub use ai::track;
pub use body::Body;
pub use state::{GameEvent, GamePhase, GameState, Side};
pub use tick::{TickInput, tick};
