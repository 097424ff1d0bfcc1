//! Paddle tracking policy
//!
//! The opponent moves straight toward the ball's height at up to its speed,
//! never overshooting.

use super::aabb::Bounds;
use super::body::Body;

/// Move `paddle` vertically toward `target_y`, then keep it inside the court.
pub fn track(paddle: &mut Body, target_y: f32, dt: f32, court: &Bounds) {
    let distance = (target_y - paddle.position().y).abs();
    let mut movement = (paddle.speed * dt).min(distance);

    if paddle.position().y > target_y {
        movement = -movement;
    }

    paddle.shift_y(movement);
    paddle.clamp_vertical(court);
}
