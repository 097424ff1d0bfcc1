//! Moving rectangles (ball and paddles)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Bounds;

/// A centre-positioned box with a movement speed.
///
/// `bounds` is cached and always matches `position`; go through
/// [`Body::set_position`] to move it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    size: Vec2,
    position: Vec2,
    /// Pixels per second
    pub speed: f32,
    bounds: Bounds,
}

impl Body {
    pub fn new(size: Vec2, position: Vec2, speed: f32) -> Self {
        Self {
            size,
            position,
            speed,
            bounds: Bounds::from_center(position, size),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.bounds = Bounds::from_center(position, self.size);
    }

    /// Move vertically by `dy`
    pub fn shift_y(&mut self, dy: f32) {
        self.set_position(Vec2::new(self.position.x, self.position.y + dy));
    }

    /// Top-left corner, where drawing starts
    pub fn screen_position(&self) -> Vec2 {
        self.bounds.min()
    }

    pub fn hits(&self, other: &Body) -> bool {
        self.bounds.overlaps(&other.bounds)
    }

    /// Snap back inside the court's top and bottom walls. x is untouched.
    ///
    /// Returns true if the body was moved.
    pub fn clamp_vertical(&mut self, court: &Bounds) -> bool {
        let half_h = self.size.y / 2.0;
        if self.bounds.top < court.top {
            self.set_position(Vec2::new(self.position.x, court.top + half_h));
            true
        } else if self.bounds.bottom > court.bottom {
            self.set_position(Vec2::new(self.position.x, court.bottom - half_h));
            true
        } else {
            false
        }
    }
}
