//! Shape generation for 2D primitives
//!
//! Everything here works in logical screen pixels; the pipeline maps to NDC.

use glam::Vec2;

use super::vertex::Vertex;
use crate::consts::MASCOT_TILE;
use crate::scene::{Color, DrawCmd, Scene, mascot_pixels};

/// Width of `DrawCmd::Line` strokes in logical pixels
pub const LINE_WIDTH: f32 = 1.0;

/// Two triangles covering a quad given in winding order
fn push_quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], color: Color) {
    let [a, b, c, d] = corners;
    for p in [a, b, c, c, d, a] {
        vertices.push(Vertex::new(p.x, p.y, color));
    }
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: Color) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    let max = min + size;
    push_quad(
        &mut vertices,
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
        color,
    );
    vertices
}

/// Generate vertices for a stroked line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    // Extend the ends so box corners meet cleanly
    let from = from - dir * (width / 2.0);
    let to = to + dir * (width / 2.0);

    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [from + perp, to + perp, to - perp, from - perp],
        color,
    );
    vertices
}

/// Generate vertices for the mascot sprite, one quad per opaque pixel,
/// scaled and rotated about the sprite centre
pub fn mascot(center: Vec2, scale: f32, rotation: f32) -> Vec<Vertex> {
    let rot = Vec2::from_angle(rotation);
    let half = MASCOT_TILE / 2.0;
    let mut vertices = Vec::new();

    for (col, row, color) in mascot_pixels() {
        let local = Vec2::new(col as f32 - half, row as f32 - half);
        let corners = [
            local,
            local + Vec2::X,
            local + Vec2::ONE,
            local + Vec2::Y,
        ]
        .map(|p| center + rot.rotate(p * scale));
        push_quad(&mut vertices, corners, color);
    }

    vertices
}

/// Flatten a scene into a clear colour and a triangle list.
/// Text commands produce no geometry.
pub fn scene_geometry(scene: &Scene) -> (Option<Color>, Vec<Vertex>) {
    let mut clear = None;
    let mut vertices = Vec::new();

    for cmd in &scene.commands {
        match cmd {
            DrawCmd::Clear(color) => {
                clear = Some(*color);
                vertices.clear();
            }
            DrawCmd::Line { from, to, color } => {
                vertices.extend(line(*from, *to, LINE_WIDTH, *color))
            }
            DrawCmd::Rect { min, size, color } => vertices.extend(rect(*min, *size, *color)),
            DrawCmd::Mascot {
                center,
                scale,
                rotation,
            } => vertices.extend(mascot(*center, *scale, *rotation)),
            DrawCmd::Text { .. } => {}
        }
    }

    (clear, vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::GameState;

    const WHITE: Color = [1.0; 4];

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(4.0, 8.0), WHITE);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 14.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 28.0);
    }

    #[test]
    fn test_line_has_width() {
        let v = line(Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0), 2.0, WHITE);
        assert_eq!(v.len(), 6);
        assert!(v.iter().all(|v| (v.position[1] - 5.0).abs() <= 1.0 + 1e-5));
        assert!(v.iter().any(|v| v.position[0] < 0.0));
    }

    #[test]
    fn test_mascot_rotation_keeps_centre() {
        let center = Vec2::new(128.0, 117.0);
        let still = mascot(center, 4.0, 0.0);
        let spun = mascot(center, 4.0, std::f32::consts::FRAC_PI_2);
        assert_eq!(still.len(), spun.len());
        assert_eq!(still.len(), mascot_pixels().count() * 6);

        // Every vertex stays within the rotated tile's circumscribed circle
        let radius = MASCOT_TILE * 4.0 / 2.0 * std::f32::consts::SQRT_2 + 1e-3;
        for v in &spun {
            let p = Vec2::new(v.position[0], v.position[1]);
            assert!(p.distance(center) <= radius);
        }
    }

    #[test]
    fn test_scene_geometry_skips_text() {
        let scene = Scene::build(&GameState::new(), &Settings::default());
        let (clear, vertices) = scene_geometry(&scene);
        assert!(clear.is_some());
        // Menu is just the mascot plus text
        assert_eq!(vertices.len(), mascot_pixels().count() * 6);
    }
}
