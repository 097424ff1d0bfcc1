//! Character-grid renderer for terminals and tests

use std::convert::Infallible;

use glam::Vec2;

use crate::consts::{MASCOT_TILE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::scene::{DrawCmd, Renderer, Scene};

const BLANK: char = ' ';
const WALL: char = '.';
const FILL: char = '#';
const MASCOT: char = 'G';

/// Renders a scene into `cols` x `rows` characters
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    grid: Vec<Vec<char>>,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new(64, 64)
    }
}

impl AsciiRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            grid: vec![vec![BLANK; cols]; rows],
        }
    }

    /// Logical pixels covered by one character cell
    fn cell(&self) -> Vec2 {
        Vec2::new(
            SCREEN_WIDTH / self.cols as f32,
            SCREEN_HEIGHT / self.rows as f32,
        )
    }

    /// Last rendered frame, one line per row
    pub fn frame(&self) -> String {
        self.grid
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        self.grid.get(row).and_then(|r| r.get(col)).copied()
    }

    fn plot(&mut self, p: Vec2, ch: char) {
        let cell = self.cell();
        if p.x < 0.0 || p.y < 0.0 {
            return;
        }
        let col = (p.x / cell.x) as usize;
        let row = (p.y / cell.y) as usize;
        if let Some(slot) = self.grid.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = ch;
        }
    }

    fn fill(&mut self, min: Vec2, size: Vec2, ch: char) {
        let cell = self.cell();
        let max = min + size;
        let col0 = (min.x / cell.x).floor().max(0.0) as usize;
        let row0 = (min.y / cell.y).floor().max(0.0) as usize;
        let col1 = ((max.x / cell.x).ceil() as usize).min(self.cols);
        let row1 = ((max.y / cell.y).ceil() as usize).min(self.rows);
        for row in row0..row1 {
            for col in col0..col1 {
                self.grid[row][col] = ch;
            }
        }
    }

    fn stroke(&mut self, from: Vec2, to: Vec2) {
        let steps = from.distance(to).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let p = from.lerp(to, i as f32 / steps as f32);
            // The far walls sit exactly on the screen edge cells
            self.plot(p.min(Vec2::new(SCREEN_WIDTH - 0.5, SCREEN_HEIGHT - 0.5)), WALL);
        }
    }

    fn text(&mut self, text: &str, y: f32) {
        let cell = self.cell();
        let row = ((y / cell.y) as usize).min(self.rows - 1);
        let len = text.chars().count();
        let start = self.cols.saturating_sub(len) / 2;
        for (i, ch) in text.chars().enumerate() {
            if let Some(slot) = self.grid[row].get_mut(start + i) {
                *slot = ch;
            }
        }
    }
}

impl Renderer for AsciiRenderer {
    type Error = Infallible;

    fn render(&mut self, scene: &Scene) -> Result<(), Self::Error> {
        for cmd in &scene.commands {
            match cmd {
                DrawCmd::Clear(_) => {
                    for row in &mut self.grid {
                        row.fill(BLANK);
                    }
                }
                DrawCmd::Line { from, to, .. } => self.stroke(*from, *to),
                DrawCmd::Rect { min, size, .. } => self.fill(*min, *size, FILL),
                DrawCmd::Mascot { center, scale, .. } => {
                    let size = Vec2::splat(MASCOT_TILE * scale);
                    self.fill(*center - size / 2.0, size, MASCOT);
                }
                DrawCmd::Text { text, y, .. } => self.text(text, *y),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::{GamePhase, GameState};

    #[test]
    fn test_menu_frame_has_title() {
        let mut ascii = AsciiRenderer::default();
        let scene = Scene::build(&GameState::new(), &Settings::default());
        ascii.render(&scene).unwrap();

        let frame = ascii.frame();
        assert!(frame.contains("Pon-Gopher"));
        assert!(frame.contains("-- Space --"));
        assert!(frame.contains('G'));
    }

    #[test]
    fn test_court_frame() {
        let mut state = GameState::new();
        state.phase = GamePhase::Playing;
        let mut ascii = AsciiRenderer::new(64, 64);
        ascii.render(&Scene::build(&state, &Settings::default())).unwrap();

        // 4px per cell: player paddle spans x 24..40 -> cols 6..10
        assert_eq!(ascii.char_at(7, 32), Some('#'));
        // AI paddle spans x 216..232 -> cols 54..58
        assert_eq!(ascii.char_at(55, 32), Some('#'));
        // Top wall at y 16 -> row 4
        assert_eq!(ascii.char_at(20, 4), Some('.'));
        // Ball (mascot) at the centre
        assert_eq!(ascii.char_at(30, 30), Some('G'));
    }

    #[test]
    fn test_clear_wipes_previous_frame() {
        let mut ascii = AsciiRenderer::default();
        ascii
            .render(&Scene::build(&GameState::new(), &Settings::default()))
            .unwrap();
        let mut over = GameState::new();
        over.phase = GamePhase::GameOver;
        ascii.render(&Scene::build(&over, &Settings::default())).unwrap();

        let frame = ascii.frame();
        assert!(!frame.contains("Welcome to"));
        assert!(frame.contains("lol"));
    }
}
