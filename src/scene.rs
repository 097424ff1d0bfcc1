//! Renderer-agnostic scene description
//!
//! [`Scene::build`] turns a [`GameState`] into an ordered list of draw
//! commands in logical screen pixels (256x256, origin top-left). Backends
//! implement [`Renderer`] to put that list on a screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// sRGB-encoded RGBA in 0..1. Backends write it to the screen unconverted.
pub type Color = [f32; 4];

/// 8-bit sRGB triple to a [`Color`], keeping the sRGB encoding
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colours for everything that isn't the mascot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Color,
    pub red: Color,
    pub player: Color,
    pub ai: Color,
    pub foreground: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: rgb(38, 84, 124),
            red: rgb(254, 95, 85),
            player: rgb(255, 209, 102),
            ai: rgb(6, 214, 160),
            foreground: rgb(254, 249, 255),
        }
    }
}

impl Palette {
    pub fn high_contrast() -> Self {
        Self {
            background: rgb(0, 0, 0),
            red: rgb(255, 64, 64),
            player: rgb(255, 255, 0),
            ai: rgb(0, 255, 255),
            foreground: rgb(255, 255, 255),
        }
    }

    pub fn for_settings(settings: &Settings) -> Self {
        if settings.high_contrast {
            Self::high_contrast()
        } else {
            Self::default()
        }
    }
}

/// 16x16 pixel-art gopher. `.` is transparent.
pub const MASCOT_SPRITE: [&str; 16] = [
    "....bb....bb....",
    "...bbbbbbbbbb...",
    "..bbbbbbbbbbbb..",
    ".bbwwwbbbbwwwbb.",
    ".bwwkkwbbwkkwwb.",
    ".bwwkkwbbwkkwwb.",
    ".bbwwwbttbwwwbb.",
    ".bbbbbtkktbbbbb.",
    ".bbbbbbwwbbbbbb.",
    ".bbbbbbbbbbbbbb.",
    "tbbbbbbbbbbbbbbt",
    ".bbbbbbbbbbbbbb.",
    ".bbbbbbbbbbbbbb.",
    "..bbbbbbbbbbbb..",
    "...tt......tt...",
    "................",
];

fn mascot_color(cell: u8) -> Option<Color> {
    match cell {
        b'b' => Some(rgb(106, 215, 229)),
        b'w' => Some(rgb(255, 255, 255)),
        b'k' => Some(rgb(20, 20, 30)),
        b't' => Some(rgb(246, 210, 162)),
        _ => None,
    }
}

/// Opaque mascot pixels as (column, row, colour)
pub fn mascot_pixels() -> impl Iterator<Item = (u32, u32, Color)> {
    MASCOT_SPRITE.iter().enumerate().flat_map(|(row, line)| {
        line.bytes().enumerate().filter_map(move |(col, cell)| {
            mascot_color(cell).map(|color| (col as u32, row as u32, color))
        })
    })
}

/// Font size class; renderers choose the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Body,
}

impl TextStyle {
    /// Cap height in logical pixels
    pub fn size(self) -> f32 {
        match self {
            TextStyle::Title => 16.0,
            TextStyle::Body => 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear(Color),
    /// One pixel wide line
    Line { from: Vec2, to: Vec2, color: Color },
    Rect { min: Vec2, size: Vec2, color: Color },
    /// The mascot sprite, scaled and rotated about its centre
    Mascot { center: Vec2, scale: f32, rotation: f32 },
    /// Horizontally centred text; `y` is the baseline
    Text {
        text: String,
        style: TextStyle,
        y: f32,
        color: Color,
    },
}

/// One frame's worth of draw commands
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub commands: Vec<DrawCmd>,
}

/// Centre-line dots
const DOT_SIZE: f32 = 4.0;
const DOT_STEP: f32 = 8.0;

impl Scene {
    pub fn build(state: &GameState, settings: &Settings) -> Self {
        let palette = Palette::for_settings(settings);
        let mut scene = Scene::default();
        scene.push(DrawCmd::Clear(palette.background));

        match state.phase {
            GamePhase::Menu => scene.menu(&palette),
            GamePhase::Playing => scene.court(state, &palette),
            GamePhase::GameOver => {
                let rotation = if settings.reduced_motion {
                    0.0
                } else {
                    state.mascot_rotation
                };
                scene.game_over(state, rotation, &palette)
            }
        }
        scene
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    /// Frame rate readout in the top margin
    pub fn push_fps(&mut self, fps: u32, palette: &Palette) {
        self.text(&format!("{fps} fps"), TextStyle::Body, 11.0, palette);
    }

    /// All text lines, in draw order
    pub fn texts(&self) -> impl Iterator<Item = (&str, TextStyle, f32, Color)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text {
                text,
                style,
                y,
                color,
            } => Some((text.as_str(), *style, *y, *color)),
            _ => None,
        })
    }

    fn text(&mut self, text: &str, style: TextStyle, y: f32, palette: &Palette) {
        self.push(DrawCmd::Text {
            text: text.to_string(),
            style,
            y,
            color: palette.foreground,
        });
    }

    fn mascot(&mut self, top_left: Vec2, scale: f32, rotation: f32) {
        let half = MASCOT_TILE * scale / 2.0;
        self.push(DrawCmd::Mascot {
            center: top_left + Vec2::splat(half),
            scale,
            rotation,
        });
    }

    fn menu(&mut self, palette: &Palette) {
        self.mascot(
            Vec2::new(SCREEN_WIDTH / 2.0 - MASCOT_TILE * 4.0 / 2.0, 20.0),
            4.0,
            0.0,
        );
        self.text("Welcome to", TextStyle::Body, 100.0, palette);
        self.text("Pon-Gopher", TextStyle::Title, 125.0, palette);
        self.text("'W' and 'S'", TextStyle::Body, 150.0, palette);
        self.text("to move up or down", TextStyle::Body, 160.0, palette);
        self.text("-- Space --", TextStyle::Body, 190.0, palette);
        self.text("to play", TextStyle::Body, 200.0, palette);
    }

    fn court(&mut self, state: &GameState, palette: &Palette) {
        let c = state.court;
        let corners = [
            Vec2::new(c.left, c.top),
            Vec2::new(c.right, c.top),
            Vec2::new(c.right, c.bottom),
            Vec2::new(c.left, c.bottom),
        ];
        for i in 0..corners.len() {
            self.push(DrawCmd::Line {
                from: corners[i],
                to: corners[(i + 1) % corners.len()],
                color: palette.foreground,
            });
        }

        self.push(DrawCmd::Rect {
            min: state.player.screen_position(),
            size: state.player.size(),
            color: palette.player,
        });
        self.push(DrawCmd::Rect {
            min: state.ai.screen_position(),
            size: state.ai.size(),
            color: palette.ai,
        });

        self.mascot(state.ball.screen_position(), 2.0, 0.0);

        // Dotted centre line: first dot under the top wall, then one every
        // DOT_STEP px for each even slot
        let x = SCREEN_WIDTH / 2.0 - DOT_SIZE / 2.0;
        let mut y = c.top + 2.0;
        let slots = (c.height() / DOT_SIZE) as u32;
        self.push(Self::dot(x, y, palette));
        for i in 1..slots {
            if i % 2 == 0 {
                y += DOT_STEP;
                self.push(Self::dot(x, y, palette));
            }
        }
    }

    fn dot(x: f32, y: f32, palette: &Palette) -> DrawCmd {
        DrawCmd::Rect {
            min: Vec2::new(x, y),
            size: Vec2::splat(DOT_SIZE),
            color: palette.foreground,
        }
    }

    fn game_over(&mut self, state: &GameState, rotation: f32, palette: &Palette) {
        self.text("lol", TextStyle::Title, 65.0, palette);
        self.text("u done gophering around", TextStyle::Body, 80.0, palette);
        self.mascot(
            Vec2::new(SCREEN_WIDTH / 2.0 - MASCOT_TILE * 4.0 / 2.0, 85.0),
            4.0,
            rotation,
        );
        self.text("-- Space --", TextStyle::Body, 175.0, palette);
        self.text("to gopher some more", TextStyle::Body, 185.0, palette);
        self.text(
            &format!("rally {}  best {}", state.rally, state.best_rally),
            TextStyle::Body,
            205.0,
            palette,
        );
    }
}

/// A backend that can draw a [`Scene`]
pub trait Renderer {
    type Error;

    fn render(&mut self, scene: &Scene) -> Result<(), Self::Error>;
}
