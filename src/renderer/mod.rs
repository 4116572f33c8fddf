//! Rendering module
//!
//! The game never talks to a graphics API directly. [`scene::build_scene`]
//! turns a [`GameState`](crate::sim::GameState) into a flat list of
//! [`DrawCommand`]s which a backend consumes through the [`Renderer`] trait.
//! Shape commands can be packed into GPU instances with [`vertex::pack_shapes`].

pub mod scene;
pub mod vertex;

use glam::Vec2;

use crate::sim::Rect;

pub use scene::{build_scene, word_wrap};

/// RGBA, 0-255
pub type Color = [u8; 4];

/// Font sizes used by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Normal,
    Large,
}

impl FontSize {
    pub fn px(&self) -> f32 {
        match self {
            FontSize::Small => 18.0,
            FontSize::Normal => 24.0,
            FontSize::Large => 32.0,
        }
    }
}

/// Where a text command's position sits relative to the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Vertical gradient over the whole scene with a sand strip at the bottom
    Seabed {
        top: Color,
        bottom: Color,
        sand: Color,
        sand_height: f32,
    },
    /// Blit an image centered on `center`; placeholders draw as a flat quad
    Image {
        name: String,
        center: Vec2,
        size: Vec2,
        flip: bool,
        placeholder: Option<[u8; 3]>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        /// Outline width; `None` fills
        stroke: Option<f32>,
    },
    Rect {
        rect: Rect,
        color: Color,
        corner_radius: f32,
        stroke: Option<f32>,
    },
    Text {
        text: String,
        pos: Vec2,
        size: FontSize,
        color: Color,
        anchor: TextAnchor,
    },
    /// Full-scene translucent fill
    Overlay { color: Color },
}

/// A drawing backend
pub trait Renderer {
    /// Width of `text` in pixels. The default is a rough monospace estimate.
    fn measure_text(&self, text: &str, size: FontSize) -> f32 {
        text.chars().count() as f32 * size.px() * 0.5
    }

    /// Draw one frame
    fn submit(&mut self, commands: &[DrawCommand]);
}

/// Counts frames and commands, draws nothing
#[derive(Debug, Default, Clone)]
pub struct NullRenderer {
    pub frames: u64,
    pub last_frame_commands: usize,
}

impl Renderer for NullRenderer {
    fn submit(&mut self, commands: &[DrawCommand]) {
        self.frames += 1;
        self.last_frame_commands = commands.len();
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const WHITE: Color = [255, 255, 255, 255];
    pub const BLACK: Color = [0, 0, 0, 255];
    pub const SHADOW: Color = [100, 100, 100, 255];
    pub const DIM: Color = [0, 0, 0, 128];
    pub const CONTINUE_PROMPT: Color = [0, 100, 200, 255];
    pub const YELLOW: Color = [255, 255, 0, 255];

    pub const SEA_TOP: Color = [0, 150, 180, 255];
    pub const SEA_BOTTOM: Color = [0, 50, 230, 255];
    pub const SAND: Color = [240, 220, 130, 255];

    pub const CURRENT: Color = [0, 100, 255, 50];
    pub const BUBBLE_SHINE: Color = [255, 255, 255, 255];
    pub const CLUE: Color = [255, 215, 0, 255];
    pub const CLUE_GLOW: Color = [255, 255, 150, 255];
    pub const PLAYER_MARKER: Color = [0, 255, 0, 255];
    pub const INTERACTION_RING: Color = [0, 255, 0, 120];
    pub const HOVER_RING: Color = [255, 255, 0, 120];

    /// Opaque color from an RGB triple
    pub const fn rgb(c: [u8; 3]) -> Color {
        [c[0], c[1], c[2], 255]
    }
}
