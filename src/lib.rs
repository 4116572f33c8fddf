//! Ocean Explorer - an underwater exploration quiz game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (creature motion, interaction, quiz state machine)
//! - `content`: Data-driven creature roster (questions, clues, temperaments)
//! - `settings`: Player preferences and the read-only rules handed to the sim
//! - `assets`: Image/sound lookup with placeholder fallback
//! - `audio`: Sound effect catalogue and playback sink
//! - `renderer`: Renderer-agnostic draw commands built from the game state

pub mod assets;
pub mod audio;
pub mod content;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use content::{ContentError, Roster};
pub use settings::{QualityPreset, RetryPolicy, Rules, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per second at the fixed timestep
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Scene dimensions
    pub const SCREEN_WIDTH: f32 = 1920.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Player is kept this far from every scene edge
    pub const PLAYER_MARGIN: f32 = 50.0;

    /// Player must be closer than this to a creature to interact with it
    pub const INTERACTION_RADIUS: f32 = 150.0;
    /// Pointer must be closer than this to an in-range creature to hover it
    pub const HOVER_RADIUS: f32 = 50.0;

    /// Phase advance per tick is `movement_speed * MOTION_DT_SCALE`
    pub const MOTION_DT_SCALE: f32 = 0.02;
    /// Creatures may drift this many movement radii from their anchor
    pub const MAX_WANDER_FACTOR: f32 = 1.5;

    /// Spawn placement
    pub const SAFE_MARGIN: f32 = 100.0;
    pub const MIN_CREATURE_DISTANCE: f32 = 200.0;
    pub const PLACEMENT_ATTEMPTS: u32 = 100;

    /// Ambient scenery
    pub const OCEAN_CURRENT_COUNT: usize = 5;
    pub const DEFAULT_BUBBLE_COUNT: usize = 15;

    /// Celebration particles
    pub const PARTICLES_PER_EFFECT: usize = 30;
    pub const PARTICLE_LIFE_TICKS: u32 = 60;
    pub const PARTICLE_GRAVITY: f32 = 0.2;

    /// Answer button layout (centered horizontally)
    pub const BUTTON_WIDTH: f32 = 250.0;
    pub const BUTTON_HEIGHT: f32 = 50.0;
    pub const BUTTON_TOP: f32 = 350.0;
    pub const BUTTON_SPACING: f32 = 60.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
