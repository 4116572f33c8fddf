//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (creature index is identity)
//! - No rendering, audio or file access

pub mod autopilot;
pub mod creature;
pub mod geometry;
pub mod interaction;
pub mod progress;
pub mod quiz;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use creature::{Creature, Question, SwimPattern};
pub use geometry::Rect;
pub use progress::Progress;
pub use quiz::{AnswerButton, AnswerOutcome, BounceAnimation, ButtonHighlight, QuizSession};
pub use state::{
    Bubble, CelebrationEffect, Clue, GameEvent, GameMode, GameState, OceanCurrent, Particle,
    Player,
};
pub use tick::{DebugCommand, TickInput, restart, tick};
