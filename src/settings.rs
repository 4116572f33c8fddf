//! Game settings and preferences
//!
//! Persisted as JSON next to the game. The simulation never sees `Settings`
//! directly; it gets the read-only [`Rules`] view.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BUBBLE_COUNT, PARTICLES_PER_EFFECT, TICKS_PER_SECOND};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live celebration particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 30,
            QualityPreset::Medium => 150,
            QualityPreset::High => 600,
        }
    }
}

/// What a wrong answer does to the creature's question sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RetryPolicy {
    /// The missed question is used up; the retry asks the next one
    #[default]
    SkipQuestion,
    /// The retry asks the missed question again
    ReaskQuestion,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Celebration particles
    pub particles: bool,
    /// Bouncing answer buttons
    pub animated_buttons: bool,
    /// Reduced motion (no bouncing buttons)
    pub reduced_motion: bool,

    // === HUD / Debug ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Draw interaction and hover radii
    pub show_collision_circles: bool,
    /// Accept debug commands (restart, teleport, add star, ...)
    pub debug_commands: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Gameplay ===
    pub retry_policy: RetryPolicy,
    /// Leave the reward screen on its own after this many seconds
    pub reward_timeout_secs: Option<f32>,
    pub ocean_currents: bool,
    pub bubble_count: usize,

    /// Directory holding `images/` and `sounds/`
    pub asset_root: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            particles: true,
            animated_buttons: true,
            reduced_motion: false,

            show_fps: false,
            show_collision_circles: false,
            debug_commands: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            retry_policy: RetryPolicy::SkipQuestion,
            reward_timeout_secs: None,
            ocean_currents: true,
            bubble_count: DEFAULT_BUBBLE_COUNT,

            asset_root: "assets".to_string(),
        }
    }
}

/// Read-only gameplay flags handed to the simulation each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub retry_policy: RetryPolicy,
    pub reward_timeout_ticks: Option<u64>,
    pub debug_commands: bool,
    pub animated_buttons: bool,
    /// Celebration effects alive at once (0 disables them)
    pub max_effects: usize,
    pub ocean_currents: bool,
    pub bubble_count: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Settings::default().rules()
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the purely decorative animation
        if preset == QualityPreset::Low {
            self.animated_buttons = false;
        }
    }

    /// Effective button animation (respects reduced_motion)
    pub fn effective_animated_buttons(&self) -> bool {
        self.animated_buttons && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// The simulation's view of these settings
    pub fn rules(&self) -> Rules {
        Rules {
            retry_policy: self.retry_policy,
            reward_timeout_ticks: self
                .reward_timeout_secs
                .map(|secs| (secs * TICKS_PER_SECOND as f32).round() as u64)
                .filter(|ticks| *ticks > 0),
            debug_commands: self.debug_commands,
            animated_buttons: self.effective_animated_buttons(),
            max_effects: self.max_particles() / PARTICLES_PER_EFFECT,
            ocean_currents: self.ocean_currents,
            bubble_count: self.bubble_count,
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Could not save settings to {}: {}", path.display(), e);
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }
}
