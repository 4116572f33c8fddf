//! Creature roster: who lives in the scene and what they ask
//!
//! Loaded from JSON. The default roster ships with the crate in `data/roster.json`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{Question, SwimPattern};

/// Errors raised while loading or validating a roster
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read roster {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid roster JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("roster has no creatures")]
    EmptyRoster,

    #[error("creature '{creature}' has no questions")]
    NoQuestions { creature: String },

    #[error("creature '{creature}' question {question} needs at least two answers")]
    TooFewAnswers { creature: String, question: usize },

    #[error(
        "creature '{creature}' question {question} marks answer {correct} correct but only has {answers}"
    )]
    CorrectOutOfRange {
        creature: String,
        question: usize,
        correct: usize,
        answers: usize,
    },

    #[error("creature '{creature}' has an invalid temperament: {reason}")]
    BadTemperament {
        creature: String,
        reason: &'static str,
    },
}

/// How a creature swims. Ranges are inclusive and sampled once at spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Temperament {
    /// Fixed swim pattern; `None` picks one at random per session
    pub pattern: Option<SwimPattern>,
    /// Phase speed range
    pub speed: (f32, f32),
    /// Wander radius range (whole scene units)
    pub radius: (u32, u32),
    /// Velocity smoothing in `[0, 1)`; higher is lazier
    pub smoothing: f32,
}

impl Default for Temperament {
    fn default() -> Self {
        Self {
            pattern: None,
            speed: (0.3, 1.5),
            radius: (30, 100),
            smoothing: 0.8,
        }
    }
}

impl Temperament {
    fn check(&self) -> Result<(), &'static str> {
        if !(self.speed.0 >= 0.0 && self.speed.0 <= self.speed.1) {
            return Err("speed range must be non-negative and ordered");
        }
        if self.radius.0 == 0 || self.radius.0 > self.radius.1 {
            return Err("radius range must be positive and ordered");
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err("smoothing must be in [0, 1)");
        }
        Ok(())
    }
}

/// One creature entry in the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSpec {
    pub name: String,
    /// Image file name looked up by the asset provider
    pub sprite: String,
    #[serde(default = "default_sprite_scale")]
    pub sprite_scale: f32,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub temperament: Temperament,
}

fn default_sprite_scale() -> f32 {
    1.0
}

/// A hint marker placed somewhere in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClueSpec {
    pub text: String,
    /// Name of the creature the clue points at
    pub hint: String,
}

/// All creatures and clues for a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub creatures: Vec<CreatureSpec>,
    #[serde(default)]
    pub clues: Vec<ClueSpec>,
}

const BUILTIN_ROSTER: &str = include_str!("../data/roster.json");

impl Roster {
    /// Parse and validate a roster from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let roster: Roster = serde_json::from_str(json)?;
        roster.validate()?;
        Ok(roster)
    }

    /// Load a roster file from disk.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let roster = Self::from_json(&json)?;
        log::info!(
            "Loaded roster from {} ({} creatures, {} clues)",
            path.display(),
            roster.creatures.len(),
            roster.clues.len()
        );
        Ok(roster)
    }

    /// The roster bundled with the game
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json(BUILTIN_ROSTER)
    }

    /// Check every creature can actually be quizzed.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.creatures.is_empty() {
            return Err(ContentError::EmptyRoster);
        }

        for spec in &self.creatures {
            if spec.questions.is_empty() {
                return Err(ContentError::NoQuestions {
                    creature: spec.name.clone(),
                });
            }
            for (i, q) in spec.questions.iter().enumerate() {
                if q.answers.len() < 2 {
                    return Err(ContentError::TooFewAnswers {
                        creature: spec.name.clone(),
                        question: i,
                    });
                }
                if q.correct >= q.answers.len() {
                    return Err(ContentError::CorrectOutOfRange {
                        creature: spec.name.clone(),
                        question: i,
                        correct: q.correct,
                        answers: q.answers.len(),
                    });
                }
            }
            spec.temperament
                .check()
                .map_err(|reason| ContentError::BadTemperament {
                    creature: spec.name.clone(),
                    reason,
                })?;
        }

        Ok(())
    }

    /// Total number of stars available in a session
    pub fn total_creatures(&self) -> usize {
        self.creatures.len()
    }
}
