//! Creatures and their procedural swimming
//!
//! Each creature wanders around a fixed anchor following one of four swim
//! patterns. The pattern only produces a *target*; the creature chases it with
//! exponentially smoothed velocity and is hard-clamped to `1.5 * radius` of its anchor.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::clamp_to_radius;
use crate::consts::{MAX_WANDER_FACTOR, MOTION_DT_SCALE};
use crate::content::CreatureSpec;

/// Swim pattern assigned to a creature at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwimPattern {
    Circle,
    Figure8,
    Zigzag,
    /// Hold a random nearby point, pick another every 2-4 seconds
    Random,
}

impl SwimPattern {
    pub const ALL: [SwimPattern; 4] = [
        SwimPattern::Circle,
        SwimPattern::Figure8,
        SwimPattern::Zigzag,
        SwimPattern::Random,
    ];
}

/// A multiple-choice question. Answers are kept in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub answers: Vec<String>,
    /// Index into `answers`
    pub correct: usize,
}

impl Question {
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct
    }
}

/// A creature entity
#[derive(Debug, Clone)]
pub struct Creature {
    pub name: String,
    /// Image looked up by the renderer
    pub sprite: String,
    pub pos: Vec2,
    /// Wander anchor (spawn position)
    pub anchor: Vec2,
    pub swim_pattern: SwimPattern,
    pub movement_speed: f32,
    pub movement_radius: f32,
    /// Phase accumulator
    pub movement_time: f32,
    /// Smoothed per-tick velocity
    pub vel: Vec2,
    pub smoothing: f32,
    /// Held target for `SwimPattern::Random`
    pub wander_target: Vec2,
    /// Sim time (seconds) of the next random retarget
    pub next_retarget_at: f32,
    /// Facing left (moved left last tick)
    pub flip: bool,
    pub questions: Vec<Question>,
    /// Number of questions pulled so far; the next question is `questions[current_question_index]`
    pub current_question_index: usize,
    pub visited: bool,
    pub discovered: bool,
    pub can_interact: bool,
    pub is_hovered: bool,
}

impl Creature {
    /// Create a creature with fixed swim parameters, resting at its anchor.
    pub fn new(
        name: impl Into<String>,
        anchor: Vec2,
        swim_pattern: SwimPattern,
        movement_speed: f32,
        movement_radius: f32,
        smoothing: f32,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            name: name.into(),
            sprite: String::new(),
            pos: anchor,
            anchor,
            swim_pattern,
            movement_speed,
            movement_radius,
            movement_time: 0.0,
            vel: Vec2::ZERO,
            smoothing,
            wander_target: anchor,
            next_retarget_at: 0.0,
            flip: false,
            questions,
            current_question_index: 0,
            visited: false,
            discovered: false,
            can_interact: false,
            is_hovered: false,
        }
    }

    /// Spawn a creature from its roster entry, rolling its swim parameters.
    pub fn spawn(spec: &CreatureSpec, anchor: Vec2, rng: &mut impl Rng) -> Self {
        let t = &spec.temperament;
        let pattern = match t.pattern {
            Some(p) => p,
            None => SwimPattern::ALL[rng.random_range(0..SwimPattern::ALL.len())],
        };
        let speed = rng.random_range(t.speed.0..=t.speed.1);
        let radius = rng.random_range(t.radius.0..=t.radius.1) as f32;

        let mut creature = Self::new(
            spec.name.clone(),
            anchor,
            pattern,
            speed,
            radius,
            t.smoothing,
            spec.questions.clone(),
        );
        creature.sprite = spec.sprite.clone();
        creature.movement_time = rng.random_range(0.0..std::f32::consts::TAU);
        creature
    }

    /// Furthest the creature may drift from its anchor
    pub fn max_wander(&self) -> f32 {
        self.movement_radius * MAX_WANDER_FACTOR
    }

    /// Pull the next unanswered question, returning its index.
    pub fn next_question(&mut self) -> Option<usize> {
        if self.current_question_index < self.questions.len() {
            let index = self.current_question_index;
            self.current_question_index += 1;
            Some(index)
        } else {
            None
        }
    }

    pub fn questions_remaining(&self) -> usize {
        self.questions.len().saturating_sub(self.current_question_index)
    }

    /// Put the last pulled question back so it is asked again.
    pub fn unpull_question(&mut self) {
        self.current_question_index = self.current_question_index.saturating_sub(1);
    }

    /// Start the question sequence over
    pub fn rewind_questions(&mut self) {
        self.current_question_index = 0;
    }

    /// Where the swim pattern wants the creature to be this tick
    fn swim_target(&mut self, now_secs: f32, rng: &mut impl Rng) -> Vec2 {
        let t = self.movement_time;
        let r = self.movement_radius;
        match self.swim_pattern {
            SwimPattern::Circle => self.anchor + Vec2::new(t.cos(), t.sin()) * r,
            SwimPattern::Figure8 => {
                self.anchor + Vec2::new(t.sin() * r * 1.5, (t * 2.0).sin() * r)
            }
            SwimPattern::Zigzag => Vec2::new(
                self.anchor.x + (t * 2.0).sin() * r,
                self.anchor.y + t.rem_euclid(r * 2.0) - r,
            ),
            SwimPattern::Random => {
                if now_secs > self.next_retarget_at {
                    self.next_retarget_at = now_secs + rng.random_range(2.0..4.0);
                    let reach = self.movement_radius as i32;
                    let offset = Vec2::new(
                        rng.random_range(-reach..=reach) as f32,
                        rng.random_range(-reach..=reach) as f32,
                    );
                    self.wander_target = self.anchor + offset;
                }
                self.wander_target
            }
        }
    }

    /// Advance one tick of swimming. Visited creatures stay frozen.
    pub fn update_motion(&mut self, now_secs: f32, rng: &mut impl Rng) {
        if self.visited {
            return;
        }

        self.movement_time += self.movement_speed * MOTION_DT_SCALE;
        let old = self.pos;

        let target = self.swim_target(now_secs, rng);
        self.vel = self.vel * self.smoothing + (target - self.pos) * (1.0 - self.smoothing);
        self.pos += self.vel;

        self.pos = clamp_to_radius(self.pos, self.anchor, self.max_wander());

        self.flip = self.pos.x - old.x < 0.0;
    }
}
