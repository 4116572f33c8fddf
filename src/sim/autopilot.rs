//! Autopilot - plays the game for demos and headless runs
//!
//! Produces a [`TickInput`] from the current state each tick: swims to the
//! nearest undiscovered creature, clicks it, and answers correctly with
//! probability `accuracy`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::interaction;
use super::state::{GameMode, GameState};
use super::tick::TickInput;

/// Ticks to wait between clicks so every screen is visible for a moment
const THINK_TICKS: u32 = 20;

/// Accuracy used when the requested one is not a number
pub const DEFAULT_ACCURACY: f64 = 0.8;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Chance of picking the right answer (0.0 - 1.0)
    pub accuracy: f64,
    cooldown: u32,
}

impl Autopilot {
    pub fn new(seed: u64, accuracy: f64) -> Self {
        let accuracy = if accuracy.is_nan() {
            log::warn!("Autopilot accuracy is NaN, using {}", DEFAULT_ACCURACY);
            DEFAULT_ACCURACY
        } else {
            accuracy.clamp(0.0, 1.0)
        };
        Self {
            rng: Pcg32::seed_from_u64(seed),
            accuracy,
            cooldown: THINK_TICKS,
        }
    }

    /// Decide this tick's input
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        if self.cooldown > 0 {
            self.cooldown -= 1;
        }

        match state.mode {
            GameMode::Explore => self.explore(state),
            GameMode::Quiz => self.answer(state),
            GameMode::Reward => self.click_when_ready(Vec2::new(
                crate::consts::SCREEN_WIDTH / 2.0,
                crate::consts::SCREEN_HEIGHT / 2.0,
            )),
            GameMode::GameOver => TickInput::default(),
        }
    }

    fn click_when_ready(&mut self, at: Vec2) -> TickInput {
        if self.cooldown > 0 {
            return TickInput {
                pointer: at,
                ..Default::default()
            };
        }
        self.cooldown = THINK_TICKS;
        TickInput::click_at(at)
    }

    fn explore(&mut self, state: &GameState) -> TickInput {
        let player = state.player.pos;
        let target = state
            .creatures
            .iter()
            .filter(|c| !c.visited)
            .min_by(|a, b| {
                a.pos
                    .distance(player)
                    .partial_cmp(&b.pos.distance(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some(creature) = target else {
            return TickInput::default();
        };

        if interaction::is_clickable(creature) {
            return self.click_when_ready(creature.pos);
        }

        let delta = creature.pos - player;
        let step = state.player.speed;
        TickInput {
            pointer: creature.pos,
            left: delta.x < -step,
            right: delta.x > step,
            up: delta.y < -step,
            down: delta.y > step,
            ..Default::default()
        }
    }

    fn answer(&mut self, state: &GameState) -> TickInput {
        let Some(question) = state.current_question() else {
            return TickInput::default();
        };

        let choice = if self.rng.random_bool(self.accuracy) {
            question.correct
        } else {
            (0..question.answers.len())
                .find(|&i| i != question.correct)
                .unwrap_or(question.correct)
        };

        match state.answer_buttons.get(choice) {
            Some(button) => self.click_when_ready(button.rect.center()),
            None => TickInput::default(),
        }
    }
}
