//! Quiz session bookkeeping and answer buttons

use glam::Vec2;

use super::creature::{Creature, Question};
use super::geometry::Rect;
use crate::consts::{BUTTON_HEIGHT, BUTTON_SPACING, BUTTON_TOP, BUTTON_WIDTH, SCREEN_WIDTH};

pub const PROGRESS_MESSAGE: &str = "Correct! Here's another question...";
pub const DISCOVERY_MESSAGE: &str = "Amazing! You've discovered something new!";
pub const RETRY_MESSAGE: &str = "Not quite! Try again!";
pub const SKIPPED_MESSAGE: &str = "Skipped! Let's try another one...";

/// The creature being quizzed and the question on screen.
///
/// Only exists while the game is in Quiz or Reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSession {
    /// Index into `GameState::creatures`
    pub creature: usize,
    /// Index into that creature's questions
    pub question: usize,
}

/// Result of grading one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Correct, and the creature has more questions
    CorrectMore,
    /// Correct on the creature's final question
    CorrectLast,
    Wrong,
}

impl QuizSession {
    pub fn question<'a>(&self, creatures: &'a [Creature]) -> Option<&'a Question> {
        creatures
            .get(self.creature)
            .and_then(|c| c.questions.get(self.question))
    }

    /// Grade `answer` against the active question.
    pub fn grade(&self, creature: &Creature, answer: usize) -> AnswerOutcome {
        let correct = creature
            .questions
            .get(self.question)
            .is_some_and(|q| q.is_correct(answer));
        if !correct {
            AnswerOutcome::Wrong
        } else if creature.current_question_index >= creature.questions.len() {
            AnswerOutcome::CorrectLast
        } else {
            AnswerOutcome::CorrectMore
        }
    }
}

/// Gentle vertical bob for answer buttons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceAnimation {
    /// Radians per second
    pub speed: f32,
    /// Pixels
    pub amplitude: f32,
}

impl Default for BounceAnimation {
    fn default() -> Self {
        Self {
            speed: 2.0,
            amplitude: 2.0,
        }
    }
}

impl BounceAnimation {
    pub fn offset(&self, now_secs: f32) -> f32 {
        (now_secs * self.speed).sin() * self.amplitude
    }
}

/// Feedback tint shown on a button after it was picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonHighlight {
    #[default]
    None,
    Correct,
    Wrong,
}

/// An answer button. Animation is an optional component rather than a separate type.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerButton {
    pub rect: Rect,
    /// Resting y before any bounce offset
    pub base_y: f32,
    pub label: String,
    pub color: [u8; 3],
    pub hovered: bool,
    /// Picked by the player; stops the bounce
    pub selected: bool,
    pub highlight: ButtonHighlight,
    pub animation: Option<BounceAnimation>,
}

impl AnswerButton {
    pub const BASE_COLOR: [u8; 3] = [200, 200, 255];

    pub fn new(index: usize, label: impl Into<String>, animated: bool) -> Self {
        let y = BUTTON_TOP + index as f32 * BUTTON_SPACING;
        Self {
            rect: Rect::new(SCREEN_WIDTH / 2.0 - BUTTON_WIDTH / 2.0, y, BUTTON_WIDTH, BUTTON_HEIGHT),
            base_y: y,
            label: label.into(),
            color: Self::BASE_COLOR,
            hovered: false,
            selected: false,
            highlight: ButtonHighlight::None,
            animation: animated.then(BounceAnimation::default),
        }
    }

    /// Per-tick animation and hover refresh
    pub fn update(&mut self, now_secs: f32, pointer: Vec2) {
        if !self.selected {
            if let Some(anim) = &self.animation {
                self.rect.y = self.base_y + anim.offset(now_secs);
            }
        }
        self.hovered = self.rect.contains(pointer);
    }

    pub fn hit(&self, p: Vec2) -> bool {
        self.rect.contains(p)
    }

    /// Mark the button as the player's pick
    pub fn select(&mut self, correct: bool) {
        self.selected = true;
        self.highlight = if correct {
            ButtonHighlight::Correct
        } else {
            ButtonHighlight::Wrong
        };
    }

    /// Color to draw with, accounting for feedback and hover
    pub fn display_color(&self) -> [u8; 3] {
        match self.highlight {
            ButtonHighlight::Correct => [100, 255, 100],
            ButtonHighlight::Wrong => [255, 100, 100],
            ButtonHighlight::None if self.hovered => self.color.map(|c| c.saturating_add(30)),
            ButtonHighlight::None => self.color,
        }
    }
}

/// Stack one button per answer, in display order
pub fn layout_buttons(question: &Question, animated: bool) -> Vec<AnswerButton> {
    question
        .answers
        .iter()
        .enumerate()
        .map(|(i, answer)| AnswerButton::new(i, answer.as_str(), animated))
        .collect()
}

/// Index of the first button under `p`
pub fn hit_test(buttons: &[AnswerButton], p: Vec2) -> Option<usize> {
    buttons.iter().position(|b| b.hit(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SwimPattern;

    fn question(correct: usize) -> Question {
        Question {
            prompt: "How many arms?".into(),
            answers: vec!["Three".into(), "Four".into(), "Five".into()],
            correct,
        }
    }

    #[test]
    fn test_layout_keeps_display_order() {
        let buttons = layout_buttons(&question(2), false);
        assert_eq!(buttons.len(), 3);
        assert_eq!(buttons[0].label, "Three");
        assert_eq!(buttons[2].label, "Five");
        assert_eq!(buttons[1].rect.y, BUTTON_TOP + BUTTON_SPACING);
        assert_eq!(buttons[0].rect.x, SCREEN_WIDTH / 2.0 - 125.0);
        assert!(buttons.iter().all(|b| b.animation.is_none()));
    }

    #[test]
    fn test_hit_test_finds_button() {
        let buttons = layout_buttons(&question(0), true);
        let inside = buttons[1].rect.center();
        assert_eq!(hit_test(&buttons, inside), Some(1));
        assert_eq!(hit_test(&buttons, Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_bounce_stops_when_selected() {
        let mut b = AnswerButton::new(0, "Yes", true);
        b.update(0.7, Vec2::ZERO);
        assert!((b.rect.y - (b.base_y + (1.4f32).sin() * 2.0)).abs() < 1e-4);

        b.select(true);
        let y = b.rect.y;
        b.update(1.3, Vec2::ZERO);
        assert_eq!(b.rect.y, y);
        assert_eq!(b.display_color(), [100, 255, 100]);
    }

    #[test]
    fn test_hover_brightens() {
        let mut b = AnswerButton::new(0, "Yes", false);
        let center = b.rect.center();
        b.update(0.0, center);
        assert!(b.hovered);
        assert_eq!(b.display_color(), [230, 230, 255]);
    }

    #[test]
    fn test_grade_outcomes() {
        let mut c = Creature::new(
            "Starfish",
            Vec2::ZERO,
            SwimPattern::Circle,
            1.0,
            30.0,
            0.8,
            vec![question(2), question(0)],
        );
        let q = c.next_question().unwrap();
        let session = QuizSession { creature: 0, question: q };
        assert_eq!(session.grade(&c, 2), AnswerOutcome::CorrectMore);
        assert_eq!(session.grade(&c, 1), AnswerOutcome::Wrong);

        let q = c.next_question().unwrap();
        let session = QuizSession { creature: 0, question: q };
        assert_eq!(session.grade(&c, 0), AnswerOutcome::CorrectLast);
        assert_eq!(session.question(std::slice::from_ref(&c)).unwrap().correct, 0);
    }
}
