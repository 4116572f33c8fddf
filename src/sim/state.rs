//! Game state and core simulation types
//!
//! Everything a session needs lives in [`GameState`]; restarting a session
//! rebuilds it from the roster with a fresh seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::creature::{Creature, Question};
use super::geometry::{Rect, clamp_to_bounds, within_radius};
use super::progress::Progress;
use super::quiz::{AnswerButton, QuizSession};
use crate::consts::*;
use crate::content::Roster;
use crate::settings::Rules;

/// Current mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Swimming around, creatures animate and can be clicked
    #[default]
    Explore,
    /// Answering a creature's question
    Quiz,
    /// Showing the result of an answer, waiting for a click
    Reward,
    /// Every creature discovered
    GameOver,
}

/// Things the host may want to react to (sounds, logs, HUD flashes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    SessionStarted { seed: u64 },
    ModeChanged { from: GameMode, to: GameMode },
    CorrectAnswer { creature: usize },
    WrongAnswer { creature: usize },
    CreatureDiscovered { creature: usize },
    BubblePopped,
    ClueFound { clue: usize },
    GameOver { stars: u32 },
}

/// The player's avatar
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            speed: PLAYER_SPEED,
        }
    }
}

impl Player {
    pub fn move_by(&mut self, delta: Vec2) {
        self.pos += delta;
        self.clamp();
    }

    /// Keep the player inside the scene margin
    pub fn clamp(&mut self) {
        self.pos = clamp_to_bounds(
            self.pos,
            Vec2::splat(PLAYER_MARGIN),
            Vec2::new(SCREEN_WIDTH - PLAYER_MARGIN, SCREEN_HEIGHT - PLAYER_MARGIN),
        );
    }
}

/// Celebration palette
pub const RAINBOW: [[u8; 3]; 7] = [
    [255, 0, 0],
    [255, 127, 0],
    [255, 255, 0],
    [0, 255, 0],
    [0, 0, 255],
    [75, 0, 130],
    [148, 0, 211],
];

/// A single celebration particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [u8; 3],
    /// Ticks left
    pub life: u32,
}

impl Particle {
    /// One tick of ballistic motion
    pub fn step(self) -> Self {
        Self {
            pos: self.pos + self.vel,
            vel: self.vel + Vec2::new(0.0, PARTICLE_GRAVITY),
            color: self.color,
            life: self.life.saturating_sub(1),
        }
    }

    pub fn alive(&self) -> bool {
        self.life > 0
    }

    /// Fade-out alpha
    pub fn alpha(&self) -> u8 {
        (self.life * 4).min(255) as u8
    }
}

/// A burst of confetti; dead once every particle has expired
#[derive(Debug, Clone, PartialEq)]
pub struct CelebrationEffect {
    pub particles: [Particle; PARTICLES_PER_EFFECT],
}

impl CelebrationEffect {
    pub fn new(at: Vec2, rng: &mut impl Rng) -> Self {
        let particles = std::array::from_fn(|_| {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(2.0..8.0);
            Particle {
                pos: at,
                vel: crate::polar_to_cartesian(speed, angle),
                color: RAINBOW[rng.random_range(0..RAINBOW.len())],
                life: PARTICLE_LIFE_TICKS,
            }
        });
        Self { particles }
    }

    pub fn update(&mut self) {
        for p in &mut self.particles {
            *p = p.step();
        }
    }

    pub fn alive(&self) -> bool {
        self.particles.iter().any(Particle::alive)
    }
}

/// A radial push zone that nudges the player away from its center
#[derive(Debug, Clone, PartialEq)]
pub struct OceanCurrent {
    pub center: Vec2,
    pub strength: f32,
    pub radius: f32,
}

impl OceanCurrent {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            center: Vec2::new(
                rng.random_range(0..=SCREEN_WIDTH as i32) as f32,
                rng.random_range(0..=SCREEN_HEIGHT as i32) as f32,
            ),
            strength: rng.random_range(0.5..2.0),
            radius: rng.random_range(200..=400) as f32,
        }
    }

    /// Displacement applied to something at `p` this tick
    pub fn push(&self, p: Vec2) -> Vec2 {
        let offset = p - self.center;
        let dist = offset.length();
        if dist >= self.radius {
            return Vec2::ZERO;
        }
        let force = (1.0 - dist / self.radius) * self.strength;
        crate::polar_to_cartesian(force, offset.y.atan2(offset.x))
    }
}

pub const BUBBLE_COLORS: [[u8; 3]; 3] = [[173, 216, 230], [135, 206, 235], [0, 191, 255]];

/// A rising bubble that can be popped for fun
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
    pub color: [u8; 3],
    /// Shine rotation, degrees
    pub sparkle: u32,
    pub popped: bool,
}

impl Bubble {
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut bubble = Self {
            pos: Vec2::ZERO,
            speed: rng.random_range(1.0..3.0),
            size: rng.random_range(20..=40) as f32,
            color: BUBBLE_COLORS[rng.random_range(0..BUBBLE_COLORS.len())],
            sparkle: 0,
            popped: false,
        };
        bubble.recycle(rng);
        bubble
    }

    /// Send the bubble back below the scene
    pub fn recycle(&mut self, rng: &mut impl Rng) {
        self.pos = Vec2::new(
            rng.random_range(50..=(SCREEN_WIDTH as i32 - 50)) as f32,
            SCREEN_HEIGHT + rng.random_range(0..=100) as f32,
        );
        self.popped = false;
    }

    pub fn update(&mut self, now_secs: f32) {
        if !self.popped {
            self.pos.y -= self.speed;
            self.pos.x += (now_secs + self.pos.y * 0.1).sin() * 0.5;
            self.sparkle = (self.sparkle + 1) % 360;
        }
    }

    /// Pop if `p` is on the bubble
    pub fn check_pop(&mut self, p: Vec2) -> bool {
        if !self.popped && p.distance(self.pos) <= self.size {
            self.popped = true;
            return true;
        }
        false
    }
}

/// A hint marker
#[derive(Debug, Clone, PartialEq)]
pub struct Clue {
    pub pos: Vec2,
    pub text: String,
    pub hint: String,
    pub collected: bool,
    pub hovered: bool,
}

impl Clue {
    pub const SIZE: f32 = 30.0;

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, Self::SIZE, Self::SIZE)
    }

    pub fn update_hover(&mut self, pointer: Vec2) {
        if !self.collected {
            self.hovered = self.rect().contains(pointer);
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this session was generated from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Kept for restarts
    pub(crate) roster: Roster,
    pub mode: GameMode,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Tick at which Reward was last entered
    pub reward_entered_tick: u64,
    pub player: Player,
    /// Stable order; index is the creature's identity
    pub creatures: Vec<Creature>,
    pub session: Option<QuizSession>,
    pub answer_buttons: Vec<AnswerButton>,
    pub result_message: String,
    pub progress: Progress,
    pub currents: Vec<OceanCurrent>,
    pub bubbles: Vec<Bubble>,
    pub bubbles_popped: u32,
    pub clues: Vec<Clue>,
    pub clues_found: u32,
    pub effects: Vec<CelebrationEffect>,
    /// Pending events for the host; drain once per frame
    pub events: Vec<GameEvent>,
    /// Number of restarts since launch
    pub restarts: u32,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64, roster: Roster, rules: &Rules) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut positions: Vec<Vec2> = Vec::with_capacity(roster.creatures.len() + roster.clues.len());
        let mut creatures = Vec::with_capacity(roster.creatures.len());
        for spec in &roster.creatures {
            let anchor = Self::random_position(&mut rng, &positions);
            positions.push(anchor);
            creatures.push(Creature::spawn(spec, anchor, &mut rng));
        }

        let mut clues = Vec::with_capacity(roster.clues.len());
        for spec in &roster.clues {
            let pos = Self::random_position(&mut rng, &positions);
            positions.push(pos);
            clues.push(Clue {
                pos,
                text: spec.text.clone(),
                hint: spec.hint.clone(),
                collected: false,
                hovered: false,
            });
        }

        let currents = if rules.ocean_currents {
            (0..OCEAN_CURRENT_COUNT)
                .map(|_| OceanCurrent::random(&mut rng))
                .collect()
        } else {
            Vec::new()
        };
        let bubbles = (0..rules.bubble_count)
            .map(|_| Bubble::random(&mut rng))
            .collect();

        log::info!(
            "Session seed {}: {} creatures, {} clues",
            seed,
            creatures.len(),
            clues.len()
        );

        Self {
            seed,
            rng,
            progress: Progress::new(roster.creatures.len()),
            roster,
            mode: GameMode::Explore,
            time_ticks: 0,
            reward_entered_tick: 0,
            player: Player::default(),
            creatures,
            session: None,
            answer_buttons: Vec::new(),
            result_message: String::new(),
            currents,
            bubbles,
            bubbles_popped: 0,
            clues,
            clues_found: 0,
            effects: Vec::new(),
            events: vec![GameEvent::SessionStarted { seed }],
            restarts: 0,
        }
    }

    /// Pick a spot inside the safe margin at least `MIN_CREATURE_DISTANCE`
    /// from every existing position, falling back to anywhere on screen.
    pub fn random_position(rng: &mut impl Rng, existing: &[Vec2]) -> Vec2 {
        let margin = SAFE_MARGIN as i32;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let candidate = Vec2::new(
                rng.random_range(margin..=SCREEN_WIDTH as i32 - margin) as f32,
                rng.random_range(margin..=SCREEN_HEIGHT as i32 - margin) as f32,
            );
            if existing
                .iter()
                .all(|p| !within_radius(candidate, *p, MIN_CREATURE_DISTANCE))
            {
                return candidate;
            }
        }
        log::debug!("No separated spawn point found, placing anywhere");
        Vec2::new(
            rng.random_range(0..=SCREEN_WIDTH as i32) as f32,
            rng.random_range(0..=SCREEN_HEIGHT as i32) as f32,
        )
    }

    pub fn stars(&self) -> u32 {
        self.progress.stars
    }

    pub fn total_creatures(&self) -> usize {
        self.progress.total()
    }

    /// Seconds of simulated time since the session started
    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    /// The creature being quizzed, if any
    pub fn current_creature(&self) -> Option<&Creature> {
        self.session.and_then(|s| self.creatures.get(s.creature))
    }

    /// The question on screen, if any
    pub fn current_question(&self) -> Option<&Question> {
        self.session.and_then(|s| s.question(&self.creatures))
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, Roster::builtin().unwrap(), &Rules::default())
    }

    #[test]
    fn test_new_session() {
        let mut state = new_state(12345);
        assert_eq!(state.mode, GameMode::Explore);
        assert_eq!(state.total_creatures(), 5);
        assert_eq!(state.clues.len(), 5);
        assert_eq!(state.bubbles.len(), 15);
        assert_eq!(state.currents.len(), OCEAN_CURRENT_COUNT);
        assert_eq!(state.stars(), 0);
        assert!(state.session.is_none());
        assert_eq!(state.drain_events(), vec![GameEvent::SessionStarted { seed: 12345 }]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = new_state(777);
        let b = new_state(777);
        for (ca, cb) in a.creatures.iter().zip(&b.creatures) {
            assert_eq!(ca.anchor, cb.anchor);
            assert_eq!(ca.swim_pattern, cb.swim_pattern);
        }
    }

    #[test]
    fn test_player_is_clamped() {
        let mut p = Player::default();
        p.move_by(Vec2::new(-1000.0, 5000.0));
        assert_eq!(p.pos, Vec2::new(PLAYER_MARGIN, SCREEN_HEIGHT - PLAYER_MARGIN));
    }

    #[test]
    fn test_particle_step_is_ballistic() {
        let p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -2.0),
            color: RAINBOW[0],
            life: 2,
        };
        let p = p.step();
        assert_eq!(p.pos, Vec2::new(1.0, -2.0));
        assert!((p.vel.y - (-2.0 + PARTICLE_GRAVITY)).abs() < 1e-6);
        assert_eq!(p.life, 1);
        assert_eq!(p.alpha(), 4);
        let p = p.step().step();
        assert!(!p.alive());
    }

    #[test]
    fn test_celebration_expires() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut effect = CelebrationEffect::new(Vec2::new(100.0, 100.0), &mut rng);
        for _ in 0..PARTICLE_LIFE_TICKS - 1 {
            effect.update();
        }
        assert!(effect.alive());
        effect.update();
        assert!(!effect.alive());
    }

    #[test]
    fn test_current_pushes_outward() {
        let current = OceanCurrent {
            center: Vec2::new(500.0, 500.0),
            strength: 2.0,
            radius: 200.0,
        };
        let push = current.push(Vec2::new(600.0, 500.0));
        assert!((push - Vec2::new(1.0, 0.0)).length() < 1e-5);
        assert_eq!(current.push(Vec2::new(800.0, 500.0)), Vec2::ZERO);
    }

    #[test]
    fn test_bubble_pop_and_recycle() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut bubble = Bubble::random(&mut rng);
        assert!(bubble.pos.y >= SCREEN_HEIGHT);
        let at = bubble.pos;
        assert!(bubble.check_pop(at));
        assert!(!bubble.check_pop(at));
        bubble.recycle(&mut rng);
        assert!(!bubble.popped);
    }

    #[test]
    fn test_clue_hover_box() {
        let mut clue = Clue {
            pos: Vec2::new(300.0, 300.0),
            text: "Look up".into(),
            hint: "Dolphin".into(),
            collected: false,
            hovered: false,
        };
        clue.update_hover(Vec2::new(310.0, 290.0));
        assert!(clue.hovered);
        clue.update_hover(Vec2::new(320.0, 300.0));
        assert!(!clue.hovered);
    }

    proptest! {
        #[test]
        fn prop_spawn_points_are_separated(seed in any::<u64>()) {
            // Five creatures fit comfortably, so placement should never fall back
            let state = new_state(seed);
            for (i, a) in state.creatures.iter().enumerate() {
                for b in &state.creatures[i + 1..] {
                    prop_assert!(a.anchor.distance(b.anchor) >= MIN_CREATURE_DISTANCE);
                }
            }
        }
    }
}
