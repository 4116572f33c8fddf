//! Fixed timestep simulation tick
//!
//! Drives the Explore → Quiz → Reward → GameOver state machine. Clicks are
//! dispatched in arrival order against the mode current at that moment, and
//! each click is consumed by at most one handler.

use glam::Vec2;
use rand::Rng;

use super::interaction;
use super::quiz::{
    AnswerOutcome, DISCOVERY_MESSAGE, PROGRESS_MESSAGE, QuizSession, RETRY_MESSAGE,
    SKIPPED_MESSAGE, hit_test, layout_buttons,
};
use super::state::{CelebrationEffect, GameEvent, GameMode, GameState};
use crate::settings::{RetryPolicy, Rules};

/// Manual overrides, honored only when `Rules::debug_commands` is set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugCommand {
    /// Start a fresh session
    Restart,
    /// Push the state machine one step forward
    ForceNextMode,
    /// Move the player onto creature `n`
    TeleportToCreature(usize),
    AddStar,
    ForceGameOver,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Current pointer position
    pub pointer: Vec2,
    /// Click positions since the last tick, oldest first
    pub clicks: Vec<Vec2>,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub debug: Option<DebugCommand>,
}

impl TickInput {
    /// Single click at `p`, pointer resting there
    pub fn click_at(p: Vec2) -> Self {
        Self {
            pointer: p,
            clicks: vec![p],
            ..Default::default()
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, rules: &Rules) {
    state.time_ticks += 1;

    if let Some(command) = input.debug {
        if rules.debug_commands {
            apply_debug(state, command, rules);
        } else {
            log::debug!("Ignoring debug command {:?}", command);
        }
    }

    for &click in &input.clicks {
        dispatch_click(state, click, rules);
    }

    // Backstop so the reward screen can't stall the session
    if state.mode == GameMode::Reward {
        if let Some(timeout) = rules.reward_timeout_ticks {
            if state.time_ticks - state.reward_entered_tick >= timeout {
                log::debug!("Reward timed out after {} ticks", timeout);
                continue_from_reward(state, rules);
            }
        }
    }

    let now = state.elapsed_secs();
    match state.mode {
        GameMode::Explore => update_explore(state, input, now),
        GameMode::Quiz => {
            for button in &mut state.answer_buttons {
                button.update(now, input.pointer);
            }
        }
        GameMode::Reward | GameMode::GameOver => {}
    }

    for effect in &mut state.effects {
        effect.update();
    }
    state.effects.retain(CelebrationEffect::alive);

    check_game_over(state);
}

fn update_explore(state: &mut GameState, input: &TickInput, now: f32) {
    let speed = state.player.speed;
    let mut delta = Vec2::ZERO;
    if input.left {
        delta.x = -speed;
    }
    if input.right {
        delta.x = speed;
    }
    if input.up {
        delta.y = -speed;
    }
    if input.down {
        delta.y = speed;
    }
    if delta != Vec2::ZERO {
        state.player.move_by(delta);
    }

    if !state.currents.is_empty() {
        let push: Vec2 = state
            .currents
            .iter()
            .map(|c| c.push(state.player.pos))
            .sum();
        state.player.move_by(push);
    }

    let player = state.player.pos;
    for creature in &mut state.creatures {
        creature.update_motion(now, &mut state.rng);
        interaction::refresh(creature, player, input.pointer);
    }

    for clue in &mut state.clues {
        clue.update_hover(input.pointer);
    }

    for bubble in &mut state.bubbles {
        bubble.update(now);
        if bubble.pos.y < -50.0 {
            bubble.recycle(&mut state.rng);
        }
    }
}

fn dispatch_click(state: &mut GameState, click: Vec2, rules: &Rules) {
    match state.mode {
        GameMode::Explore => {
            if let Some(index) = interaction::select_creature(&state.creatures) {
                begin_quiz(state, index, rules);
                return;
            }
            // Every bubble under the pointer pops
            let popped = state
                .bubbles
                .iter_mut()
                .map(|b| b.check_pop(click))
                .filter(|&hit| hit)
                .count() as u32;
            if popped > 0 {
                state.bubbles_popped += popped;
                for _ in 0..popped {
                    state.events.push(GameEvent::BubblePopped);
                }
                return;
            }
            if let Some(index) = state
                .clues
                .iter()
                .position(|c| !c.collected && c.rect().contains(click))
            {
                let clue = &mut state.clues[index];
                clue.collected = true;
                clue.hovered = false;
                state.clues_found += 1;
                state.events.push(GameEvent::ClueFound { clue: index });
            }
        }
        GameMode::Quiz => {
            if let Some(answer) = hit_test(&state.answer_buttons, click) {
                check_answer(state, answer, rules);
            }
        }
        GameMode::Reward => continue_from_reward(state, rules),
        GameMode::GameOver => restart(state, rules),
    }
}

fn set_mode(state: &mut GameState, to: GameMode) {
    let from = state.mode;
    if from == to {
        return;
    }
    log::info!("{:?} -> {:?}", from, to);
    state.mode = to;
    if to == GameMode::Reward {
        state.reward_entered_tick = state.time_ticks;
    }
    state.events.push(GameEvent::ModeChanged { from, to });
}

/// Start quizzing creature `index` from Explore
fn begin_quiz(state: &mut GameState, index: usize, rules: &Rules) {
    let creature = &mut state.creatures[index];
    // A creature whose questions were all used up on misses starts over
    if creature.questions_remaining() == 0 && !creature.visited {
        log::debug!("{} ran out of questions, starting over", creature.name);
        creature.rewind_questions();
    }
    log::debug!("Quiz with {}", creature.name);
    setup_quiz(state, index, rules);
}

/// Pull the creature's next question into a session, or fall back to Explore.
fn setup_quiz(state: &mut GameState, index: usize, rules: &Rules) {
    let creature = &mut state.creatures[index];
    match creature.next_question() {
        Some(question) => {
            state.answer_buttons =
                layout_buttons(&creature.questions[question], rules.animated_buttons);
            state.session = Some(QuizSession {
                creature: index,
                question,
            });
            set_mode(state, GameMode::Quiz);
        }
        None => {
            log::debug!("{} has no questions left, back to explore", creature.name);
            state.session = None;
            state.answer_buttons.clear();
            set_mode(state, GameMode::Explore);
        }
    }
}

fn check_answer(state: &mut GameState, answer: usize, rules: &Rules) {
    let Some(session) = state.session else {
        return;
    };
    let index = session.creature;
    let outcome = session.grade(&state.creatures[index], answer);

    if let Some(button) = state.answer_buttons.get_mut(answer) {
        button.select(outcome != AnswerOutcome::Wrong);
    }

    match outcome {
        AnswerOutcome::CorrectMore => {
            state.events.push(GameEvent::CorrectAnswer { creature: index });
            celebrate(state, rules);
            state.result_message = PROGRESS_MESSAGE.to_string();
            setup_quiz(state, index, rules);
        }
        AnswerOutcome::CorrectLast => {
            state.events.push(GameEvent::CorrectAnswer { creature: index });
            celebrate(state, rules);
            let creature = &mut state.creatures[index];
            creature.discovered = true;
            creature.visited = true;
            log::info!("Discovered {}", creature.name);
            state.progress.record_discovery(index);
            state.events.push(GameEvent::CreatureDiscovered { creature: index });
            state.result_message = DISCOVERY_MESSAGE.to_string();
            set_mode(state, GameMode::Reward);
        }
        AnswerOutcome::Wrong => {
            state.events.push(GameEvent::WrongAnswer { creature: index });
            if rules.retry_policy == RetryPolicy::ReaskQuestion {
                state.creatures[index].unpull_question();
            }
            state.result_message = RETRY_MESSAGE.to_string();
            set_mode(state, GameMode::Reward);
        }
    }
}

/// Leave the reward screen: more questions for an unfinished creature, else explore.
fn continue_from_reward(state: &mut GameState, rules: &Rules) {
    match state.session {
        Some(session) if !state.creatures[session.creature].visited => {
            setup_quiz(state, session.creature, rules);
        }
        _ => {
            state.session = None;
            state.answer_buttons.clear();
            set_mode(state, GameMode::Explore);
        }
    }
}

fn celebrate(state: &mut GameState, rules: &Rules) {
    if rules.max_effects == 0 {
        return;
    }
    if state.effects.len() >= rules.max_effects {
        state.effects.remove(0);
    }
    let effect = CelebrationEffect::new(state.player.pos, &mut state.rng);
    state.effects.push(effect);
}

fn enter_game_over(state: &mut GameState) {
    state.session = None;
    state.answer_buttons.clear();
    set_mode(state, GameMode::GameOver);
    let stars = state.stars();
    log::info!("All creatures found: {} stars in {:.1}s", stars, state.elapsed_secs());
    state.events.push(GameEvent::GameOver { stars });
}

/// Enter GameOver once every star is earned and the last reward was dismissed
fn check_game_over(state: &mut GameState) {
    if state.mode == GameMode::Explore && state.progress.is_complete() {
        enter_game_over(state);
    }
}

/// Rebuild the session with a new seed drawn from the current one
pub fn restart(state: &mut GameState, rules: &Rules) {
    let seed: u64 = state.rng.random();
    let roster = std::mem::take(&mut state.roster);
    let mut pending = std::mem::take(&mut state.events);
    let restarts = state.restarts + 1;

    *state = GameState::new(seed, roster, rules);
    state.restarts = restarts;
    pending.append(&mut state.events);
    state.events = pending;
    log::info!("Restarted session (#{})", restarts);
}

fn apply_debug(state: &mut GameState, command: DebugCommand, rules: &Rules) {
    log::debug!("Debug command {:?} in {:?}", command, state.mode);
    match command {
        DebugCommand::Restart => restart(state, rules),
        DebugCommand::ForceNextMode => match state.mode {
            GameMode::Explore => {
                let player = state.player.pos;
                let nearest = state
                    .creatures
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| !c.visited)
                    .min_by(|(_, a), (_, b)| {
                        a.pos
                            .distance(player)
                            .partial_cmp(&b.pos.distance(player))
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|(i, _)| i);
                if let Some(index) = nearest {
                    begin_quiz(state, index, rules);
                }
            }
            GameMode::Quiz => {
                state.result_message = SKIPPED_MESSAGE.to_string();
                set_mode(state, GameMode::Reward);
            }
            GameMode::Reward => continue_from_reward(state, rules),
            GameMode::GameOver => restart(state, rules),
        },
        DebugCommand::TeleportToCreature(n) => {
            if let Some(creature) = state.creatures.get(n) {
                state.player.pos = creature.pos;
                state.player.clamp();
            }
        }
        DebugCommand::AddStar => state.progress.grant_star(),
        DebugCommand::ForceGameOver => {
            if state.mode != GameMode::GameOver {
                enter_game_over(state);
            }
        }
    }
}
