//! Scene builder - translates game state into draw commands
//!
//! Layering, back to front: seabed, currents, bubbles, clues, creatures,
//! player, HUD, mode overlay (quiz / reward / game over), particles.

use glam::Vec2;

use super::colors::{self, rgb};
use super::{Color, DrawCommand, FontSize, Renderer, TextAnchor};
use crate::assets::{Image, SceneAssets};
use crate::consts::{HOVER_RADIUS, INTERACTION_RADIUS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::settings::Settings;
use crate::sim::{ButtonHighlight, GameMode, GameState, Rect};

pub const HOVER_PROMPT: &str = "Click to interact!";
pub const CONTINUE_PROMPT: &str = "Click anywhere to continue";
pub const PLAY_AGAIN_PROMPT: &str = "Click anywhere to play again";
pub const GAME_OVER_TITLE: &str = "You found every creature!";

const SAND_HEIGHT: f32 = 80.0;
const LINE_HEIGHT: f32 = 40.0;
const BOX_PADDING: f32 = 20.0;

/// Greedy word wrap. A single word wider than `max_width` gets a line to itself.
pub fn word_wrap(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn format_time(secs: f32) -> String {
    let total = secs.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

fn with_alpha(c: [u8; 3], alpha: u8) -> Color {
    [c[0], c[1], c[2], alpha]
}

/// Collects commands for one frame
struct SceneBuilder<'a, R: Renderer + ?Sized> {
    renderer: &'a R,
    commands: Vec<DrawCommand>,
}

impl<'a, R: Renderer + ?Sized> SceneBuilder<'a, R> {
    fn image(&mut self, image: &Image, center: Vec2, flip: bool) {
        self.commands.push(DrawCommand::Image {
            name: image.name.clone(),
            center,
            size: Vec2::new(image.width as f32, image.height as f32),
            flip,
            placeholder: image.placeholder,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            stroke: None,
        });
    }

    fn ring(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            stroke: Some(width),
        });
    }

    fn rect(&mut self, rect: Rect, color: Color, corner_radius: f32) {
        self.commands.push(DrawCommand::Rect {
            rect,
            color,
            corner_radius,
            stroke: None,
        });
    }

    fn outline(&mut self, rect: Rect, color: Color, corner_radius: f32, width: f32) {
        self.commands.push(DrawCommand::Rect {
            rect,
            color,
            corner_radius,
            stroke: Some(width),
        });
    }

    fn text(&mut self, text: impl Into<String>, pos: Vec2, size: FontSize, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            color,
            anchor: TextAnchor::TopLeft,
        });
    }

    fn centered_text(&mut self, text: impl Into<String>, center: Vec2, size: FontSize, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            pos: center,
            size,
            color,
            anchor: TextAnchor::Center,
        });
    }

    /// White rounded box with a drop shadow
    fn dialog(&mut self, rect: Rect) {
        let mut shadow = rect;
        shadow.x += 5.0;
        shadow.y += 5.0;
        self.rect(shadow, colors::SHADOW, 15.0);
        self.rect(rect, colors::WHITE, 15.0);
    }

    fn background(&mut self, assets: &SceneAssets) {
        match &assets.background {
            Some(bg) => self.image(bg, Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0), false),
            None => self.commands.push(DrawCommand::Seabed {
                top: colors::SEA_TOP,
                bottom: colors::SEA_BOTTOM,
                sand: colors::SAND,
                sand_height: SAND_HEIGHT,
            }),
        }
    }

    fn world(&mut self, state: &GameState, assets: &SceneAssets, now: f32) {
        for current in &state.currents {
            self.circle(current.center, current.radius, colors::CURRENT);
        }

        for bubble in state.bubbles.iter().filter(|b| !b.popped) {
            self.circle(bubble.pos, bubble.size, rgb(bubble.color));
            let angle = bubble.sparkle as f32 * 0.1;
            let shine = bubble.pos + Vec2::new(angle.cos(), angle.sin()) * bubble.size * 0.3;
            self.circle(shine, (bubble.size / 4.0).floor(), colors::BUBBLE_SHINE);
        }

        for clue in state.clues.iter().filter(|c| !c.collected) {
            if clue.hovered {
                let glow = 20.0 + (now * 5.0).sin() * 3.0;
                self.circle(clue.pos, glow, colors::CLUE_GLOW);
            }
            self.circle(clue.pos, 15.0, colors::CLUE);
            self.ring(clue.pos, 15.0, colors::BLACK, 2.0);
            self.centered_text("?", clue.pos, FontSize::Normal, colors::BLACK);
            if clue.hovered {
                let at = clue.pos - Vec2::new(0.0, 30.0);
                let width = self.renderer.measure_text(&clue.text, FontSize::Normal);
                let backing = Rect::centered(at, width + 20.0, FontSize::Normal.px() + 10.0);
                self.rect(backing, colors::DIM, 0.0);
                self.centered_text(clue.text.as_str(), at, FontSize::Normal, colors::WHITE);
            }
        }

        for creature in state.creatures.iter().filter(|c| !c.visited) {
            let sprite = assets.creature(&creature.sprite);
            self.image(&sprite, creature.pos, creature.flip);
            if creature.can_interact && creature.is_hovered {
                let at = creature.pos - Vec2::new(0.0, 70.0);
                self.centered_text(HOVER_PROMPT, at, FontSize::Normal, colors::WHITE);
            }
        }

        self.image(&assets.player, state.player.pos, false);
    }

    fn collision_circles(&mut self, state: &GameState) {
        self.circle(state.player.pos, 5.0, colors::PLAYER_MARKER);
        self.ring(state.player.pos, INTERACTION_RADIUS, colors::INTERACTION_RING, 1.0);
        for creature in state.creatures.iter().filter(|c| !c.visited) {
            self.ring(creature.pos, HOVER_RADIUS, colors::HOVER_RING, 1.0);
        }
    }

    fn hud(&mut self, state: &GameState, fps: Option<f32>) {
        let lines = [
            format!("Stars: {}/{}", state.stars(), state.total_creatures()),
            format!("Bubbles popped: {}", state.bubbles_popped),
            format!("Clues: {}/{}", state.clues_found, state.clues.len()),
            format!("Time: {}", format_time(state.elapsed_secs())),
        ];
        for (i, line) in lines.into_iter().enumerate() {
            let pos = Vec2::new(20.0, 20.0 + i as f32 * 30.0);
            self.text(line, pos, FontSize::Normal, colors::WHITE);
        }
        if let Some(fps) = fps {
            let text = format!("FPS: {:.0}", fps);
            let width = self.renderer.measure_text(&text, FontSize::Small);
            let pos = Vec2::new(SCREEN_WIDTH - width - 20.0, 20.0);
            self.text(text, pos, FontSize::Small, colors::WHITE);
        }
    }

    fn quiz(&mut self, state: &GameState, now: f32) {
        self.commands.push(DrawCommand::Overlay { color: colors::DIM });

        if let Some(creature) = state.current_creature() {
            let at = Vec2::new(SCREEN_WIDTH / 2.0, 110.0);
            self.centered_text(creature.name.as_str(), at, FontSize::Large, colors::WHITE);
        }

        let question_box = Rect::new(SCREEN_WIDTH / 2.0 - 300.0, 150.0, 600.0, 150.0);
        self.rect(question_box, colors::WHITE, 15.0);
        self.outline(question_box, colors::BLACK, 15.0, 2.0);
        if let Some(question) = state.current_question() {
            let at = Vec2::new(SCREEN_WIDTH / 2.0, 220.0 + FontSize::Normal.px() / 2.0);
            self.centered_text(question.prompt.as_str(), at, FontSize::Normal, colors::BLACK);
        }

        let now_ms = now * 1000.0;
        for button in &state.answer_buttons {
            let mut shadow = button.rect;
            shadow.y += 5.0;
            self.rect(shadow, colors::DIM, 15.0);
            self.rect(button.rect, rgb(button.display_color()), 15.0);

            let center = button.rect.center();
            self.centered_text(
                button.label.as_str(),
                center + Vec2::ONE,
                FontSize::Normal,
                colors::SHADOW,
            );
            self.centered_text(button.label.as_str(), center, FontSize::Normal, colors::BLACK);

            if button.highlight == ButtonHighlight::Correct {
                let radius = 20.0 + (now_ms * 0.01).sin() * 5.0;
                for i in 0..5 {
                    let angle = ((now_ms * 0.01 + i as f32 * 72.0) % 360.0).to_radians();
                    let at = center + Vec2::new(angle.cos(), angle.sin()) * radius;
                    self.circle(at, 3.0, colors::YELLOW);
                }
            }
        }
    }

    /// Dialog with wrapped large text and a prompt along the bottom
    fn message_box(&mut self, message: &str, prompt: &str) {
        self.commands.push(DrawCommand::Overlay { color: colors::DIM });

        let rect = Rect::new(
            SCREEN_WIDTH / 2.0 - 250.0,
            SCREEN_HEIGHT / 2.0 - 150.0,
            500.0,
            300.0,
        );
        self.dialog(rect);

        let renderer = self.renderer;
        let lines = word_wrap(message, rect.w - 2.0 * BOX_PADDING, |s| {
            renderer.measure_text(s, FontSize::Large)
        });
        let mut y = rect.y + 30.0;
        for line in lines {
            let at = Vec2::new(SCREEN_WIDTH / 2.0, y + FontSize::Large.px() / 2.0);
            self.centered_text(line, at, FontSize::Large, colors::BLACK);
            y += LINE_HEIGHT;
        }

        let at = Vec2::new(SCREEN_WIDTH / 2.0, rect.y + rect.h - 50.0);
        self.centered_text(prompt, at, FontSize::Normal, colors::CONTINUE_PROMPT);
    }

    fn game_over(&mut self, state: &GameState) {
        let summary = format!(
            "{} {} stars in {}. Bubbles popped: {}. Clues found: {}.",
            GAME_OVER_TITLE,
            state.stars(),
            format_time(state.elapsed_secs()),
            state.bubbles_popped,
            state.clues_found
        );
        self.message_box(&summary, PLAY_AGAIN_PROMPT);
    }

    fn effects(&mut self, state: &GameState) {
        for effect in &state.effects {
            for p in effect.particles.iter().filter(|p| p.alive()) {
                self.circle(p.pos, 3.0, with_alpha(p.color, p.alpha()));
            }
        }
    }
}

/// Build the draw list for the current frame
pub fn build_scene<R: Renderer + ?Sized>(
    state: &GameState,
    assets: &SceneAssets,
    settings: &Settings,
    renderer: &R,
    fps: Option<f32>,
) -> Vec<DrawCommand> {
    let now = state.elapsed_secs();
    let mut scene = SceneBuilder {
        renderer,
        commands: Vec::with_capacity(128),
    };

    scene.background(assets);
    scene.world(state, assets, now);
    if settings.show_collision_circles {
        scene.collision_circles(state);
    }
    scene.hud(state, fps.filter(|_| settings.show_fps));

    match state.mode {
        GameMode::Explore => {}
        GameMode::Quiz => scene.quiz(state, now),
        GameMode::Reward => scene.message_box(&state.result_message, CONTINUE_PROMPT),
        GameMode::GameOver => scene.game_over(state),
    }

    scene.effects(state);
    scene.commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetProvider;
    use crate::content::Roster;
    use crate::renderer::NullRenderer;
    use crate::settings::Rules;
    use crate::sim::{DebugCommand, TickInput, tick};

    fn setup() -> (GameState, SceneAssets, Rules) {
        let rules = Rules {
            debug_commands: true,
            ..Rules::default()
        };
        let roster = Roster::builtin().unwrap();
        let assets = SceneAssets::load(&AssetProvider::new("/nonexistent/assets"), &roster);
        (GameState::new(3, roster, &rules), assets, rules)
    }

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn force_next(state: &mut GameState, rules: &Rules) {
        let input = TickInput {
            debug: Some(DebugCommand::ForceNextMode),
            ..Default::default()
        };
        tick(state, &input, rules);
    }

    #[test]
    fn test_word_wrap() {
        let measure = |s: &str| s.len() as f32 * 10.0;
        let lines = word_wrap("Amazing! You've discovered something new!", 200.0, measure);
        assert_eq!(lines, ["Amazing! You've", "discovered something", "new!"]);
        assert!(word_wrap("   ", 100.0, measure).is_empty());
        assert_eq!(word_wrap("Supercalifragilistic", 50.0, measure), ["Supercalifragilistic"]);
    }

    #[test]
    fn test_explore_scene() {
        let (state, assets, _) = setup();
        let settings = Settings::default();
        let commands = build_scene(&state, &assets, &settings, &NullRenderer::default(), None);

        assert!(matches!(commands[0], DrawCommand::Seabed { .. }));
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Overlay { .. })));
        let creature_images = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { placeholder: Some(_), .. }))
            .count();
        // Five creatures plus the player
        assert_eq!(creature_images, 6);
        assert!(texts(&commands).contains(&"Stars: 0/5"));
        assert!(texts(&commands).contains(&"Time: 00:00"));
    }

    #[test]
    fn test_quiz_and_reward_scenes() {
        let (mut state, assets, rules) = setup();
        let settings = Settings::default();
        let renderer = NullRenderer::default();

        force_next(&mut state, &rules);
        assert_eq!(state.mode, GameMode::Quiz);
        let commands = build_scene(&state, &assets, &settings, &renderer, None);
        let shown = texts(&commands);
        let question = state.current_question().unwrap();
        assert!(shown.contains(&question.prompt.as_str()));
        assert!(shown.contains(&state.current_creature().unwrap().name.as_str()));
        for answer in &question.answers {
            assert!(shown.contains(&answer.as_str()));
        }
        assert!(commands.iter().any(|c| matches!(c, DrawCommand::Overlay { .. })));

        force_next(&mut state, &rules);
        assert_eq!(state.mode, GameMode::Reward);
        let commands = build_scene(&state, &assets, &settings, &renderer, None);
        assert!(texts(&commands).contains(&CONTINUE_PROMPT));
    }

    #[test]
    fn test_game_over_scene_and_visited_hidden() {
        let (mut state, assets, rules) = setup();
        state.creatures[0].visited = true;
        let input = TickInput {
            debug: Some(DebugCommand::ForceGameOver),
            ..Default::default()
        };
        tick(&mut state, &input, &rules);
        let commands = build_scene(&state, &assets, &Settings::default(), &NullRenderer::default(), None);

        assert!(texts(&commands).contains(&PLAY_AGAIN_PROMPT));
        let images = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { .. }))
            .count();
        assert_eq!(images, 5);
    }

    #[test]
    fn test_debug_overlays_follow_settings() {
        let (state, assets, _) = setup();
        let renderer = NullRenderer::default();
        let plain = build_scene(&state, &assets, &Settings::default(), &renderer, Some(60.0));
        let debug = Settings {
            show_collision_circles: true,
            show_fps: true,
            ..Default::default()
        };
        let annotated = build_scene(&state, &assets, &debug, &renderer, Some(60.0));

        assert!(!texts(&plain).contains(&"FPS: 60"));
        assert!(texts(&annotated).contains(&"FPS: 60"));
        // FPS line, player marker, interaction ring, one hover ring per creature
        assert_eq!(annotated.len(), plain.len() + 1 + 1 + 1 + 5);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(125.9), "02:05");
    }
}
