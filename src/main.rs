//! Ocean Explorer entry point
//!
//! Runs a headless session driven by the autopilot: the full frame loop
//! (tick, audio, scene build, instance packing) without a window.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ocean_explorer::assets::{AssetProvider, SceneAssets};
use ocean_explorer::audio::{AudioManager, LogSink, SoundBank};
use ocean_explorer::consts::TICKS_PER_SECOND;
use ocean_explorer::renderer::{NullRenderer, Renderer, build_scene, vertex};
use ocean_explorer::sim::autopilot::DEFAULT_ACCURACY;
use ocean_explorer::sim::{Autopilot, GameEvent, GameMode, GameState, tick};
use ocean_explorer::settings::QualityPreset;
use ocean_explorer::{Roster, Settings};

/// Ocean Explorer - headless autopilot session
#[derive(Parser)]
#[command(name = "ocean-explorer")]
#[command(about = "Explore the ocean and quiz its creatures", long_about = None)]
#[command(version)]
struct Cli {
    /// Session seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Settings JSON file
    #[arg(long, default_value = "ocean-explorer.json")]
    settings: PathBuf,

    /// Override the quality preset (low, medium, high)
    #[arg(long, value_parser = parse_quality)]
    quality: Option<QualityPreset>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_settings: bool,

    /// Creature roster JSON (built-in roster if omitted)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Stop after this many ticks even if the game is not over
    #[arg(long, default_value_t = TICKS_PER_SECOND * 60 * 10)]
    max_ticks: u64,

    /// Chance the autopilot answers correctly (0.0 - 1.0)
    #[arg(long, default_value_t = DEFAULT_ACCURACY, value_parser = parse_accuracy)]
    accuracy: f64,
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::parse(s).ok_or_else(|| format!("unknown quality preset '{s}'"))
}

fn parse_accuracy(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not between 0.0 and 1.0"))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Ocean Explorer (native) starting...");

    let mut settings = Settings::load_from(&cli.settings);
    if let Some(preset) = cli.quality {
        settings.apply_preset(preset);
    }
    log::info!("Quality: {}", settings.quality.as_str());
    if cli.save_settings {
        settings.save_to(&cli.settings);
    }
    let rules = settings.rules();

    let roster = match &cli.roster {
        Some(path) => Roster::load(path)
            .with_context(|| format!("loading roster {}", path.display()))?,
        None => Roster::builtin().context("loading built-in roster")?,
    };

    let provider = AssetProvider::new(&settings.asset_root);
    let assets = SceneAssets::load(&provider, &roster);
    let mut audio = AudioManager::new(LogSink, SoundBank::load(&provider));
    audio.apply_settings(&settings);
    let mut renderer = NullRenderer::default();

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut state = GameState::new(seed, roster, &rules);
    let mut pilot = Autopilot::new(seed, cli.accuracy);

    let mut wrong_answers = 0;
    let mut peak_instances = 0;
    let mut uploaded_bytes = 0;

    while state.mode != GameMode::GameOver && state.time_ticks < cli.max_ticks {
        let input = pilot.next_input(&state);
        tick(&mut state, &input, &rules);

        let events = state.drain_events();
        for event in &events {
            match event {
                GameEvent::CreatureDiscovered { creature } => {
                    log::info!(
                        "Discovered {} ({}/{})",
                        state.creatures[*creature].name,
                        state.stars(),
                        state.total_creatures()
                    );
                }
                GameEvent::WrongAnswer { .. } => wrong_answers += 1,
                _ => {}
            }
        }
        audio.handle_events(&events);

        let commands = build_scene(&state, &assets, &settings, &renderer, Some(TICKS_PER_SECOND as f32));
        let instances = vertex::pack_shapes(&commands);
        let uniform = vertex::FrameUniform::new(state.elapsed_secs(), instances.len());
        uploaded_bytes += vertex::frame_bytes(&uniform, &instances).len();
        peak_instances = peak_instances.max(instances.len());
        renderer.submit(&commands);
    }

    if state.mode == GameMode::GameOver {
        println!(
            "Found all {} creatures in {:.1}s",
            state.total_creatures(),
            state.elapsed_secs()
        );
    } else {
        println!(
            "Stopped after {} ticks with {}/{} stars",
            state.time_ticks,
            state.stars(),
            state.total_creatures()
        );
    }
    println!("  seed:           {}", seed);
    println!("  discoveries:    {}", state.progress.visited_count());
    println!("  wrong answers:  {}", wrong_answers);
    println!("  bubbles popped: {}", state.bubbles_popped);
    println!("  clues found:    {}", state.clues_found);
    println!("  frames drawn:   {} (peak {} shapes)", renderer.frames, peak_instances);
    println!("  uploaded:       {} KiB", uploaded_bytes / 1024);

    Ok(())
}
