//! Neon Breakout headless runner
//!
//! Drives the full state machine at the fixed tick with the autopilot on the
//! paddle, plays sounds through the log, and records the final score.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use neon_breakout::consts::SIM_DT;
use neon_breakout::sim::{GameEvent, TickInput};
use neon_breakout::{
    AudioManager, GameConfig, GameContext, HighScores, InputAction, LogAudio, StateId,
    StateManager,
};

#[derive(Parser, Debug)]
#[command(name = "neon-breakout")]
#[command(about = "Headless Neon Breakout run with an autopilot paddle")]
struct Cli {
    /// RNG seed (same seed, same run)
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Stop after this many ticks
    #[arg(long, default_value_t = 36_000)]
    frames: u64,
    /// JSON config overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// High score table location
    #[arg(long, default_value = "highscores.json")]
    scores: PathBuf,
    /// Master volume (0.0 - 1.0)
    #[arg(long, default_value_t = 0.8)]
    volume: f32,
    /// Don't log sound effects
    #[arg(long)]
    mute: bool,
}

/// What a player would press on each screen
fn scripted_action(state: StateId, games_finished: u32) -> Option<InputAction> {
    match state {
        StateId::MainMenu if games_finished == 0 => Some(InputAction::Confirm),
        // Back on the main menu after a game: quit
        StateId::MainMenu => Some(InputAction::Back),
        StateId::HighScores | StateId::LevelTransition | StateId::GameOver => {
            Some(InputAction::Confirm)
        }
        StateId::Paused => Some(InputAction::Back),
        StateId::Playing => None,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::info!("Neon Breakout (headless) starting, seed {}", cli.seed);

    let config = match &cli.config {
        Some(path) => GameConfig::load(path),
        None => GameConfig::default(),
    };
    let high_scores = HighScores::load_from(&cli.scores, config.max_high_scores);

    let mut ctx = GameContext::new(config, cli.seed, high_scores);
    ctx.scores_path = Some(cli.scores.clone());
    let mut states = StateManager::new();
    states.start(&mut ctx);

    let mut audio = AudioManager::new(Box::new(LogAudio));
    audio.set_master_volume(cli.volume);
    audio.set_muted(cli.mute);

    let held = TickInput {
        autopilot: true,
        ..TickInput::default()
    };
    let mut games_finished = 0;
    let mut frames = 0;

    while ctx.running && frames < cli.frames {
        let state = states.current();
        if let Some(action) = scripted_action(state, games_finished) {
            if state == StateId::GameOver {
                games_finished += 1;
            }
            states.handle_input(&mut ctx, action);
        }
        states.update(&mut ctx, &held, SIM_DT);

        for event in ctx.session.drain_events() {
            match event {
                GameEvent::Sound(effect) => audio.play(effect),
                other => log::trace!("{other:?}"),
            }
        }
        frames += 1;
    }

    // Out of ticks mid-game: end it so the score is still recorded
    match states.current() {
        StateId::Playing | StateId::Paused | StateId::LevelTransition => {
            states.change_state(&mut ctx, StateId::GameOver);
            states.handle_input(&mut ctx, InputAction::Confirm);
        }
        StateId::GameOver => states.handle_input(&mut ctx, InputAction::Confirm),
        StateId::MainMenu | StateId::HighScores => {}
    }

    let best = ctx.high_scores.top_score().unwrap_or(0);
    log::info!(
        "Finished after {} ticks: score {}, level {}, best {}, {} sounds",
        frames,
        ctx.session.score,
        ctx.session.level,
        best,
        audio.played()
    );
    println!(
        "score={} level={} best={}",
        ctx.session.score, ctx.session.level, best
    );
    Ok(())
}
