//! Neon Breakout - a brick-breaking arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, bricks, bonuses)
//! - `states`: Menu/playing/pause/game-over screen machine
//! - `renderer`: Render snapshots and GPU instance records
//! - `audio`: Sound effect triggers and sinks
//! - `highscores`, `persistence`: JSON-backed leaderboard
//! - `config`: Game tunables

pub mod audio;
pub mod config;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod states;

pub use audio::{AudioManager, AudioSink, LogAudio, NullAudio, SoundEffect};
pub use config::GameConfig;
pub use highscores::HighScores;
pub use states::{GameContext, InputAction, StateId, StateManager};

/// Loop timing
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
}
