//! Game tunables
//!
//! Loaded once at startup from an optional JSON file. Every field has a
//! default, so a partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::sim::BonusKind;

/// Static game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Play field ===
    pub window_width: f32,
    pub window_height: f32,
    /// Thickness of the left/right/top walls
    pub wall_thickness: f32,

    // === Session ===
    pub initial_lives: u32,

    // === Paddle ===
    /// Pixels per frame while a direction is held
    pub paddle_speed: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle's top edge and the bottom of the play field
    pub paddle_bottom_margin: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Level 1 speed (pixels per frame)
    pub base_ball_speed: f32,
    /// Hard cap; keeps per-frame travel below paddle/brick thickness
    pub max_ball_speed: f32,
    pub speed_increase_per_level: f32,

    // === Bricks ===
    pub brick_rows: usize,
    pub brick_cols: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_top: f32,

    // === Bonuses ===
    pub enable_bonuses: bool,
    /// Chance (0-1) that a destroyed brick drops a bonus
    pub bonus_drop_chance: f32,
    /// Pixels per frame
    pub bonus_fall_speed: f32,
    pub paddle_expand_multiplier: f32,
    pub paddle_shrink_multiplier: f32,
    /// Seconds
    pub expand_paddle_duration: f32,
    pub shrink_paddle_duration: f32,
    pub fire_ball_duration: f32,

    // === Physics ===
    /// Minimum |vy| after a paddle bounce, as a fraction of speed
    pub min_vertical_speed_ratio: f32,
    /// Bounce angle from vertical at the paddle's extreme edges (degrees)
    pub max_bounce_angle_deg: f32,

    // === High scores ===
    pub max_high_scores: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 900.0,
            window_height: 600.0,
            wall_thickness: 3.0,

            initial_lives: 3,

            paddle_speed: 10.0,
            paddle_width: 120.0,
            paddle_height: 10.0,
            paddle_bottom_margin: 40.0,

            ball_radius: 15.0,
            base_ball_speed: 50f32.sqrt(), // |(5, -5)|
            max_ball_speed: 12.0,
            speed_increase_per_level: 0.7,

            brick_rows: 5,
            brick_cols: 10,
            brick_width: 55.0,
            brick_height: 20.0,
            brick_padding: 5.0,
            brick_offset_top: 60.0,

            enable_bonuses: true,
            bonus_drop_chance: 0.20,
            bonus_fall_speed: 3.0,
            paddle_expand_multiplier: 1.5,
            paddle_shrink_multiplier: 0.7,
            expand_paddle_duration: 15.0,
            shrink_paddle_duration: 10.0,
            fire_ball_duration: 10.0,

            min_vertical_speed_ratio: 0.35,
            max_bounce_angle_deg: 75.0,

            max_high_scores: 10,
        }
    }
}

impl GameConfig {
    /// Target ball speed for a 1-based level number
    pub fn ball_speed_for_level(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.base_ball_speed + steps * self.speed_increase_per_level).min(self.max_ball_speed)
    }

    pub fn max_bounce_angle(&self) -> f32 {
        self.max_bounce_angle_deg.to_radians()
    }

    /// Effect duration in seconds (0 = instantaneous / permanent)
    pub fn bonus_duration(&self, kind: BonusKind) -> f32 {
        match kind {
            BonusKind::ExpandPaddle => self.expand_paddle_duration,
            BonusKind::ShrinkPaddle => self.shrink_paddle_duration,
            BonusKind::FireBall => self.fire_ball_duration,
            BonusKind::ExtraLife | BonusKind::MultiBall => 0.0,
        }
    }

    /// Left offset that centers the brick grid horizontally
    pub fn brick_offset_left(&self) -> f32 {
        let cols = self.brick_cols as f32;
        let gaps = self.brick_cols.saturating_sub(1) as f32;
        let total = cols * self.brick_width + gaps * self.brick_padding;
        ((self.window_width - total) / 2.0).floor()
    }

    /// Parse a (possibly partial) JSON config
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match persistence::load_json::<Self>(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Using default config ({e:#})");
                Self::default()
            }
        }
    }
}
