//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-frame movement only, `dt` drives timers
//! - Seeded RNG only
//! - Stable iteration order (layout order for bricks, spawn order for balls)
//! - No rendering or platform dependencies

pub mod bonus;
pub mod brick;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use bonus::{ActiveEffect, Bonus, BonusKind, BonusManager, BonusSpec};
pub use brick::{Brick, BrickKind, BrickSpec, Destruction, HitOutcome, LevelLayout, Rgb};
pub use collision::{
    BounceAxis, PhysicsParams, bounce_off_brick, find_brick_hit, handle_paddle_collision,
    handle_wall_collision, is_ball_lost, normalized_offset, paddle_bounce_velocity,
};
pub use rect::Rect;
pub use state::{Ball, GameEvent, GameSession, Paddle, ScreenShake};
pub use tick::{TickInput, TickOutcome, tick};
