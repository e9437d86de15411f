//! Falling bonuses and timed effects

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::brick::Rgb;
use super::rect::Rect;
use crate::config::GameConfig;

/// Bonus types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    ExpandPaddle,
    ShrinkPaddle,
    ExtraLife,
    /// Ball passes through destroyable bricks
    FireBall,
    MultiBall,
}

/// Static per-kind data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusSpec {
    /// Relative drop weight
    pub weight: u32,
    pub color: Rgb,
    pub icon: &'static str,
    /// Timed effects go into the active set; the rest apply once
    pub timed: bool,
    /// Multiplier on ball displacement while active
    pub ball_speed_factor: f32,
}

impl BonusKind {
    pub const ALL: [BonusKind; 5] = [
        BonusKind::ExpandPaddle,
        BonusKind::ShrinkPaddle,
        BonusKind::ExtraLife,
        BonusKind::FireBall,
        BonusKind::MultiBall,
    ];

    pub const fn spec(self) -> BonusSpec {
        match self {
            BonusKind::ExpandPaddle => BonusSpec {
                weight: 25,
                color: [57, 255, 20],
                icon: "▬",
                timed: true,
                ball_speed_factor: 1.0,
            },
            BonusKind::ShrinkPaddle => BonusSpec {
                weight: 15,
                color: [255, 100, 0],
                icon: "▭",
                timed: true,
                ball_speed_factor: 1.0,
            },
            BonusKind::ExtraLife => BonusSpec {
                weight: 10,
                color: [255, 20, 147],
                icon: "♥",
                timed: false,
                ball_speed_factor: 1.0,
            },
            BonusKind::FireBall => BonusSpec {
                weight: 25,
                color: [255, 0, 0],
                icon: "🔥",
                timed: true,
                ball_speed_factor: 1.0,
            },
            BonusKind::MultiBall => BonusSpec {
                weight: 25,
                color: [255, 255, 0],
                icon: "●●",
                timed: false,
                ball_speed_factor: 1.0,
            },
        }
    }

    /// The effect this one cancels on activation
    pub fn opposite(self) -> Option<BonusKind> {
        match self {
            BonusKind::ExpandPaddle => Some(BonusKind::ShrinkPaddle),
            BonusKind::ShrinkPaddle => Some(BonusKind::ExpandPaddle),
            _ => None,
        }
    }

    /// Weighted pick over the static table
    pub fn pick<R: Rng>(rng: &mut R) -> BonusKind {
        Self::ALL
            .choose_weighted(rng, |k| k.spec().weight)
            .copied()
            .unwrap_or(BonusKind::MultiBall)
    }
}

/// Pickup size in pixels
pub const BONUS_WIDTH: f32 = 40.0;
pub const BONUS_HEIGHT: f32 = 20.0;

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub kind: BonusKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per frame
    pub speed: f32,
}

impl Bonus {
    /// Spawn horizontally centered on `center`, top edge at its y
    pub fn new(kind: BonusKind, center: Vec2, speed: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(center.x - BONUS_WIDTH / 2.0, center.y),
            speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BONUS_WIDTH, BONUS_HEIGHT)
    }

    /// Fall one frame; returns false once the pickup has left the field
    pub fn update(&mut self, field_height: f32) -> bool {
        self.pos.y += self.speed;
        self.pos.y < field_height
    }
}

/// A running timed effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: BonusKind,
    /// Seconds; 0 means it never expires
    pub duration: f32,
    /// Session clock at activation
    pub start: f32,
}

impl ActiveEffect {
    pub fn new(kind: BonusKind, duration: f32, start: f32) -> Self {
        Self {
            kind,
            duration,
            start,
        }
    }

    pub fn is_permanent(&self) -> bool {
        self.duration == 0.0
    }

    /// Seconds left at `now` (0 for permanent effects)
    pub fn remaining(&self, now: f32) -> f32 {
        if self.is_permanent() {
            return 0.0;
        }
        (self.duration - (now - self.start)).max(0.0)
    }

    pub fn is_expired(&self, now: f32) -> bool {
        !self.is_permanent() && self.remaining(now) <= 0.0
    }
}

/// Falling pickups plus the active effect set
#[derive(Debug, Clone)]
pub struct BonusManager {
    bonuses: Vec<Bonus>,
    effects: Vec<ActiveEffect>,
    enabled: bool,
    drop_chance: f32,
    fall_speed: f32,
    expand_multiplier: f32,
    shrink_multiplier: f32,
}

impl BonusManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            bonuses: Vec::new(),
            effects: Vec::new(),
            enabled: config.enable_bonuses,
            drop_chance: config.bonus_drop_chance,
            fall_speed: config.bonus_fall_speed,
            expand_multiplier: config.paddle_expand_multiplier,
            shrink_multiplier: config.paddle_shrink_multiplier,
        }
    }

    /// Roll for a drop at `center`
    pub fn roll_drop<R: Rng>(&self, center: Vec2, rng: &mut R) -> Option<Bonus> {
        if !self.enabled || rng.random::<f32>() >= self.drop_chance {
            return None;
        }
        Some(Bonus::new(BonusKind::pick(rng), center, self.fall_speed))
    }

    /// Drop without rolling (bonus bricks)
    pub fn guaranteed_drop<R: Rng>(&self, center: Vec2, rng: &mut R) -> Option<Bonus> {
        if !self.enabled {
            return None;
        }
        Some(Bonus::new(BonusKind::pick(rng), center, self.fall_speed))
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    /// Move pickups down and drop those past the bottom
    pub fn update(&mut self, field_height: f32) {
        self.bonuses.retain_mut(|b| b.update(field_height));
    }

    pub fn purge_expired(&mut self, now: f32) {
        self.effects.retain(|e| !e.is_expired(now));
    }

    /// Remove and return every pickup touching the paddle
    pub fn check_collection(&mut self, paddle: &Rect) -> Vec<Bonus> {
        let (collected, remaining): (Vec<Bonus>, Vec<Bonus>) = std::mem::take(&mut self.bonuses)
            .into_iter()
            .partition(|b| b.rect().intersects(paddle));
        self.bonuses = remaining;
        collected
    }

    /// Start the effect of a collected bonus
    ///
    /// Only timed kinds touch the active set; the session applies extra
    /// lives and multi-ball itself.
    pub fn apply(&mut self, kind: BonusKind, duration: f32, now: f32) {
        if !kind.spec().timed || duration <= 0.0 {
            return;
        }
        if let Some(opposite) = kind.opposite() {
            self.effects.retain(|e| e.kind != opposite);
        }
        self.effects.push(ActiveEffect::new(kind, duration, now));
    }

    pub fn has_active(&self, kind: BonusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Paddle width multiplier from the active set
    pub fn paddle_modifier(&self) -> f32 {
        if self.has_active(BonusKind::ExpandPaddle) {
            self.expand_multiplier
        } else if self.has_active(BonusKind::ShrinkPaddle) {
            self.shrink_multiplier
        } else {
            1.0
        }
    }

    /// Ball displacement multiplier from the active set
    pub fn ball_speed_modifier(&self) -> f32 {
        self.effects
            .iter()
            .map(|e| e.kind.spec().ball_speed_factor)
            .product()
    }

    pub fn bonuses(&self) -> &[Bonus] {
        &self.bonuses
    }

    pub fn active_effects(&self) -> &[ActiveEffect] {
        &self.effects
    }

    /// Drop every pickup and effect
    pub fn clear(&mut self) {
        self.bonuses.clear();
        self.effects.clear();
    }
}
