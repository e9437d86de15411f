//! Read-only views of the session for whatever draws the game
//!
//! Nothing here holds a reference into the simulation; a snapshot is plain
//! data built once per frame.

use glam::Vec2;

use super::vertex::{RectInstance, colors, rgba};
use crate::sim::{BonusKind, BrickKind, GameSession, Rect, Rgb};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickView {
    pub rect: Rect,
    pub kind: BrickKind,
    pub color: Rgb,
    pub hp_ratio: f32,
    /// Horizontal draw offset while shaking
    pub shake_offset: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusView {
    pub rect: Rect,
    pub kind: BonusKind,
    pub color: Rgb,
    pub icon: &'static str,
}

/// An active effect with its time left (0 for permanent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectView {
    pub kind: BonusKind,
    pub remaining: f32,
}

/// Heads-up display data
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    /// Ball speed relative to level 1
    pub speed_ratio: f32,
    pub effects: Vec<EffectView>,
}

impl From<&GameSession> for Hud {
    fn from(session: &GameSession) -> Self {
        Self {
            score: session.score,
            lives: session.lives,
            level: session.level,
            speed_ratio: session.speed_ratio(),
            effects: session
                .bonuses
                .active_effects()
                .iter()
                .map(|e| EffectView {
                    kind: e.kind,
                    remaining: e.remaining(session.clock),
                })
                .collect(),
        }
    }
}

/// Everything visible in the play field
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSnapshot {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    pub paddle: Rect,
    pub balls: Vec<BallView>,
    pub fire_ball: bool,
    /// Visible bricks only
    pub bricks: Vec<BrickView>,
    pub bonuses: Vec<BonusView>,
    pub shake_offset: Vec2,
}

impl From<&GameSession> for WorldSnapshot {
    fn from(session: &GameSession) -> Self {
        Self {
            width: session.config.window_width,
            height: session.config.window_height,
            wall_thickness: session.config.wall_thickness,
            paddle: session.paddle.rect,
            balls: session
                .balls
                .iter()
                .map(|b| BallView {
                    center: b.center(),
                    radius: b.radius,
                })
                .collect(),
            fire_ball: session.bonuses.has_active(BonusKind::FireBall),
            bricks: session
                .bricks
                .iter()
                .filter(|b| b.visible)
                .map(|b| BrickView {
                    rect: b.rect,
                    kind: b.kind,
                    color: b.color,
                    hp_ratio: b.hp_ratio(),
                    shake_offset: b.shake_offset,
                })
                .collect(),
            bonuses: session
                .bonuses
                .bonuses()
                .iter()
                .map(|b| {
                    let spec = b.kind.spec();
                    BonusView {
                        rect: b.rect(),
                        kind: b.kind,
                        color: spec.color,
                        icon: spec.icon,
                    }
                })
                .collect(),
            shake_offset: session.shake.offset,
        }
    }
}

impl WorldSnapshot {
    /// Flatten into rectangles (walls, bricks, bonuses, paddle, balls),
    /// all shifted by the screen shake
    pub fn instances(&self) -> Vec<RectInstance> {
        let (dx, dy) = (self.shake_offset.x, self.shake_offset.y);
        let shifted = |r: &Rect, extra_x: f32| Rect::new(r.x + dx + extra_x, r.y + dy, r.w, r.h);
        let t = self.wall_thickness;

        let mut out =
            Vec::with_capacity(self.bricks.len() + self.bonuses.len() + self.balls.len() + 4);
        for wall in [
            Rect::new(0.0, 0.0, t, self.height),
            Rect::new(self.width - t, 0.0, t, self.height),
            Rect::new(0.0, 0.0, self.width, t),
        ] {
            out.push(RectInstance::from_rect(&shifted(&wall, 0.0), colors::WALL));
        }
        for brick in &self.bricks {
            out.push(RectInstance::from_rect(
                &shifted(&brick.rect, brick.shake_offset),
                rgba(brick.color, 1.0),
            ));
        }
        for bonus in &self.bonuses {
            out.push(RectInstance::from_rect(
                &shifted(&bonus.rect, 0.0),
                rgba(bonus.color, 1.0),
            ));
        }
        out.push(RectInstance::from_rect(&shifted(&self.paddle, 0.0), colors::PADDLE));

        let ball_color = if self.fire_ball {
            colors::FIRE_BALL
        } else {
            colors::BALL
        };
        for ball in &self.balls {
            let r = Rect::from_center(ball.center, ball.radius * 2.0, ball.radius * 2.0);
            out.push(RectInstance::from_rect(&shifted(&r, 0.0), ball_color));
        }
        out
    }
}
