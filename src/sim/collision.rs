//! Collision detection and response
//!
//! Discrete per-frame checks between the ball's bounding square and
//! axis-aligned rectangles. Bounces only ever flip or re-aim the velocity,
//! so the ball's speed is preserved through every contact.

use glam::Vec2;

use super::brick::Brick;
use super::rect::Rect;
use super::state::Ball;
use crate::config::GameConfig;

/// Play-field geometry and bounce tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    /// Minimum |vy| after a paddle bounce, as a fraction of speed
    pub min_vertical_ratio: f32,
    /// Radians from vertical at the paddle edges
    pub max_bounce_angle: f32,
}

impl PhysicsParams {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            width: config.window_width,
            height: config.window_height,
            wall_thickness: config.wall_thickness,
            min_vertical_ratio: config.min_vertical_speed_ratio,
            max_bounce_angle: config.max_bounce_angle(),
        }
    }
}

/// Which velocity component a brick bounce flipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    Horizontal,
    Vertical,
}

/// Reflect off the side and top walls
///
/// Returns the number of walls touched (a corner counts twice).
pub fn handle_wall_collision(ball: &mut Ball, params: &PhysicsParams) -> u32 {
    let mut contacts = 0;
    let wall = params.wall_thickness;

    if ball.left() <= wall {
        ball.set_left(wall);
        ball.vel.x = ball.vel.x.abs();
        contacts += 1;
    } else if ball.right() >= params.width - wall {
        ball.set_right(params.width - wall);
        ball.vel.x = -ball.vel.x.abs();
        contacts += 1;
    }

    if ball.top() <= wall {
        ball.set_top(wall);
        ball.vel.y = ball.vel.y.abs();
        contacts += 1;
    }

    contacts
}

/// Where the ball struck the paddle: -1 at the left edge, 1 at the right
pub fn normalized_offset(ball: &Ball, paddle: &Rect) -> f32 {
    let half = paddle.w / 2.0;
    if half <= 0.0 {
        return 0.0;
    }
    ((ball.center().x - paddle.center_x()) / half).clamp(-1.0, 1.0)
}

/// Outgoing velocity for a paddle hit at `offset` (see [`normalized_offset`])
///
/// The angle from vertical grows linearly with the offset. Shallow results
/// are steepened to the minimum vertical ratio with the speed kept intact.
pub fn paddle_bounce_velocity(speed: f32, offset: f32, params: &PhysicsParams) -> Vec2 {
    let angle = offset.clamp(-1.0, 1.0) * params.max_bounce_angle;
    let mut vx = speed * angle.sin();
    let mut vy = -(speed * angle.cos()).abs();

    let min_vy = params.min_vertical_ratio * speed;
    if vy.abs() < min_vy {
        vy = -min_vy;
        let sign = if vx > 0.0 { 1.0 } else { -1.0 };
        vx = sign * (speed * speed - vy * vy).max(0.0).sqrt();
    }

    Vec2::new(vx, vy)
}

/// Bounce off the paddle if the ball is overlapping it on the way down
pub fn handle_paddle_collision(ball: &mut Ball, paddle: &Rect, params: &PhysicsParams) -> bool {
    if ball.vel.y <= 0.0 || !ball.rect().intersects(paddle) {
        return false;
    }

    ball.set_bottom(paddle.top());
    let offset = normalized_offset(ball, paddle);
    let v = paddle_bounce_velocity(ball.vel.length(), offset, params);
    ball.set_velocity(v.x, v.y);
    true
}

/// First visible brick (in layout order) the ball overlaps
pub fn find_brick_hit(ball: &Rect, bricks: &[Brick]) -> Option<usize> {
    bricks
        .iter()
        .position(|b| b.visible && ball.intersects(&b.rect))
}

/// Push the ball out of `brick` along the shallower axis and reflect
///
/// Equal overlap resolves vertically.
pub fn bounce_off_brick(ball: &mut Ball, brick: &Rect) -> BounceAxis {
    let (overlap_x, overlap_y) = ball.rect().overlap(brick);

    if overlap_x < overlap_y {
        ball.bounce_x();
        if ball.center().x < brick.center_x() {
            ball.set_right(brick.left());
        } else {
            ball.set_left(brick.right());
        }
        BounceAxis::Horizontal
    } else {
        ball.bounce_y();
        if ball.center().y < brick.center_y() {
            ball.set_bottom(brick.top());
        } else {
            ball.set_top(brick.bottom());
        }
        BounceAxis::Vertical
    }
}

/// True once the ball has dropped out of the bottom of the field
pub fn is_ball_lost(ball: &Ball, params: &PhysicsParams) -> bool {
    ball.bottom() >= params.height
}
