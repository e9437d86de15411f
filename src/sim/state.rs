//! Session state and core entity types
//!
//! Everything a round needs lives in [`GameSession`]; there are no globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bonus::BonusManager;
use super::brick::{Brick, LevelLayout, Rgb};
use super::rect::Rect;
use crate::audio::SoundEffect;
use crate::config::GameConfig;

/// Angle between the original ball and each multi-ball copy (radians)
pub const MULTIBALL_SPREAD: f32 = 0.5;

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner of the bounding square
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per frame
    pub vel: Vec2,
    /// Cached magnitude, kept even while the velocity is zero
    speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            vel: Vec2::ZERO,
            speed: 0.0,
        }
    }

    pub fn size(&self) -> f32 {
        self.radius * 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size(), self.size())
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size()
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size()
    }

    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x;
    }

    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size();
    }

    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size();
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set raw components and recompute the cached magnitude
    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.vel = Vec2::new(vx, vy);
        self.speed = self.vel.length();
    }

    /// Rescale to `speed`, keeping direction
    ///
    /// A resting ball stays at rest but remembers the new magnitude.
    pub fn set_speed_magnitude(&mut self, speed: f32) {
        let current = self.vel.length();
        if current > 0.0 {
            self.vel *= speed / current;
        }
        self.speed = speed;
    }

    /// Advance one frame, scaled by the active speed modifier
    pub fn update(&mut self, speed_modifier: f32) {
        self.pos += self.vel * speed_modifier;
    }

    pub fn bounce_x(&mut self) {
        self.vel.x = -self.vel.x;
    }

    pub fn bounce_y(&mut self) {
        self.vel.y = -self.vel.y;
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Width before bonus modifiers
    pub base_width: f32,
    /// Pixels per frame
    pub speed: f32,
}

impl Paddle {
    pub fn new(config: &GameConfig) -> Self {
        let rect = Rect::new(
            config.window_width / 2.0 - config.paddle_width / 2.0,
            config.window_height - config.paddle_bottom_margin,
            config.paddle_width,
            config.paddle_height,
        );
        Self {
            rect,
            base_width: config.paddle_width,
            speed: config.paddle_speed,
        }
    }

    /// Back to default width and centered position
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }

    /// Move horizontally, staying inside `[0, boundary_width]`
    pub fn move_by(&mut self, dx: f32, boundary_width: f32) {
        let max_x = (boundary_width - self.rect.w).max(0.0);
        self.rect.x = (self.rect.x + dx).min(max_x).max(0.0);
    }

    /// Resize around the current center
    pub fn set_width(&mut self, width: f32) {
        let center = self.rect.center_x();
        self.rect.w = width;
        self.rect.x = center - width / 2.0;
    }
}

/// Something the host should react to after a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEffect),
    /// Particle burst (brick breaking)
    Burst { center: Vec2, color: Rgb, particles: u32 },
    /// Expanding ring (explosion)
    Shockwave { center: Vec2, color: Rgb },
    /// Glitter around a collected pickup
    Sparkle { center: Vec2, color: Rgb },
}

/// Camera shake
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    /// Max offset in pixels
    pub magnitude: f32,
    /// Seconds left
    pub remaining: f32,
    pub offset: Vec2,
}

impl ScreenShake {
    pub fn start(&mut self, magnitude: f32, duration: f32) {
        self.magnitude = magnitude;
        self.remaining = duration;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        if self.remaining > 0.0 {
            self.remaining -= dt;
            let m = self.magnitude;
            self.offset = Vec2::new(rng.random_range(-m..=m), rng.random_range(-m..=m));
        } else {
            self.remaining = 0.0;
            self.magnitude = 0.0;
            self.offset = Vec2::ZERO;
        }
    }
}

/// One player's game: score, lives, level and every entity in play
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    pub layout: LevelLayout,
    pub score: u64,
    pub lives: u32,
    /// 1-based
    pub level: u32,
    /// Target ball speed for the current level (pixels per frame)
    pub speed: f32,
    /// Seconds of play; drives effect expiry
    pub clock: f32,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub bonuses: BonusManager,
    pub shake: ScreenShake,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Build a session and lay out level 1
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut session = Self {
            layout: LevelLayout::from_config(&config),
            score: 0,
            lives: config.initial_lives,
            level: 1,
            speed: config.ball_speed_for_level(1),
            clock: 0.0,
            paddle: Paddle::new(&config),
            balls: Vec::new(),
            bricks: Vec::new(),
            bonuses: BonusManager::new(&config),
            shake: ScreenShake::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            config,
        };
        session.setup_level();
        session
    }

    /// Reset score, lives and level, then build level 1
    pub fn new_game(&mut self) {
        self.score = 0;
        self.lives = self.config.initial_lives;
        self.level = 1;
        self.clock = 0.0;
        self.shake = ScreenShake::default();
        self.events.clear();
        self.setup_level();
    }

    /// Build bricks for the current level and serve a fresh ball
    pub fn setup_level(&mut self) {
        self.bricks = self.layout.create_level(self.level);
        self.speed = self.config.ball_speed_for_level(self.level);
        self.paddle.reset(&self.config);
        self.bonuses.clear();
        self.reset_ball();
        log::info!(
            "Level {} ready: {} bricks, ball speed {:.2}",
            self.level,
            self.bricks.len(),
            self.speed
        );
    }

    /// Replace every ball with one resting on the paddle, heading up-right
    pub fn reset_ball(&mut self) {
        let r = self.config.ball_radius;
        let pos = Vec2::new(
            self.paddle.rect.center_x() - r,
            self.paddle.rect.top() - 2.0 * r,
        );
        let mut ball = Ball::new(pos, r);
        let dir = Vec2::new(1.0, -1.0).normalize();
        ball.set_velocity(dir.x * self.speed, dir.y * self.speed);
        self.balls = vec![ball];
    }

    /// Add two copies of the first ball, rotated either side of it
    pub fn activate_multiball(&mut self) {
        let Some(first) = self.balls.first().cloned() else {
            return;
        };
        for angle in [-MULTIBALL_SPREAD, MULTIBALL_SPREAD] {
            let mut copy = first.clone();
            let v = Vec2::from_angle(angle).rotate(first.vel);
            copy.set_velocity(v.x, v.y);
            self.balls.push(copy);
        }
        log::debug!("Multi-ball: {} balls in play", self.balls.len());
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn sound(&mut self, effect: SoundEffect) {
        self.emit(GameEvent::Sound(effect));
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Advance screen and brick shake timers
    pub fn update_animations(&mut self, dt: f32) {
        self.shake.update(dt, &mut self.rng);
        for brick in &mut self.bricks {
            brick.update(dt, &mut self.rng);
        }
    }

    /// Spawn a pickup at `center` for a brick the ball destroyed
    ///
    /// Bonus bricks always drop one; others roll the configured chance.
    pub fn spawn_drop(&mut self, center: Vec2, guaranteed: bool) {
        let drop = if guaranteed {
            self.bonuses.guaranteed_drop(center, &mut self.rng)
        } else {
            self.bonuses.roll_drop(center, &mut self.rng)
        };
        if let Some(bonus) = drop {
            log::debug!("Bonus {:?} dropped", bonus.kind);
            self.bonuses.add(bonus);
        }
    }

    /// True once every destroyable brick is gone
    pub fn level_cleared(&self) -> bool {
        !self.bricks.iter().any(Brick::blocks_clear)
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks.iter().filter(|b| b.blocks_clear()).count()
    }

    /// Current target speed relative to the level 1 speed
    pub fn speed_ratio(&self) -> f32 {
        self.speed / self.config.base_ball_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default(), 42)
    }

    #[test]
    fn test_paddle_stays_in_field() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(&config);
        assert_eq!(paddle.rect, Rect::new(390.0, 560.0, 120.0, 10.0));

        paddle.move_by(-10_000.0, 900.0);
        assert_eq!(paddle.rect.left(), 0.0);
        paddle.move_by(10_000.0, 900.0);
        assert_eq!(paddle.rect.right(), 900.0);
    }

    #[test]
    fn test_paddle_resize_keeps_center() {
        let mut paddle = Paddle::new(&GameConfig::default());
        paddle.set_width(180.0);
        assert_eq!(paddle.rect.center_x(), 450.0);
        assert_eq!(paddle.rect.w, 180.0);
    }

    #[test]
    fn test_set_speed_magnitude() {
        let mut ball = Ball::new(Vec2::ZERO, 15.0);
        ball.set_velocity(3.0, -4.0);
        assert_eq!(ball.speed(), 5.0);
        ball.set_speed_magnitude(10.0);
        assert!((ball.vel - Vec2::new(6.0, -8.0)).length() < 1e-5);

        let mut resting = Ball::new(Vec2::ZERO, 15.0);
        resting.set_speed_magnitude(7.0);
        assert_eq!(resting.vel, Vec2::ZERO);
        assert_eq!(resting.speed(), 7.0);
    }

    #[test]
    fn test_edge_setters() {
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), 15.0);
        ball.set_bottom(560.0);
        assert_eq!(ball.top(), 530.0);
        ball.set_right(900.0);
        assert_eq!(ball.left(), 870.0);
        assert_eq!(ball.center(), Vec2::new(885.0, 545.0));
    }

    #[test]
    fn test_new_session_serves_ball_on_paddle() {
        let s = session();
        assert_eq!(s.level, 1);
        assert_eq!(s.lives, 3);
        assert_eq!(s.bricks.len(), 50);
        assert_eq!(s.balls.len(), 1);

        let ball = &s.balls[0];
        assert_eq!(ball.bottom(), s.paddle.rect.top());
        assert_eq!(ball.center().x, s.paddle.rect.center_x());
        assert!((ball.vel.length() - s.config.base_ball_speed).abs() < 1e-5);
        assert!(ball.vel.x > 0.0 && ball.vel.y < 0.0);
    }

    #[test]
    fn test_multiball_spreads_at_equal_speed() {
        let mut s = session();
        s.activate_multiball();
        assert_eq!(s.balls.len(), 3);
        let speed = s.balls[0].vel.length();
        for ball in &s.balls[1..] {
            assert!((ball.vel.length() - speed).abs() < 1e-4);
            assert!((ball.vel.angle_to(s.balls[0].vel).abs() - MULTIBALL_SPREAD).abs() < 1e-4);
        }
    }

    #[test]
    fn test_multiball_without_balls_is_noop() {
        let mut s = session();
        s.balls.clear();
        s.activate_multiball();
        assert!(s.balls.is_empty());
    }

    #[test]
    fn test_new_game_resets_progress() {
        let mut s = session();
        s.score = 500;
        s.lives = 1;
        s.level = 3;
        s.sound(SoundEffect::WallHit);
        s.new_game();
        assert_eq!((s.score, s.lives, s.level), (0, 3, 1));
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_level_clear_ignores_unbreakable() {
        let mut s = session();
        s.bricks = s.layout.build(&["NUN"], 1);
        assert!(!s.level_cleared());
        s.bricks[0].visible = false;
        s.bricks[2].visible = false;
        assert!(s.level_cleared());
        assert_eq!(s.bricks_remaining(), 0);
    }

    #[test]
    fn test_shake_runs_out() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut shake = ScreenShake::default();
        shake.start(5.0, 0.05);
        shake.update(1.0 / 60.0, &mut rng);
        assert!(shake.offset.x.abs() <= 5.0 && shake.offset.y.abs() <= 5.0);
        for _ in 0..5 {
            shake.update(1.0 / 60.0, &mut rng);
        }
        assert!(!shake.is_active());
        assert_eq!(shake.offset, Vec2::ZERO);
    }
}
