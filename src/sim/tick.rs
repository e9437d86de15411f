//! Fixed timestep simulation tick
//!
//! Advances a [`GameSession`] by one frame of `Playing`. Movement is in
//! pixels per frame; `dt` only drives timers (effects, shake).

use glam::Vec2;

use super::bonus::BonusKind;
use super::brick::{HitOutcome, Rgb};
use super::collision::{
    PhysicsParams, bounce_off_brick, find_brick_hit, handle_paddle_collision,
    handle_wall_collision, is_ball_lost,
};
use super::state::{GameEvent, GameSession};
use crate::audio::SoundEffect;

/// Particles when the ball breaks a brick
const BREAK_PARTICLES: u32 = 25;
/// Particles for each brick caught in a blast
const BLAST_PARTICLES: u32 = 20;
/// Particles when a fire ball burns through
const FIRE_PARTICLES: u32 = 15;
/// Orange used for blast and fire-ball bursts
const EMBER_COLOR: Rgb = [255, 100, 0];
/// Shake on explosion: pixels, seconds
const EXPLOSION_SHAKE: (f32, f32) = (5.0, 0.2);
/// Shake on losing a life
const LIFE_LOST_SHAKE: (f32, f32) = (10.0, 0.4);
/// Paddle resizes only when off target by more than this (pixels)
const RESIZE_TOLERANCE: f32 = 1.0;
/// Autopilot aims this far off center (fraction of half width)
const AUTOPILOT_AIM: f32 = 0.3;

/// Held input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Ignore left/right and let the paddle chase the ball
    pub autopilot: bool,
}

/// What the frame ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Last destroyable brick went down; `level` already points at the next one
    LevelCleared,
    GameOver,
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) -> TickOutcome {
    let params = PhysicsParams::from_config(&session.config);
    session.clock += dt;

    let input = if input.autopilot {
        autopilot(session)
    } else {
        *input
    };
    move_paddle(session, &input, &params);

    session.bonuses.update(params.height);
    session.bonuses.purge_expired(session.clock);

    session.update_animations(dt);

    collect_bonuses(session);

    let fire = session.bonuses.has_active(BonusKind::FireBall);
    let modifier = session.bonuses.ball_speed_modifier();
    let mut lost = Vec::new();

    for i in 0..session.balls.len() {
        let ball = &mut session.balls[i];
        ball.update(modifier);
        let walls = handle_wall_collision(ball, &params);
        let paddle_hit = handle_paddle_collision(ball, &session.paddle.rect, &params);

        for _ in 0..walls {
            session.sound(SoundEffect::WallHit);
        }
        if paddle_hit {
            session.sound(SoundEffect::PaddleHit);
        }

        if let Some(index) = find_brick_hit(&session.balls[i].rect(), &session.bricks) {
            let pass_through = fire && session.bricks[index].destroyable;
            resolve_brick_hit(session, index, pass_through);
            if !pass_through {
                let brick = session.bricks[index].rect;
                bounce_off_brick(&mut session.balls[i], &brick);
            }
        }

        if is_ball_lost(&session.balls[i], &params) {
            lost.push(i);
        }
    }

    if !lost.is_empty() {
        let mut index = 0;
        session.balls.retain(|_| {
            let keep = !lost.contains(&index);
            index += 1;
            keep
        });
        if session.balls.is_empty() && lose_life(session) {
            return TickOutcome::GameOver;
        }
    }

    if session.level_cleared() {
        session.level += 1;
        session.sound(SoundEffect::LevelComplete);
        log::info!("Level cleared, score {}", session.score);
        return TickOutcome::LevelCleared;
    }

    TickOutcome::Continue
}

/// Steer toward the lowest ball, aiming slightly off center
fn autopilot(session: &GameSession) -> TickInput {
    let Some(ball) = lowest_ball(session) else {
        return TickInput::default();
    };

    let paddle = &session.paddle.rect;
    let aim = if session.bricks_remaining() % 2 == 0 {
        AUTOPILOT_AIM
    } else {
        -AUTOPILOT_AIM
    };
    let target = ball.x - aim * paddle.w / 2.0;
    let delta = target - paddle.center_x();
    let deadzone = session.paddle.speed / 2.0;

    TickInput {
        left: delta < -deadzone,
        right: delta > deadzone,
        autopilot: true,
    }
}

fn move_paddle(session: &mut GameSession, input: &TickInput, params: &PhysicsParams) {
    let paddle = &mut session.paddle;
    let mut dx = 0.0;
    if input.left {
        dx -= paddle.speed;
    }
    if input.right {
        dx += paddle.speed;
    }

    let target = paddle.base_width * session.bonuses.paddle_modifier();
    if (paddle.rect.w - target).abs() > RESIZE_TOLERANCE {
        paddle.set_width(target);
    }
    paddle.move_by(dx, params.width);
}

fn collect_bonuses(session: &mut GameSession) {
    let collected = session.bonuses.check_collection(&session.paddle.rect);
    for bonus in collected {
        let kind = bonus.kind;
        session.sound(SoundEffect::Powerup);
        session.emit(GameEvent::Sparkle {
            center: bonus.rect().center(),
            color: kind.spec().color,
        });

        match kind {
            BonusKind::ExtraLife => session.lives += 1,
            BonusKind::MultiBall => session.activate_multiball(),
            _ => {
                let duration = session.config.bonus_duration(kind);
                session.bonuses.apply(kind, duration, session.clock);
            }
        }
        log::debug!("Collected {:?}", kind);
    }
}

/// Apply a ball hit to `bricks[index]` plus everything it sets off
///
/// With `fire` set the ball burns through: the usual hit feedback plays,
/// then a fire hit on top.
fn resolve_brick_hit(session: &mut GameSession, index: usize, fire: bool) {
    match session.bricks[index].hit() {
        HitOutcome::Indestructible => session.sound(SoundEffect::MetalHit),
        HitOutcome::Damaged => session.sound(SoundEffect::BrickHit),
        HitOutcome::Destroyed(destruction) => {
            let color = session.bricks[index].original_color;
            session.score += u64::from(destruction.points);
            session.emit(GameEvent::Burst {
                center: destruction.center,
                color,
                particles: BREAK_PARTICLES,
            });
            session.emit(GameEvent::Shockwave {
                center: destruction.center,
                color,
            });

            if destruction.explosive {
                explode(session, index);
            }

            session.spawn_drop(destruction.center, destruction.bonus_guaranteed);
            session.sound(SoundEffect::BrickHit);
        }
    }

    if fire {
        session.sound(SoundEffect::FireHit);
        session.emit(GameEvent::Burst {
            center: session.bricks[index].rect.center(),
            color: EMBER_COLOR,
            particles: FIRE_PARTICLES,
        });
    }
}

/// Hit every brick in the blast once; blast victims never chain or drop
fn explode(session: &mut GameSession, index: usize) {
    session.sound(SoundEffect::Explosion);
    session.shake.start(EXPLOSION_SHAKE.0, EXPLOSION_SHAKE.1);

    let targets = session.layout.explosion_targets(&session.bricks, index);
    for target in targets {
        if let HitOutcome::Destroyed(d) = session.bricks[target].hit() {
            session.score += u64::from(d.points);
            session.emit(GameEvent::Burst {
                center: d.center,
                color: EMBER_COLOR,
                particles: BLAST_PARTICLES,
            });
        }
    }
}

/// Returns true when that was the last life
fn lose_life(session: &mut GameSession) -> bool {
    session.lives = session.lives.saturating_sub(1);
    session.sound(SoundEffect::LifeLost);
    session.shake.start(LIFE_LOST_SHAKE.0, LIFE_LOST_SHAKE.1);
    log::info!("Ball lost, {} lives left", session.lives);

    if session.lives == 0 {
        session.sound(SoundEffect::GameOver);
        return true;
    }
    session.reset_ball();
    session.bonuses.clear();
    false
}

/// Center of the ball nearest the bottom
fn lowest_ball(session: &GameSession) -> Option<Vec2> {
    session
        .balls
        .iter()
        .max_by(|a, b| a.top().total_cmp(&b.top()))
        .map(|b| b.center())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::bonus::Bonus;
    use crate::sim::state::Ball;

    const DT: f32 = 1.0 / 60.0;

    fn session() -> GameSession {
        let config = GameConfig {
            enable_bonuses: false,
            ..GameConfig::default()
        };
        GameSession::new(config, 1)
    }

    /// Place a single ball so that next frame it lands inside `bricks[index]`
    /// from below, moving straight up
    fn aim_at_brick(session: &mut GameSession, index: usize) {
        let rect = session.bricks[index].rect;
        let mut ball = Ball::new(Vec2::new(rect.center_x() - 15.0, rect.bottom() + 2.0), 15.0);
        ball.set_velocity(0.0, -5.0);
        session.balls = vec![ball];
    }

    fn sounds(session: &mut GameSession) -> Vec<SoundEffect> {
        session
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Sound(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_level_one_speed_is_base() {
        let s = session();
        assert!((s.balls[0].vel.length() - s.config.base_ball_speed).abs() < 1e-5);
        assert_eq!(s.speed_ratio(), 1.0);
    }

    #[test]
    fn test_normal_brick_scores_and_bounces() {
        let mut s = session();
        aim_at_brick(&mut s, 45);
        assert_eq!(tick(&mut s, &TickInput::default(), DT), TickOutcome::Continue);
        assert!(!s.bricks[45].visible);
        assert_eq!(s.score, 10);
        assert!(s.balls[0].vel.y > 0.0);
        assert!(sounds(&mut s).contains(&SoundEffect::BrickHit));
    }

    #[test]
    fn test_durable_brick_via_ball() {
        let mut s = session();
        s.bricks = s.layout.build(&["D"], 1);
        for hit in 1..=2 {
            aim_at_brick(&mut s, 0);
            tick(&mut s, &TickInput::default(), DT);
            assert_eq!(s.bricks[0].visible, hit < 2);
        }
        assert_eq!(s.score, 25);
    }

    #[test]
    fn test_unbreakable_rings_and_stays() {
        let mut s = session();
        s.bricks = s.layout.build(&["UN"], 1);
        aim_at_brick(&mut s, 0);
        tick(&mut s, &TickInput::default(), DT);
        assert!(s.bricks[0].visible);
        assert_eq!(s.score, 0);
        assert!(sounds(&mut s).contains(&SoundEffect::MetalHit));
    }

    #[test]
    fn test_explosion_does_not_cascade() {
        let mut s = session();
        // Ball hits the left explosive; the second explosive sits in the
        // blast but must not set off the rest of the row
        s.bricks = s.layout.build(&["EENNN"], 1);
        aim_at_brick(&mut s, 0);
        tick(&mut s, &TickInput::default(), DT);

        let visible: Vec<bool> = s.bricks.iter().map(|b| b.visible).collect();
        assert_eq!(visible, vec![false, false, true, true, true]);
        assert_eq!(s.score, 30);
        assert!(s.shake.is_active());
        let sounds = sounds(&mut s);
        assert_eq!(
            sounds.iter().filter(|&&e| e == SoundEffect::Explosion).count(),
            1
        );
    }

    #[test]
    fn test_fire_ball_passes_through() {
        let mut s = session();
        s.bricks = s.layout.build(&["NU"], 1);
        s.bonuses.apply(BonusKind::FireBall, 10.0, 0.0);

        aim_at_brick(&mut s, 0);
        tick(&mut s, &TickInput::default(), DT);
        assert!(!s.bricks[0].visible);
        assert!(s.balls[0].vel.y < 0.0);

        let events = s.drain_events();
        let position = |effect| events.iter().position(|e| *e == GameEvent::Sound(effect));
        let brick_hit = position(SoundEffect::BrickHit).expect("brick hit sound");
        let fire_hit = position(SoundEffect::FireHit).expect("fire hit sound");
        assert!(brick_hit < fire_hit);
        let bursts: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Burst { particles, .. } => Some(*particles),
                _ => None,
            })
            .collect();
        assert_eq!(bursts, vec![BREAK_PARTICLES, FIRE_PARTICLES]);

        // Unbreakable bricks still bounce a fire ball
        aim_at_brick(&mut s, 1);
        tick(&mut s, &TickInput::default(), DT);
        assert!(s.balls[0].vel.y > 0.0);
    }

    #[test]
    fn test_bonus_brick_always_drops() {
        for seed in 0..100 {
            let mut s = GameSession::new(GameConfig::default(), seed);
            s.bricks = s.layout.build(&["BN"], 1);
            aim_at_brick(&mut s, 0);
            tick(&mut s, &TickInput::default(), DT);

            assert!(!s.bricks[0].visible);
            assert_eq!(s.bonuses.bonuses().len(), 1, "seed {seed}");
            let pickup = s.bonuses.bonuses()[0].rect();
            assert!((pickup.center_x() - s.bricks[0].rect.center_x()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_blast_victims_never_drop() {
        let config = GameConfig {
            bonus_drop_chance: 0.0,
            ..GameConfig::default()
        };
        for seed in 0..20 {
            let mut s = GameSession::new(config.clone(), seed);
            // The bonus brick only goes down in the explosion
            s.bricks = s.layout.build(&["EBN"], 1);
            aim_at_brick(&mut s, 0);
            tick(&mut s, &TickInput::default(), DT);

            assert!(!s.bricks[1].visible);
            assert!(s.bricks[2].visible);
            assert!(s.bonuses.bonuses().is_empty(), "seed {seed}");
        }
    }

    #[test]
    fn test_losing_last_ball_costs_one_life() {
        let mut s = session();
        let mut a = Ball::new(Vec2::new(100.0, 575.0), 15.0);
        a.set_velocity(0.0, 5.0);
        let mut b = a.clone();
        b.pos.x = 700.0;
        s.balls = vec![a, b];

        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.lives, 2);
        assert_eq!(s.balls.len(), 1);
        assert_eq!(s.balls[0].bottom(), s.paddle.rect.top());
        assert_eq!(
            sounds(&mut s)
                .iter()
                .filter(|&&e| e == SoundEffect::LifeLost)
                .count(),
            1
        );
    }

    #[test]
    fn test_only_survivor_keeps_lives() {
        let mut s = session();
        let mut falling = Ball::new(Vec2::new(100.0, 575.0), 15.0);
        falling.set_velocity(0.0, 5.0);
        let mut safe = Ball::new(Vec2::new(700.0, 300.0), 15.0);
        safe.set_velocity(0.0, 5.0);
        s.balls = vec![falling, safe];

        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.lives, 3);
        assert_eq!(s.balls.len(), 1);
        assert_eq!(s.balls[0].left(), 700.0);
    }

    #[test]
    fn test_game_over_on_last_life() {
        let mut s = session();
        s.lives = 1;
        let mut ball = Ball::new(Vec2::new(100.0, 575.0), 15.0);
        ball.set_velocity(0.0, 5.0);
        s.balls = vec![ball];

        assert_eq!(tick(&mut s, &TickInput::default(), DT), TickOutcome::GameOver);
        assert_eq!(s.lives, 0);
        assert!(sounds(&mut s).contains(&SoundEffect::GameOver));
    }

    #[test]
    fn test_unbreakable_does_not_block_clear() {
        let mut s = session();
        s.bricks = s.layout.build(&["NU"], 1);
        aim_at_brick(&mut s, 0);
        assert_eq!(
            tick(&mut s, &TickInput::default(), DT),
            TickOutcome::LevelCleared
        );
        assert_eq!(s.level, 2);
    }

    #[test]
    fn test_paddle_follows_input_and_modifier() {
        let mut s = session();
        let start = s.paddle.rect.x;
        let input = TickInput {
            left: true,
            ..TickInput::default()
        };
        tick(&mut s, &input, DT);
        assert_eq!(s.paddle.rect.x, start - 10.0);

        s.bonuses.apply(BonusKind::ExpandPaddle, 15.0, s.clock);
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.paddle.rect.w, 180.0);
    }

    #[test]
    fn test_effects_expire_on_session_clock() {
        let mut s = session();
        s.bricks = s.layout.build(&["N"], 1);
        s.bonuses.apply(BonusKind::ShrinkPaddle, 0.5, s.clock);
        for _ in 0..40 {
            s.balls[0].set_velocity(0.0, 0.0);
            tick(&mut s, &TickInput::default(), DT);
        }
        assert!(!s.bonuses.has_active(BonusKind::ShrinkPaddle));
        assert_eq!(s.paddle.rect.w, 120.0);
    }

    #[test]
    fn test_extra_life_pickup() {
        let mut s = session();
        let center = Vec2::new(s.paddle.rect.center_x(), s.paddle.rect.top() - 21.0);
        s.bonuses.add(Bonus::new(BonusKind::ExtraLife, center, 3.0));
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.lives, 4);
        assert!(sounds(&mut s).contains(&SoundEffect::Powerup));
    }

    #[test]
    fn test_autopilot_keeps_ball_alive() {
        let mut s = GameSession::new(GameConfig::default(), 5);
        let input = TickInput {
            autopilot: true,
            ..TickInput::default()
        };
        for _ in 0..3_000 {
            if tick(&mut s, &input, DT) != TickOutcome::Continue {
                break;
            }
        }
        assert!(s.score > 0);
    }
}
