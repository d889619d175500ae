//! Ball integration for one sub-step

use glam::Vec2;

use super::state::Ball;
use crate::config::PhysicsConfig;

/// Speeds at or below this count as "at rest" and are never lifted
pub const REST_SPEED: f32 = 1e-6;

/// Keep speed within [min, max], leaving a ball at rest alone
pub fn clamp_speed(vel: Vec2, min_speed: f32, max_speed: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max_speed {
        vel * (max_speed / speed)
    } else if speed > REST_SPEED && speed < min_speed {
        vel * (min_speed / speed)
    } else {
        vel
    }
}

/// Advance the ball by `dt` of a frame: gravity, damping, motion, speed clamp
///
/// Damping uses `friction^dt`, so a whole frame multiplies velocity by
/// `friction` once no matter how many sub-steps it is split into.
pub fn integrate_ball(ball: &mut Ball, physics: &PhysicsConfig, dt: f32) {
    ball.vel.y += physics.gravity * dt;
    ball.vel *= physics.friction.powf(dt);
    ball.pos += ball.vel * dt;
    ball.vel = clamp_speed(ball.vel, physics.min_ball_speed, physics.max_ball_speed);
}
