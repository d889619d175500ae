//! Per-sub-step collision resolution
//!
//! Runs after integration in a fixed order, each stage seeing the position
//! and velocity left by the previous one: walls, bottom (ball lost),
//! flippers, bumpers.

use glam::Vec2;
use rand::Rng;

use super::collision::{circle_circle_collide, segment_circle_collide};
use super::flipper::{Flipper, FlipperSide};
use super::integrate::clamp_speed;
use super::state::{Ball, Bumper, Table};
use crate::config::{BumperConfig, FlipperVelocityModel, PhysicsConfig, TableConfig};
use crate::direction_deg;

/// What happened during one sub-step's collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubstepReport {
    /// Ball passed the bottom threshold; later stages did not run
    pub ball_lost: bool,
    pub wall_hit: bool,
    pub flipper_hit: Option<FlipperSide>,
    /// Indices of bumpers touched, in check order
    pub bumpers_hit: Vec<usize>,
    pub score: u64,
}

/// Push the ball back inside the left, right and top walls
///
/// Returns true if any wall was touched.
pub fn resolve_walls(ball: &mut Ball, table: &TableConfig, bounce_factor: f32) -> bool {
    let inner_left = table.wall_thickness;
    let inner_right = table.width - table.wall_thickness;
    let inner_top = table.wall_thickness;
    let mut hit = false;

    // Only a component heading into the wall is reflected
    if ball.pos.x - ball.radius < inner_left {
        ball.pos.x = inner_left + ball.radius;
        if ball.vel.x < 0.0 {
            ball.vel.x *= -bounce_factor;
        }
        hit = true;
    }
    if ball.pos.x + ball.radius > inner_right {
        ball.pos.x = inner_right - ball.radius;
        if ball.vel.x > 0.0 {
            ball.vel.x *= -bounce_factor;
        }
        hit = true;
    }
    if ball.pos.y - ball.radius < inner_top {
        ball.pos.y = inner_top + ball.radius;
        if ball.vel.y < 0.0 {
            ball.vel.y *= -bounce_factor;
        }
        hit = true;
    }

    hit
}

/// Whether the ball's lower edge is past the out line
#[inline]
pub fn is_ball_lost(ball: &Ball, table: &TableConfig) -> bool {
    ball.pos.y + ball.radius > table.out_y_threshold
}

/// Blade velocities at `ball_pos` for the left and right flipper
///
/// With [`FlipperVelocityModel::MirrorLeft`] the right flipper does not use
/// its own swing at all: it gets the left flipper's value with X negated.
pub fn flipper_surface_velocities(
    left: &Flipper,
    right: &Flipper,
    ball_pos: Vec2,
    sub_steps: u32,
    model: FlipperVelocityModel,
) -> [Vec2; 2] {
    let left_v = left.surface_velocity(ball_pos, sub_steps);
    let right_v = match model {
        FlipperVelocityModel::Independent => right.surface_velocity(ball_pos, sub_steps),
        FlipperVelocityModel::MirrorLeft => Vec2::new(-left_v.x, left_v.y),
    };
    [left_v, right_v]
}

fn strike(ball: &mut Ball, flipper: &Flipper, restitution: f32, surface_velocity: Vec2) -> bool {
    let out = segment_circle_collide(
        flipper.pivot,
        flipper.tip(),
        ball.pos,
        ball.radius,
        flipper.half_width(),
        ball.vel,
        restitution,
        surface_velocity,
    );
    ball.pos = out.position;
    ball.vel = out.velocity;
    out.collided
}

/// Collide the ball with the flippers, left first
///
/// The right flipper is skipped when the left one was touched.
pub fn resolve_flippers(
    ball: &mut Ball,
    left: &Flipper,
    right: &Flipper,
    physics: &PhysicsConfig,
    boost: f32,
) -> Option<FlipperSide> {
    let [left_v, right_v] = flipper_surface_velocities(
        left,
        right,
        ball.pos,
        physics.sub_steps,
        physics.flipper_velocity_model,
    );

    if strike(ball, left, physics.flipper_bounce_factor, left_v * boost) {
        return Some(FlipperSide::Left);
    }
    if strike(ball, right, physics.flipper_bounce_factor, right_v * boost) {
        return Some(FlipperSide::Right);
    }
    None
}

/// Collide the ball with every bumper in layout order
///
/// The contact test supplies the push-out only. A touched bumper sends the
/// ball off at its current speed (at least `min_ball_speed`) in a random
/// direction from the configured range, scores, and lights up.
pub fn resolve_bumpers<R: Rng + ?Sized>(
    ball: &mut Ball,
    bumpers: &mut [Bumper],
    physics: &PhysicsConfig,
    config: &BumperConfig,
    rng: &mut R,
    report: &mut SubstepReport,
) {
    for (index, bumper) in bumpers.iter_mut().enumerate() {
        let out = circle_circle_collide(
            ball.pos,
            ball.radius,
            bumper.center,
            bumper.radius,
            ball.vel,
            physics.bumper_bounce_factor,
        );
        if !out.collided {
            continue;
        }

        ball.pos = out.position;
        let speed = ball.speed().max(physics.min_ball_speed);
        let angle = rng.random_range(config.deflect_min_deg..=config.deflect_max_deg);
        ball.vel = direction_deg(angle) * speed;

        bumper.hit_timer = config.hit_duration;
        report.score += bumper.score;
        report.bumpers_hit.push(index);
        log::debug!("Bumper {} hit, deflected at {:.1}°", index, angle);
    }
}

/// Run the full collision pass for one sub-step
pub fn resolve_substep<R: Rng + ?Sized>(table: &mut Table, rng: &mut R) -> SubstepReport {
    let mut report = SubstepReport::default();
    let Table {
        config,
        ball,
        left_flipper,
        right_flipper,
        bumpers,
        ..
    } = table;
    let physics = &config.physics;

    report.wall_hit = resolve_walls(ball, &config.table, physics.bounce_factor);

    if is_ball_lost(ball, &config.table) {
        report.ball_lost = true;
        return report;
    }

    report.flipper_hit = resolve_flippers(
        ball,
        left_flipper,
        right_flipper,
        physics,
        config.flippers.boost,
    );

    resolve_bumpers(ball, bumpers, physics, &config.bumpers, rng, &mut report);

    ball.vel = clamp_speed(ball.vel, physics.min_ball_speed, physics.max_ball_speed);

    if !ball.is_finite() {
        log::error!("Non-finite ball state {:?}, returning ball to launcher", ball);
        table.reset_ball();
    }

    report
}
