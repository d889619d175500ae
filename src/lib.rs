//! Pinball Core - physics and collision core for a single-table pinball game
//!
//! Core modules:
//! - `sim`: Deterministic frame simulation (integration, collisions, game phase)
//! - `config`: Table and physics configuration with validation
//! - `launcher`: Plunger model producing launch impulses
//! - `game`: Owned session pairing the table with a seeded RNG

pub mod config;
pub mod game;
pub mod launcher;
pub mod sim;

pub use config::{Config, ConfigError, FlipperVelocityModel};
pub use game::Pinball;
pub use launcher::{LaunchAim, Plunger};

use glam::Vec2;

/// Default table constants (screen convention: +x right, +y down)
pub mod consts {
    /// Table dimensions
    pub const TABLE_WIDTH: f32 = 160.0;
    pub const TABLE_HEIGHT: f32 = 240.0;
    pub const WALL_THICKNESS: f32 = 4.0;
    /// Ball lower edge past this Y means the ball is lost
    pub const OUT_Y_THRESHOLD: f32 = TABLE_HEIGHT - 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 3.0;
    pub const LAUNCH_X: f32 = TABLE_WIDTH / 2.0;
    pub const LAUNCH_Y: f32 = TABLE_HEIGHT - 50.0 + BALL_RADIUS;
    pub const BALLS_PER_GAME: u32 = 3;

    /// Physics (per frame)
    pub const GRAVITY: f32 = 0.1;
    pub const FRICTION: f32 = 0.99;
    pub const BOUNCE_FACTOR: f32 = 0.8;
    pub const FLIPPER_BOUNCE_FACTOR: f32 = 2.0;
    pub const BUMPER_BOUNCE_FACTOR: f32 = 5.0;
    pub const BALL_MAX_SPEED: f32 = 15.0;
    pub const BALL_MIN_SPEED: f32 = 1.0;
    pub const SUB_STEPS: u32 = 10;

    /// Flippers
    pub const FLIPPER_LENGTH: f32 = 80.0;
    pub const FLIPPER_WIDTH: f32 = 6.0;
    pub const FLIPPER_MIN_DEG: f32 = -30.0;
    pub const FLIPPER_MAX_DEG: f32 = 30.0;
    pub const FLIPPER_SPEED_DEG: f32 = 8.0;
    pub const FLIPPER_BOOST: f32 = 1.5;

    /// Bumpers
    pub const BUMPER_RADIUS: f32 = 8.0;
    pub const BUMPER_SCORE: u64 = 100;
    pub const BUMPER_HIT_DURATION: u32 = 10;

    /// Plunger
    pub const PLUNGER_MAX_FORCE: f32 = 8.0;
    pub const PLUNGER_FORCE_PER_FRAME: f32 = 0.3;
    pub const PLUNGER_SIDE_FORCE_SCALE: f32 = 0.5;
}

/// Unit vector for a direction in degrees (0° right, 90° down)
#[inline]
pub fn direction_deg(deg: f32) -> Vec2 {
    let rad = deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Direction of a vector in degrees, normalized to [0, 360)
#[inline]
pub fn heading_deg(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees().rem_euclid(360.0)
}
