//! Table and physics configuration
//!
//! Every tunable constant is fixed when a [`Table`](crate::sim::Table) is
//! built. The record can be loaded from JSON; missing fields fall back to the
//! defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sub_steps must be at least 1")]
    ZeroSubSteps,
    #[error("balls_per_game must be at least 1")]
    NoBalls,
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    #[error("{field} must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("min_ball_speed {min} exceeds max_ball_speed {max}")]
    SpeedBounds { min: f32, max: f32 },
    #[error("flipper min angle {min}° exceeds max angle {max}°")]
    FlipperLimits { min: f32, max: f32 },
    #[error("invalid angle range {min}°..{max}° for {field}")]
    AngleRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// How the right flipper's contact velocity is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipperVelocityModel {
    /// Each flipper uses its own angular velocity and lever arm
    #[default]
    Independent,
    /// Right flipper reuses the left flipper's contact velocity with X negated
    MirrorLeft,
}

/// Integration and restitution constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Velocity multiplier applied over one whole frame
    pub friction: f32,
    /// Wall restitution
    pub bounce_factor: f32,
    /// Flipper restitution
    pub flipper_bounce_factor: f32,
    /// Restitution fed to the bumper contact test (its velocity is replaced)
    pub bumper_bounce_factor: f32,
    pub max_ball_speed: f32,
    pub min_ball_speed: f32,
    /// Integration slices per frame
    pub sub_steps: u32,
    pub flipper_velocity_model: FlipperVelocityModel,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            bounce_factor: BOUNCE_FACTOR,
            flipper_bounce_factor: FLIPPER_BOUNCE_FACTOR,
            bumper_bounce_factor: BUMPER_BOUNCE_FACTOR,
            max_ball_speed: BALL_MAX_SPEED,
            min_ball_speed: BALL_MIN_SPEED,
            sub_steps: SUB_STEPS,
            flipper_velocity_model: FlipperVelocityModel::default(),
        }
    }
}

/// Playfield dimensions and ball setup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    /// Ball is lost once its lower edge passes this Y
    pub out_y_threshold: f32,
    pub ball_radius: f32,
    /// Where the ball rests while waiting for launch
    pub launch_position: Vec2,
    pub balls_per_game: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: TABLE_WIDTH,
            height: TABLE_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            out_y_threshold: OUT_Y_THRESHOLD,
            ball_radius: BALL_RADIUS,
            launch_position: Vec2::new(LAUNCH_X, LAUNCH_Y),
            balls_per_game: BALLS_PER_GAME,
        }
    }
}

/// Shared flipper geometry (the right flipper mirrors the left)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipperConfig {
    pub length: f32,
    pub width: f32,
    /// Resting angle (degrees)
    pub min_deg: f32,
    /// Raised angle (degrees)
    pub max_deg: f32,
    /// Rotation per frame (degrees)
    pub speed_deg: f32,
    /// Scale on the contact velocity added to a struck ball
    pub boost: f32,
    pub left_pivot: Vec2,
    pub right_pivot: Vec2,
}

impl Default for FlipperConfig {
    fn default() -> Self {
        Self {
            length: FLIPPER_LENGTH,
            width: FLIPPER_WIDTH,
            min_deg: FLIPPER_MIN_DEG,
            max_deg: FLIPPER_MAX_DEG,
            speed_deg: FLIPPER_SPEED_DEG,
            boost: FLIPPER_BOOST,
            left_pivot: Vec2::new(WALL_THICKNESS - 10.0, TABLE_HEIGHT - 30.0),
            right_pivot: Vec2::new(TABLE_WIDTH - WALL_THICKNESS + 10.0, TABLE_HEIGHT - 30.0),
        }
    }
}

/// One bumper in the layout
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BumperSpec {
    pub center: Vec2,
    pub radius: f32,
    pub score: u64,
}

impl BumperSpec {
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius: BUMPER_RADIUS,
            score: BUMPER_SCORE,
        }
    }
}

/// Bumper layout and hit response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BumperConfig {
    /// Checked in this order every sub-step
    pub layout: Vec<BumperSpec>,
    /// Frames a bumper stays lit after a hit
    pub hit_duration: u32,
    /// Deflection direction range (degrees, 0 = right, 90 = down)
    pub deflect_min_deg: f32,
    pub deflect_max_deg: f32,
}

impl Default for BumperConfig {
    fn default() -> Self {
        let cx = TABLE_WIDTH / 2.0;
        Self {
            layout: vec![
                BumperSpec::new(cx, 50.0),
                BumperSpec::new(cx - 30.0, 90.0),
                BumperSpec::new(cx + 30.0, 90.0),
                BumperSpec::new(cx - 15.0, 130.0),
                BumperSpec::new(cx + 15.0, 130.0),
            ],
            hit_duration: BUMPER_HIT_DURATION,
            deflect_min_deg: 90.0,
            deflect_max_deg: 270.0,
        }
    }
}

/// Plunger force model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlungerConfig {
    /// Launch speed cap
    pub max_force: f32,
    /// Launch speed gained per frame held
    pub force_per_frame: f32,
    /// Share of the force that goes sideways on a left-aimed shot
    pub side_force_scale: f32,
    /// Elevation range above horizontal for a right-aimed shot (degrees)
    pub right_angle_min_deg: f32,
    pub right_angle_max_deg: f32,
    /// Frames the pull may keep growing past the force cap
    pub overpull_frames: u32,
    /// Display offset per frame held, and its cap
    pub pull_offset_per_frame: f32,
    pub max_pull_offset: f32,
}

impl Default for PlungerConfig {
    fn default() -> Self {
        Self {
            max_force: PLUNGER_MAX_FORCE,
            force_per_frame: PLUNGER_FORCE_PER_FRAME,
            side_force_scale: PLUNGER_SIDE_FORCE_SCALE,
            right_angle_min_deg: 30.0,
            right_angle_max_deg: 60.0,
            overpull_frames: 30,
            pull_offset_per_frame: 0.2,
            max_pull_offset: 10.0,
        }
    }
}

/// Complete configuration record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub table: TableConfig,
    pub flippers: FlipperConfig,
    pub bumpers: BumperConfig,
    pub plunger: PlungerConfig,
}

fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn finite_vec(field: &'static str, value: Vec2) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

impl Config {
    /// Parse a JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Frame fraction covered by one sub-step
    pub fn sub_step_dt(&self) -> f32 {
        1.0 / self.physics.sub_steps.max(1) as f32
    }

    /// Reject non-physical values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        if p.sub_steps == 0 {
            return Err(ConfigError::ZeroSubSteps);
        }
        finite("gravity", p.gravity)?;
        positive("friction", p.friction)?;
        non_negative("bounce_factor", p.bounce_factor)?;
        non_negative("flipper_bounce_factor", p.flipper_bounce_factor)?;
        non_negative("bumper_bounce_factor", p.bumper_bounce_factor)?;
        positive("max_ball_speed", p.max_ball_speed)?;
        non_negative("min_ball_speed", p.min_ball_speed)?;
        if p.min_ball_speed > p.max_ball_speed {
            return Err(ConfigError::SpeedBounds {
                min: p.min_ball_speed,
                max: p.max_ball_speed,
            });
        }

        let t = &self.table;
        positive("width", t.width)?;
        positive("height", t.height)?;
        non_negative("wall_thickness", t.wall_thickness)?;
        finite("out_y_threshold", t.out_y_threshold)?;
        positive("ball_radius", t.ball_radius)?;
        finite_vec("launch_position", t.launch_position)?;
        if t.balls_per_game == 0 {
            return Err(ConfigError::NoBalls);
        }

        let f = &self.flippers;
        positive("flipper length", f.length)?;
        non_negative("flipper width", f.width)?;
        finite("flipper min_deg", f.min_deg)?;
        finite("flipper max_deg", f.max_deg)?;
        if f.min_deg > f.max_deg {
            return Err(ConfigError::FlipperLimits {
                min: f.min_deg,
                max: f.max_deg,
            });
        }
        non_negative("flipper speed_deg", f.speed_deg)?;
        non_negative("flipper boost", f.boost)?;
        finite_vec("left_pivot", f.left_pivot)?;
        finite_vec("right_pivot", f.right_pivot)?;

        let b = &self.bumpers;
        for spec in &b.layout {
            finite_vec("bumper center", spec.center)?;
            positive("bumper radius", spec.radius)?;
        }
        finite("deflect_min_deg", b.deflect_min_deg)?;
        finite("deflect_max_deg", b.deflect_max_deg)?;
        if b.deflect_min_deg > b.deflect_max_deg {
            return Err(ConfigError::AngleRange {
                field: "bumper deflection",
                min: b.deflect_min_deg,
                max: b.deflect_max_deg,
            });
        }

        let pl = &self.plunger;
        non_negative("plunger max_force", pl.max_force)?;
        positive("plunger force_per_frame", pl.force_per_frame)?;
        non_negative("plunger side_force_scale", pl.side_force_scale)?;
        finite("right_angle_min_deg", pl.right_angle_min_deg)?;
        finite("right_angle_max_deg", pl.right_angle_max_deg)?;
        if pl.right_angle_min_deg > pl.right_angle_max_deg {
            return Err(ConfigError::AngleRange {
                field: "plunger right aim",
                min: pl.right_angle_min_deg,
                max: pl.right_angle_max_deg,
            });
        }
        non_negative("pull_offset_per_frame", pl.pull_offset_per_frame)?;
        non_negative("max_pull_offset", pl.max_pull_offset)?;

        Ok(())
    }
}
