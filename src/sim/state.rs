//! Table state and core simulation types
//!
//! Everything one frame reads or writes lives in [`Table`]. The step driver
//! takes it by `&mut` and holds no state of its own.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::flipper::{Flipper, FlipperSide};
use crate::config::{BumperSpec, Config, ConfigError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting on the launcher, waiting for a launch impulse
    Ready,
    /// Sub-stepped physics active
    Playing,
    /// No balls left; only a reset leaves this phase
    GameOver,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }
}

/// A static round bumper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bumper {
    pub center: Vec2,
    pub radius: f32,
    pub score: u64,
    /// Frames left in the hit effect
    pub hit_timer: u32,
}

impl From<&BumperSpec> for Bumper {
    fn from(spec: &BumperSpec) -> Self {
        Self {
            center: spec.center,
            radius: spec.radius,
            score: spec.score,
            hit_timer: 0,
        }
    }
}

impl Bumper {
    /// Whether the hit effect is showing
    pub fn is_lit(&self) -> bool {
        self.hit_timer > 0
    }

    /// Count the hit effect down by one frame
    pub fn tick_timer(&mut self) {
        self.hit_timer = self.hit_timer.saturating_sub(1);
    }
}

/// Complete simulation state for one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub(crate) config: Config,
    pub ball: Ball,
    pub left_flipper: Flipper,
    pub right_flipper: Flipper,
    /// Fixed layout, checked in this order
    pub bumpers: Vec<Bumper>,
    pub score: u64,
    pub balls_remaining: u32,
    pub phase: GamePhase,
    /// Frames stepped since the last reset
    pub frames: u64,
}

impl Table {
    /// Build a table in the Ready phase from a validated config
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let table = Self {
            ball: Ball::new(config.table.launch_position, config.table.ball_radius),
            left_flipper: Flipper::new(FlipperSide::Left, &config.flippers),
            right_flipper: Flipper::new(FlipperSide::Right, &config.flippers),
            bumpers: config.bumpers.layout.iter().map(Bumper::from).collect(),
            score: 0,
            balls_remaining: config.table.balls_per_game,
            phase: GamePhase::Ready,
            frames: 0,
            config,
        };
        Ok(table)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn flippers(&self) -> [&Flipper; 2] {
        [&self.left_flipper, &self.right_flipper]
    }

    pub fn bumpers(&self) -> &[Bumper] {
        &self.bumpers
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn balls_remaining(&self) -> u32 {
        self.balls_remaining
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Frames stepped since the last reset
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Put the ball back on the launcher, at rest
    pub fn reset_ball(&mut self) {
        self.ball = Ball::new(self.config.table.launch_position, self.config.table.ball_radius);
    }

    /// Reinitialize everything to the start of a game
    pub fn reset(&mut self) {
        self.reset_ball();
        self.left_flipper.reset();
        self.right_flipper.reset();
        for bumper in &mut self.bumpers {
            bumper.hit_timer = 0;
        }
        self.score = 0;
        self.balls_remaining = self.config.table.balls_per_game;
        self.phase = GamePhase::Ready;
        self.frames = 0;
    }

    /// Consume one ball and move to Ready or GameOver
    pub(crate) fn lose_ball(&mut self) {
        self.balls_remaining = self.balls_remaining.saturating_sub(1);
        if self.balls_remaining == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("Game over with score {}", self.score);
        } else {
            self.phase = GamePhase::Ready;
            self.reset_ball();
            log::info!("Ball lost, {} remaining", self.balls_remaining);
        }
    }
}
