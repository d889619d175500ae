//! Flipper kinematics
//!
//! A flipper is a thick segment rotating about a fixed pivot. Its angle moves
//! once per frame; every sub-step of that frame sees the same angular
//! velocity, derived from the angle change across the frame.
//!
//! Angles are in degrees with positive values lifting the tip. The left
//! flipper points along `-angle`, the right one along `180° + angle`, so the
//! pair is mirrored about the table's vertical axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::FlipperConfig;
use crate::direction_deg;

/// Which side of the table a flipper sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipperSide {
    Left,
    Right,
}

impl FlipperSide {
    /// Screen-space direction of the flipper blade for a given angle
    fn blade_deg(self, angle_deg: f32) -> f32 {
        match self {
            FlipperSide::Left => -angle_deg,
            FlipperSide::Right => 180.0 + angle_deg,
        }
    }

    /// How a positive angle change turns the blade in screen space
    fn rotation_sign(self) -> f32 {
        match self {
            FlipperSide::Left => -1.0,
            FlipperSide::Right => 1.0,
        }
    }
}

/// A rotating flipper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flipper {
    pub side: FlipperSide,
    pub pivot: Vec2,
    pub length: f32,
    /// Full blade width; half of it is added to the ball radius on contact
    pub width: f32,
    /// Current angle (degrees)
    pub angle_deg: f32,
    /// Angle at the start of the current frame (degrees)
    pub prev_angle_deg: f32,
    pub min_deg: f32,
    pub max_deg: f32,
    /// Maximum rotation per frame (degrees)
    pub speed_deg: f32,
}

impl Flipper {
    pub fn new(side: FlipperSide, config: &FlipperConfig) -> Self {
        let pivot = match side {
            FlipperSide::Left => config.left_pivot,
            FlipperSide::Right => config.right_pivot,
        };
        Self {
            side,
            pivot,
            length: config.length,
            width: config.width,
            angle_deg: config.min_deg,
            prev_angle_deg: config.min_deg,
            min_deg: config.min_deg,
            max_deg: config.max_deg,
            speed_deg: config.speed_deg,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    /// Blade tip at the current angle
    pub fn tip(&self) -> Vec2 {
        self.pivot + direction_deg(self.side.blade_deg(self.angle_deg)) * self.length
    }

    /// Whether the flipper is held up (or on its way up)
    pub fn is_raised(&self) -> bool {
        self.angle_deg > self.min_deg
    }

    /// Whether the angle changed during the current frame
    pub fn is_moving(&self) -> bool {
        self.angle_deg != self.prev_angle_deg
    }

    /// Advance the angle one frame toward its held or resting limit
    ///
    /// The angle before the move is kept as `prev_angle_deg`, which is what
    /// the sub-steps of this frame measure the swing against.
    pub fn update(&mut self, active: bool) {
        self.prev_angle_deg = self.angle_deg;
        let target = if active { self.max_deg } else { self.min_deg };
        let delta = (target - self.angle_deg).clamp(-self.speed_deg, self.speed_deg);
        self.angle_deg += delta;
    }

    /// Screen-space angular velocity (radians per sub-step)
    pub fn angular_velocity(&self, sub_steps: u32) -> f32 {
        let change = (self.angle_deg - self.prev_angle_deg).to_radians();
        self.side.rotation_sign() * change / sub_steps.max(1) as f32
    }

    /// Velocity of the blade at `point` for one sub-step: v = ω × r
    pub fn surface_velocity(&self, point: Vec2, sub_steps: u32) -> Vec2 {
        let omega = self.angular_velocity(sub_steps);
        let r = point - self.pivot;
        Vec2::new(-omega * r.y, omega * r.x)
    }

    /// Back to the resting angle with no swing
    pub fn reset(&mut self) {
        self.angle_deg = self.min_deg;
        self.prev_angle_deg = self.min_deg;
    }
}
