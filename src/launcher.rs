//! Plunger launcher
//!
//! Holding the plunger builds force frame by frame up to a cap; releasing it
//! turns that force into the launch impulse handed to
//! [`step_frame`](crate::sim::step_frame).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::PlungerConfig;
use crate::direction_deg;

/// Direction nudge held while releasing the plunger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaunchAim {
    /// Straight up
    #[default]
    Straight,
    /// Up and to the left, split by `side_force_scale`
    Left,
    /// Up and to the right at a random elevation
    Right,
}

/// Plunger pull state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plunger {
    config: PlungerConfig,
    pull_frames: u32,
}

impl Plunger {
    pub fn new(config: PlungerConfig) -> Self {
        Self {
            config,
            pull_frames: 0,
        }
    }

    pub fn pull_frames(&self) -> u32 {
        self.pull_frames
    }

    /// Frames of pull that still count (a little past the force cap)
    pub fn max_pull_frames(&self) -> u32 {
        let to_cap = (self.config.max_force / self.config.force_per_frame) as u32;
        to_cap.saturating_add(self.config.overpull_frames)
    }

    /// Keep the plunger held for one more frame
    pub fn hold(&mut self) {
        self.pull_frames = self.pull_frames.saturating_add(1).min(self.max_pull_frames());
    }

    /// Launch speed for the current pull
    pub fn force(&self) -> f32 {
        (self.pull_frames as f32 * self.config.force_per_frame).min(self.config.max_force)
    }

    /// How far the plunger is drawn back, for display
    pub fn pull_offset(&self) -> f32 {
        (self.pull_frames as f32 * self.config.pull_offset_per_frame).min(self.config.max_pull_offset)
    }

    /// Drop the pull without launching
    pub fn cancel(&mut self) {
        self.pull_frames = 0;
    }

    /// Let go and produce a launch impulse (none if it was never pulled)
    pub fn release<R: Rng + ?Sized>(&mut self, aim: LaunchAim, rng: &mut R) -> Option<Vec2> {
        if self.pull_frames == 0 {
            return None;
        }
        let force = self.force();
        self.pull_frames = 0;

        let side = self.config.side_force_scale;
        let impulse = match aim {
            LaunchAim::Straight => Vec2::new(0.0, -force),
            LaunchAim::Left => Vec2::new(-force * side, -force * (1.0 - side)),
            LaunchAim::Right => {
                let elevation = rng
                    .random_range(self.config.right_angle_min_deg..=self.config.right_angle_max_deg);
                direction_deg(-elevation) * force
            }
        };
        Some(impulse)
    }
}
