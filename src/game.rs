//! Owned pinball session
//!
//! Pairs a [`Table`] with the seeded generator its bumpers and plunger draw
//! from, so a session replays identically from the same seed and inputs.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::{Config, ConfigError};
use crate::launcher::{LaunchAim, Plunger};
use crate::sim::{FrameInput, FrameOutcome, GamePhase, Table, step_frame};

/// A table, its launcher and its random source
#[derive(Debug, Clone)]
pub struct Pinball {
    seed: u64,
    rng: Pcg32,
    table: Table,
    plunger: Plunger,
}

impl Pinball {
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        let plunger = Plunger::new(config.plunger.clone());
        let table = Table::new(config)?;
        log::info!("Pinball table ready with seed {}", seed);
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            table,
            plunger,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn plunger(&self) -> &Plunger {
        &self.plunger
    }

    /// Advance one frame
    pub fn step_frame(&mut self, input: &FrameInput) -> FrameOutcome {
        let outcome = step_frame(&mut self.table, input, &mut self.rng);
        if outcome.ball_lost {
            self.plunger.cancel();
        }
        outcome
    }

    /// Hold the plunger for a frame (only while the ball waits on it)
    pub fn hold_plunger(&mut self) {
        if self.table.phase() == GamePhase::Ready {
            self.plunger.hold();
        }
    }

    /// Release the plunger, returning the impulse for the next frame's input
    pub fn release_plunger(&mut self, aim: LaunchAim) -> Option<glam::Vec2> {
        if self.table.phase() != GamePhase::Ready {
            self.plunger.cancel();
            return None;
        }
        self.plunger.release(aim, &mut self.rng)
    }

    /// Start over: full table reset and the generator back at its seed
    pub fn reset(&mut self) {
        self.table.reset();
        self.plunger.cancel();
        self.rng = Pcg32::seed_from_u64(self.seed);
        log::info!("Game reset");
    }
}
