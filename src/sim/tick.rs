//! Fixed timestep frame step
//!
//! One call advances the table by one frame: flipper angles and bumper timers
//! move once, then the ball runs `sub_steps` slices of integration followed by
//! collision resolution.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::Rng;

use super::integrate::integrate_ball;
use super::resolve::resolve_substep;
use super::state::{GamePhase, Table};

/// Input intents for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Left flipper button held
    pub left_flipper: bool,
    /// Right flipper button held
    pub right_flipper: bool,
    /// Launch velocity from the launcher (only used in Ready)
    pub launch_impulse: Option<Vec2>,
}

/// What one frame produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    pub ball_lost: bool,
    pub launched: bool,
    pub score_delta: u64,
    /// Bumpers touched at least once this frame
    pub bumpers_hit: BTreeSet<usize>,
    /// Sub-steps actually run (fewer than configured when the ball was lost)
    pub substeps_run: u32,
}

/// Advance the table by one frame
pub fn step_frame<R: Rng + ?Sized>(
    table: &mut Table,
    input: &FrameInput,
    rng: &mut R,
) -> FrameOutcome {
    let mut outcome = FrameOutcome::default();
    table.frames += 1;

    table.left_flipper.update(input.left_flipper);
    table.right_flipper.update(input.right_flipper);

    for bumper in &mut table.bumpers {
        bumper.tick_timer();
    }

    match table.phase {
        GamePhase::Ready => {
            if let Some(impulse) = input.launch_impulse {
                if impulse.is_finite() {
                    table.ball.vel = impulse;
                    table.phase = GamePhase::Playing;
                    outcome.launched = true;
                    log::info!("Ball launched with velocity {:?}", impulse);
                } else {
                    log::warn!("Ignoring non-finite launch impulse {:?}", impulse);
                }
            }
        }

        GamePhase::Playing => {
            let sub_steps = table.config.physics.sub_steps;
            let dt = table.config.sub_step_dt();

            for _ in 0..sub_steps {
                integrate_ball(&mut table.ball, &table.config.physics, dt);
                let report = resolve_substep(table, rng);
                outcome.substeps_run += 1;
                outcome.score_delta += report.score;
                table.score += report.score;
                outcome.bumpers_hit.extend(report.bumpers_hit);

                if report.ball_lost {
                    outcome.ball_lost = true;
                    table.lose_ball();
                    break;
                }
            }
        }

        GamePhase::GameOver => {}
    }

    outcome
}
