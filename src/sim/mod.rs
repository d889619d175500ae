//! Deterministic simulation module
//!
//! All table physics lives here. This module must be pure and deterministic:
//! - Fixed timestep with a fixed sub-step count
//! - Randomness only through an injected generator
//! - Stable iteration order (flippers left then right, bumpers by layout index)
//! - No rendering, input or audio dependencies

pub mod collision;
pub mod flipper;
pub mod integrate;
pub mod resolve;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, circle_circle_collide, reflect_velocity, segment_circle_collide};
pub use flipper::{Flipper, FlipperSide};
pub use integrate::{clamp_speed, integrate_ball};
pub use resolve::{SubstepReport, resolve_substep};
pub use state::{Ball, Bumper, GamePhase, Table};
pub use tick::{FrameInput, FrameOutcome, step_frame};
