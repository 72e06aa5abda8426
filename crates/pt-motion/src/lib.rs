//! `pt-motion` — the numeric heart of carrier movement.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`state`]      | `CarrierState`, `MotionState`, `Direction`                 |
//! | [`speed`]      | `SpeedController` — push / roll / decay speed law          |
//! | [`integrator`] | `StepIntegrator` — sub-stepped distance consumption        |
//!
//! # Per-tick flow
//!
//! 1. [`SpeedController::update`] turns the tick's external signals into a
//!    new signed speed and a [`MotionState`].
//! 2. [`StepIntegrator::integrate`] consumes `|speed| * dt` against the
//!    [`PathGraph`][pt_path::PathGraph] in sub-steps that never cross more
//!    than one node at a time, reporting every node change, chain hand-off
//!    and terminal condition as a [`StepEvent`].
//!
//! Neither type touches world position, orientation or notifications; that is
//! the movement engine's job (`pt-engine`).

pub mod integrator;
pub mod speed;
pub mod state;


pub use integrator::{StepEvent, StepIntegrator, StepOutcome};
pub use speed::{RollingEdge, SpeedController, SpeedInputs, SpeedUpdate};
pub use state::{CarrierState, Direction, MotionState};
