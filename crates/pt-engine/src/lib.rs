//! `pt-engine` — drives one carrier along a path graph, one tick at a time.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`engine`]   | `MovementEngine`, `TickReport`                                |
//! | [`builder`]  | `EngineBuilder` — validated construction                      |
//! | [`inputs`]   | `CarrierInputs` capability trait, `InputSnapshot`             |
//! | [`observer`] | `CarrierObserver` notification sink, `EventLog`, `CarrierEvent`|
//! | [`error`]    | `EngineError`, `NotifyError`                                  |
//!
//! # Tick flow
//!
//! ```text
//! tick(graph, dt, inputs, sink):
//!   ⓪ dt valid?        — no: warn, return untouched
//!   ① can_move?        — no: sink.on_halted(), return untouched
//!   ② speed law        — SpeedController; rolling edges → sink
//!   ③ stopped?         — speed 0 or at end: stop edge → sink, return
//!   ④ integrate        — StepIntegrator; node / end events → sink
//!   ⑤ pose             — lerp position, facing, velocity
//!   ⑥ moving edge      — start / continuous cue, or stop on arrival → sink
//! ```
//!
//! Sink failures are logged and counted; they never abort a tick.

pub mod builder;
pub mod engine;
pub mod error;
pub mod inputs;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::{MovementEngine, TickReport};
pub use error::{EngineError, EngineResult, NotifyError, NotifyResult};
pub use inputs::{CarrierInputs, InputSnapshot};
pub use observer::{CarrierEvent, CarrierObserver, EventLog, NoopObserver};
