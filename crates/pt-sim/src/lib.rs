//! `pt-sim` — fleet tick loop for the rust_pt path transport engine.
//!
//! Many carriers share one immutable [`PathGraph`][pt_path::PathGraph]; each
//! is driven by its own [`MovementEngine`][pt_engine::MovementEngine].
//!
//! # Three-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Sample    — InputModel::sample for every carrier, each with its own
//!                 CarrierRng (parallel with the `parallel` feature).
//!   ② Move      — MovementEngine::tick for every carrier into a per-carrier
//!                 EventLog (parallel with the `parallel` feature).
//!   ③ Dispatch  — drain the event logs in ascending CarrierId order into
//!                 SimObserver::on_carrier_event.
//!   stop early once every carrier has reached its end (optional).
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs phases ① and ② on Rayon's thread pool.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pt_core::{CarrierConfig, SimConfig};
//! use pt_sim::{AlwaysPush, NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), graph, AlwaysPush(3))
//!     .carrier_config(CarrierConfig::default())
//!     .carriers([main, main, main])
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod model;
pub mod observer;
pub mod sim;


pub use builder::{SimBuilder, Spawn};
pub use context::SimContext;
pub use error::{SimError, SimResult};
pub use model::{AlwaysPush, IdleModel, InputModel};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunSummary, Sim};
