//! `pt-core` — foundational types for the `rust_pt` path transport engine.
//!
//! This crate is a dependency of every other `pt-*` crate.  It has no `pt-*`
//! dependencies and only a handful of external ones (`glam`, `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `ChainId`, `CarrierId`                      |
//! | [`capture`]     | `CaptureRate` tier signal                             |
//! | [`config`]      | `CarrierConfig` — speed caps, acceleration, stepping  |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `CarrierRng`, one seeded stream per carrier           |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! Positions use [`glam::Vec3`], re-exported here so downstream crates agree
//! on one vector type.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod capture;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use capture::CaptureRate;
pub use config::CarrierConfig;
pub use error::{CoreError, CoreResult};
pub use glam::{Quat, Vec3};
pub use ids::{CarrierId, ChainId, NodeId};
pub use rng::CarrierRng;
pub use time::{SimClock, SimConfig, Tick};
