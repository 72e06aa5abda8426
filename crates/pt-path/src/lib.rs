//! `pt-path` — the path graph a carrier travels along.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`graph`]   | `PathGraph` (node arena + chains), `WaypointNode`, `PathChain`|
//! | [`builder`] | `PathGraphBuilder` — validated construction                  |
//! | [`loader`]  | `load_graph_csv` / `load_graph_reader`                       |
//! | [`error`]   | `PathError`, `PathResult<T>`                                 |
//!
//! # Model
//!
//! Every node lives in one arena `Vec` indexed by [`NodeId`][pt_core::NodeId].
//! A chain owns a contiguous index range of that arena, so `prev`/`next`
//! links are derived from the range and can never dangle.  Chains may name a
//! successor chain; the link is a plain [`ChainId`][pt_core::ChainId] used for
//! traversal only, so several chains can share one successor and a chain may
//! even link back to itself (a loop track).
//!
//! A built `PathGraph` is immutable and `Sync`: any number of carriers can
//! traverse it concurrently through shared references.

pub mod builder;
pub mod error;
pub mod graph;
pub mod loader;

#[cfg(test)]
mod tests;

pub use builder::PathGraphBuilder;
pub use error::{PathError, PathResult};
pub use graph::{PathChain, PathGraph, WaypointNode};
pub use loader::{load_graph_csv, load_graph_reader};
