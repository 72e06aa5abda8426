//! Read-only view of the fleet handed to input models.

use pt_core::{CarrierId, Tick};
use pt_engine::MovementEngine;
use pt_path::PathGraph;

/// Simulation state visible to [`InputModel::sample`][crate::InputModel::sample].
///
/// Built once per tick before any carrier moves, so every model call in a
/// tick sees the same fleet state regardless of evaluation order.
#[derive(Copy, Clone)]
pub struct SimContext<'a> {
    pub tick:      Tick,
    pub tick_secs: f32,
    pub graph:     &'a PathGraph,
    pub carriers:  &'a [MovementEngine],
}

impl<'a> SimContext<'a> {
    pub fn new(
        tick:      Tick,
        tick_secs: f32,
        graph:     &'a PathGraph,
        carriers:  &'a [MovementEngine],
    ) -> Self {
        Self { tick, tick_secs, graph, carriers }
    }

    /// Engine of `carrier`.
    ///
    /// # Panics
    /// Panics if `carrier` is not part of this fleet.
    #[inline]
    pub fn carrier(&self, carrier: CarrierId) -> &'a MovementEngine {
        &self.carriers[carrier.index()]
    }

    /// Simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.tick.0 as f64 * self.tick_secs as f64
    }
}
