//! Simulation observer trait for progress reporting and data collection.

use pt_core::{CarrierId, Tick};
use pt_engine::{CarrierEvent, MovementEngine, TickReport};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — arrival printer
///
/// ```rust,ignore
/// struct Arrivals;
///
/// impl SimObserver for Arrivals {
///     fn on_carrier_event(&mut self, tick: Tick, carrier: CarrierId, event: CarrierEvent) {
///         if event == CarrierEvent::ReachedEnd {
///             println!("{tick}: carrier {carrier} delivered");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per carrier notification, in ascending `CarrierId` order
    /// and, per carrier, in the order the engine emitted them.
    fn on_carrier_event(&mut self, _tick: Tick, _carrier: CarrierId, _event: CarrierEvent) {}

    /// Called at the end of each tick with one report per carrier, indexed by
    /// `CarrierId`.
    fn on_tick_end(&mut self, _tick: Tick, _reports: &[TickReport]) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    ///
    /// Provides read-only access to every engine so that output writers can
    /// record positions without the sim knowing about any output format.
    fn on_snapshot(&mut self, _tick: Tick, _carriers: &[MovementEngine]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
