//! Plain data row types written by output backends.

use pt_core::{CarrierId, Tick};
use pt_engine::{CarrierEvent, MovementEngine};
use pt_motion::MotionState;

/// One carrier's pose and speed at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarrierSnapshotRow {
    pub carrier_id: u32,
    pub tick:       u64,
    pub chain:      u32,
    pub index:      u32,
    pub fraction:   f32,
    pub x:          f32,
    pub y:          f32,
    pub z:          f32,
    pub speed:      f32,
    pub motion:     MotionState,
    pub at_end:     bool,
}

impl CarrierSnapshotRow {
    pub fn from_engine(carrier: CarrierId, tick: Tick, engine: &MovementEngine) -> Self {
        let state = engine.state();
        let pos = engine.position();
        Self {
            carrier_id: carrier.0,
            tick:       tick.0,
            chain:      state.chain.0,
            index:      state.index as u32,
            fraction:   state.fraction,
            x:          pos.x,
            y:          pos.y,
            z:          pos.z,
            speed:      state.speed,
            motion:     state.motion,
            at_end:     state.at_end,
        }
    }
}

/// One carrier notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarrierEventRow {
    pub tick:       u64,
    pub carrier_id: u32,
    pub event:      CarrierEvent,
}

/// Fleet totals for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub time_secs:     f64,
    /// Carriers whose position changed this tick.
    pub moving:        u64,
    /// Carriers that reached their end this tick.
    pub arrived:       u64,
    pub sink_failures: u64,
}
