//! Simulation time model.
//!
//! # Design
//!
//! Fleet runs advance in fixed steps counted by a monotonically increasing
//! `Tick`.  The mapping to simulated seconds is held in `SimClock`:
//!
//!   elapsed_secs = tick * tick_secs
//!
//! The movement engine itself only ever sees a `dt` in seconds, so callers
//! driving it from a variable-rate frame loop can bypass the clock entirely.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The current tick of a fleet run and its length in seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Seconds one tick represents (the engine's `dt`).
    pub tick_secs: f32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_secs: f32) -> Self {
        Self { tick_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.tick_secs as f64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Fleet run parameters, usually read from the `[sim]` table of a TOML file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Seconds per tick.  Default: 1/60.
    pub tick_secs: f32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Run seed; each carrier's input stream is derived from it.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Emit a snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    /// Return from `run` as soon as every carrier has reached its end.
    pub stop_when_all_at_end: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_secs:             1.0 / 60.0,
            total_ticks:           60 * 60 * 10,
            seed:                  42,
            num_threads:           None,
            output_interval_ticks: 60,
            stop_when_all_at_end:  true,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_secs)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !self.tick_secs.is_finite() || self.tick_secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "tick_secs must be positive, got {}",
                self.tick_secs
            )));
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
