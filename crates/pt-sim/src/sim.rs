//! The `Sim` struct and its tick loop.

use tracing::{debug, info};

use pt_core::{CarrierId, CarrierRng, SimClock, SimConfig, Tick};
use pt_engine::{EventLog, InputSnapshot, MovementEngine, TickReport};
use pt_path::PathGraph;

use crate::{InputModel, SimContext, SimObserver, SimResult};

/// What a call to [`Sim::run`] did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks processed by this call.
    pub ticks: u64,

    /// Carriers that have reached their end.
    pub carriers_at_end: usize,

    /// Sink hook failures across all carriers and ticks.
    pub sink_failures: u64,

    /// `run` returned before `end_tick` because every carrier was done.
    pub stopped_early: bool,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The fleet simulation runner.
///
/// `Sim<M>` holds the shared graph, one [`MovementEngine`] and one
/// [`CarrierRng`] per carrier, and drives the three-phase tick loop:
///
/// 1. **Sample**: ask the [`InputModel`] for every carrier's signals.
/// 2. **Move**: tick every engine; notifications land in per-carrier logs.
/// 3. **Dispatch** (sequential, ascending `CarrierId` for determinism): hand
///    each logged notification to the observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: InputModel> {
    /// Global configuration (tick length, total ticks, seed, …).
    pub config: SimConfig,

    /// Simulation clock: current tick and its mapping to seconds.
    pub clock: SimClock,

    /// The path graph every carrier moves on.  Never mutated after build.
    pub graph: PathGraph,

    /// Per-carrier engines, indexed by `CarrierId`.
    pub engines: Vec<MovementEngine>,

    /// Per-carrier deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: Vec<CarrierRng>,

    /// The input model.  Called once per carrier per tick.
    pub model: M,

    /// Per-carrier notification buffers, drained every tick.
    pub(crate) logs: Vec<EventLog>,
}

impl<M: InputModel> Sim<M> {
    // ── Public API ────────────────────────────────────────────────────────

    pub fn carrier_count(&self) -> usize {
        self.engines.len()
    }

    pub fn engine(&self, carrier: CarrierId) -> &MovementEngine {
        &self.engines[carrier.index()]
    }

    /// `true` once every carrier has reached its end.
    pub fn all_at_end(&self) -> bool {
        self.engines.iter().all(MovementEngine::is_at_end)
    }

    /// Run from the current tick to `config.end_tick()`, or until every
    /// carrier has reached its end when `config.stop_when_all_at_end` is set.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        let mut summary = RunSummary::default();
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break;
            }
            if self.config.stop_when_all_at_end && self.all_at_end() {
                info!(tick = %now, "every carrier reached its end, stopping early");
                summary.stopped_early = true;
                break;
            }
            self.step(now, observer, &mut summary);
        }
        observer.on_sim_end(self.clock.current_tick);
        summary.carriers_at_end = self.engines.iter().filter(|e| e.is_at_end()).count();
        Ok(summary)
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`
    /// and the early stop).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<RunSummary> {
        let mut summary = RunSummary::default();
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.step(now, observer, &mut summary);
        }
        summary.carriers_at_end = self.engines.iter().filter(|e| e.is_at_end()).count();
        Ok(summary)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, now: Tick, observer: &mut O, summary: &mut RunSummary) {
        observer.on_tick_start(now);
        let reports = self.process_tick(now);

        // ── Phase 3: dispatch in CarrierId order ──────────────────────────
        for (i, log) in self.logs.iter_mut().enumerate() {
            let carrier = CarrierId(i as u32);
            for event in log.events.drain(..) {
                observer.on_carrier_event(now, carrier, event);
            }
        }

        summary.sink_failures += reports.iter().map(|r| r.sink_failures as u64).sum::<u64>();
        observer.on_tick_end(now, &reports);

        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.engines);
        }

        summary.ticks += 1;
        self.clock.advance();
    }

    fn process_tick(&mut self, now: Tick) -> Vec<TickReport> {
        // ── Phase 1: sample inputs ────────────────────────────────────────
        //
        // Every model call sees the fleet as it was at the start of the tick.
        let inputs = self.sample_inputs(now);

        // ── Phase 2: move ─────────────────────────────────────────────────
        let reports = self.move_carriers(&inputs);

        let arrived = reports.iter().filter(|r| r.reached_end).count();
        if arrived > 0 {
            debug!(tick = %now, arrived, "carriers reached their end");
        }
        reports
    }

    fn sample_inputs(&mut self, now: Tick) -> Vec<InputSnapshot> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let model = &self.model;
        let rngs  = &mut self.rngs;
        let ctx   = SimContext::new(now, self.clock.tick_secs, &self.graph, &self.engines);

        #[cfg(not(feature = "parallel"))]
        {
            rngs.iter_mut()
                .enumerate()
                .map(|(i, rng)| model.sample(CarrierId(i as u32), &ctx, rng))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            rngs.par_iter_mut()
                .enumerate()
                .map(|(i, rng)| model.sample(CarrierId(i as u32), &ctx, rng))
                .collect()
        }
    }

    fn move_carriers(&mut self, inputs: &[InputSnapshot]) -> Vec<TickReport> {
        let graph = &self.graph;
        let dt    = self.clock.tick_secs;

        #[cfg(not(feature = "parallel"))]
        {
            self.engines
                .iter_mut()
                .zip(self.logs.iter_mut())
                .zip(inputs)
                .map(|((engine, log), input)| engine.tick(graph, dt, input, log))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.engines
                .par_iter_mut()
                .zip(self.logs.par_iter_mut())
                .zip(inputs.par_iter())
                .map(|((engine, log), input)| engine.tick(graph, dt, input, log))
                .collect()
        }
    }
}
