//! The per-carrier movement engine.

use tracing::warn;

use pt_core::{CarrierConfig, Quat, Vec3};
use pt_motion::{
    CarrierState, MotionState, RollingEdge, SpeedController, SpeedInputs, StepEvent,
    StepIntegrator,
};
use pt_path::{PathGraph, WaypointNode};

use crate::{CarrierInputs, CarrierObserver, NotifyResult};

/// What one [`MovementEngine::tick`] did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickReport {
    pub motion: MotionState,
    pub speed:  f32,

    /// World position after the tick.
    pub position: Vec3,

    /// Position change during the tick.
    pub displacement: Vec3,

    /// Sub-steps the integrator took (0 when the carrier did not integrate).
    pub substeps: u32,

    /// The carrier became terminal this tick.
    pub reached_end: bool,

    /// `can_move()` was false; nothing was updated.
    pub halted: bool,

    /// Sink hooks that returned an error this tick.
    pub sink_failures: u32,
}

/// Moves one carrier along a [`PathGraph`].
///
/// The engine owns the carrier's [`CarrierState`] and pose, and borrows the
/// graph for the duration of each tick, so any number of engines can share
/// one graph.  Build one with [`EngineBuilder`][crate::EngineBuilder].
#[derive(Clone, Debug)]
pub struct MovementEngine {
    pub(crate) config:     CarrierConfig,
    pub(crate) state:      CarrierState,
    pub(crate) speed:      SpeedController,
    pub(crate) integrator: StepIntegrator,

    pub(crate) position: Vec3,
    pub(crate) facing:   Vec3,
    pub(crate) velocity: Vec3,

    /// Scratch buffer reused across ticks.
    pub(crate) events: Vec<StepEvent>,
}

impl MovementEngine {
    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> &CarrierState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &CarrierConfig {
        &self.config
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.state.speed
    }

    #[inline]
    pub fn motion(&self) -> MotionState {
        self.state.motion
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.state.at_end
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit vector the carrier faces: the path-forward direction of its most
    /// recent movement, even while reversing.
    #[inline]
    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    /// Rotation taking `+X` onto [`facing`](Self::facing).
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_arc(Vec3::X, self.facing)
    }

    /// Displacement covered during the last tick.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Seconds since push was last applied.
    pub fn time_since_push(&self) -> f32 {
        self.speed.time_since_push()
    }

    /// The node the carrier is on or has most recently passed.
    pub fn current_node<'g>(&self, graph: &'g PathGraph) -> &'g WaypointNode {
        graph.chain_node(self.state.chain, self.state.index)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the carrier by one tick of `dt` seconds.
    ///
    /// `inputs` is queried fresh every tick; `sink` receives every lifecycle
    /// notification in the order it happens.  A `dt` that is negative or not
    /// finite leaves the carrier untouched and notifies nothing.
    pub fn tick<I, O>(
        &mut self,
        graph:  &PathGraph,
        dt:     f32,
        inputs: &I,
        sink:   &mut O,
    ) -> TickReport
    where
        I: CarrierInputs + ?Sized,
        O: CarrierObserver + ?Sized,
    {
        if !(dt.is_finite() && dt >= 0.0) {
            warn!(dt, chain = %self.state.chain, "rejected tick with invalid dt");
            return self.report(Vec3::ZERO, 0, 0);
        }

        let mut failures = 0u32;

        if !inputs.can_move() {
            notify("on_halted", sink.on_halted(), &mut failures);
            let mut report = self.report(Vec3::ZERO, 0, failures);
            report.halted = true;
            return report;
        }

        // ── Speed ─────────────────────────────────────────────────────────
        let signals = SpeedInputs {
            push:          inputs.can_receive_push(),
            capture_rate:  inputs.capture_rate(),
            roll_forward:  inputs.can_roll_forward(),
            roll_backward: inputs.can_roll_backward(),
        };
        let update = self.speed.update(&mut self.state, &signals, dt, &self.config);
        match update.rolling_edge {
            Some(RollingEdge::Started) => {
                notify("on_start_rolling", sink.on_start_rolling(), &mut failures)
            }
            Some(RollingEdge::Stopped) => {
                notify("on_stop_rolling", sink.on_stop_rolling(), &mut failures)
            }
            None => {}
        }

        // ── Stopped ───────────────────────────────────────────────────────
        if self.state.speed == 0.0 || self.state.at_end {
            self.velocity = Vec3::ZERO;
            if self.state.was_moving {
                self.state.was_moving = false;
                notify("on_stop_moving", sink.on_stop_moving(), &mut failures);
            }
            return self.report(Vec3::ZERO, 0, failures);
        }

        // ── Integrate ─────────────────────────────────────────────────────
        let direction = self.state.direction();
        let distance = self.state.speed.abs() * dt;
        self.events.clear();
        let outcome =
            self.integrator
                .integrate(graph, &mut self.state, direction, distance, &mut self.events);

        let mut blocked = false;
        for event in self.events.drain(..) {
            match event {
                StepEvent::NodeChanged(id) => {
                    notify("on_node_changed", sink.on_node_changed(graph.node(id)), &mut failures)
                }
                StepEvent::ReachedEnd => {
                    notify("on_reached_end", sink.on_reached_end(), &mut failures);
                    if self.config.enable_physics_at_end {
                        notify("enable_physics_at_end", sink.enable_physics_at_end(), &mut failures);
                    }
                }
                StepEvent::BlockedAtOrigin => {
                    self.state.speed = 0.0;
                    blocked = true;
                }
                StepEvent::ChainSwitched { .. } => {}
            }
        }

        // ── Pose ──────────────────────────────────────────────────────────
        let new_position = graph.position_at(self.state.chain, self.state.index, self.state.fraction);
        let displacement = new_position - self.position;
        if let Some(forward) = (displacement * direction.sign()).try_normalize() {
            self.facing = forward;
        }
        self.velocity = displacement;
        self.position = new_position;

        // ── Moving cue ────────────────────────────────────────────────────
        // A carrier that arrives or hits the origin stops in the same tick.
        let came_to_rest = self.state.at_end || blocked;
        if !self.state.was_moving {
            if !came_to_rest || displacement != Vec3::ZERO {
                self.state.was_moving = true;
                notify("on_start_moving", sink.on_start_moving(), &mut failures);
            }
        } else if !came_to_rest {
            notify("on_moving", sink.on_moving(), &mut failures);
        }
        if came_to_rest && self.state.was_moving {
            self.state.was_moving = false;
            notify("on_stop_moving", sink.on_stop_moving(), &mut failures);
        }

        let mut report = self.report(displacement, outcome.substeps, failures);
        report.reached_end = outcome.reached_end;
        report
    }

    fn report(&self, displacement: Vec3, substeps: u32, sink_failures: u32) -> TickReport {
        TickReport {
            motion: self.state.motion,
            speed: self.state.speed,
            position: self.position,
            displacement,
            substeps,
            reached_end: false,
            halted: false,
            sink_failures,
        }
    }
}

/// Log-and-continue boundary for sink hooks.
fn notify(hook: &'static str, result: NotifyResult, failures: &mut u32) {
    if let Err(err) = result {
        *failures += 1;
        warn!(hook, error = %err, "notification sink failed, continuing tick");
    }
}
