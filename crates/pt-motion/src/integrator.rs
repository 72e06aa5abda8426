//! Sub-stepped distance consumption along the path graph.
//!
//! A tick's travel distance is consumed in slices that never extend past the
//! end of the current segment.  Each node crossing therefore happens in its
//! own sub-step, so no node-change notification is skipped and a chain
//! terminal is never overshot, however long the tick.
//!
//! Distance maps to fraction through the segment's own length: a short
//! segment is crossed with less distance than a long one.

use tracing::{debug, info, trace, warn};

use pt_core::{CarrierConfig, ChainId, NodeId};
use pt_path::PathGraph;

use crate::{CarrierState, Direction};

/// Largest representable fraction below 1.
const MAX_FRACTION: f32 = 1.0 - f32::EPSILON;

/// Something that happened during integration, in order of occurrence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// The carrier's current node changed to this node.
    NodeChanged(NodeId),

    /// The terminal node of `from` handed over to the start of `to`.
    ChainSwitched { from: ChainId, to: ChainId },

    /// The terminal node of the final chain was reached.
    ReachedEnd,

    /// Backward travel hit the origin of the current chain.
    BlockedAtOrigin,
}

/// Summary of one [`StepIntegrator::integrate`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StepOutcome {
    /// Path distance actually travelled.
    pub consumed: f32,

    /// Number of sub-steps taken.
    pub substeps: u32,

    /// The carrier became terminal during this call.
    pub reached_end: bool,

    /// Backward travel was cut short at the chain origin.
    pub blocked_at_origin: bool,

    /// Integration stopped because the sub-step limit was hit.
    pub exhausted: bool,
}

/// Result of a single sub-step: the distance still to consume.
enum Substep {
    Continue(f32),
    Terminal(f32),
    Blocked(f32),
}

/// Consumes travel distance against a [`PathGraph`], one segment at a time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepIntegrator {
    epsilon:      f32,
    max_substeps: u32,
}

impl StepIntegrator {
    pub fn new(epsilon: f32, max_substeps: u32) -> Self {
        Self { epsilon, max_substeps }
    }

    pub fn from_config(config: &CarrierConfig) -> Self {
        Self::new(config.step_epsilon, config.max_substeps)
    }

    /// Move `state` by `distance` in `direction`.
    ///
    /// Sub-steps repeat while more than `epsilon` remains.  Integration ends
    /// early on reaching the final terminal, on hitting the chain origin while
    /// reversing, or after `max_substeps` sub-steps.  A carrier that is
    /// already `at_end` does not move.
    ///
    /// Events are appended to `events` in the order they happen.
    pub fn integrate(
        &self,
        graph:     &PathGraph,
        state:     &mut CarrierState,
        direction: Direction,
        distance:  f32,
        events:    &mut Vec<StepEvent>,
    ) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if state.at_end {
            return outcome;
        }
        let forward = match direction {
            Direction::Forward  => true,
            Direction::Backward => false,
            Direction::Still    => return outcome,
        };

        let mut remaining = distance.abs();
        while remaining > self.epsilon {
            if outcome.substeps >= self.max_substeps {
                warn!(
                    chain = %state.chain,
                    index = state.index,
                    remaining,
                    "sub-step limit reached, dropping remaining distance"
                );
                outcome.exhausted = true;
                break;
            }
            outcome.substeps += 1;

            let step = if forward {
                self.forward_substep(graph, state, remaining, events)
            } else {
                self.backward_substep(graph, state, remaining, events)
            };

            match step {
                Substep::Continue(rest) => {
                    outcome.consumed += remaining - rest;
                    remaining = rest;
                }
                Substep::Terminal(rest) => {
                    outcome.consumed += remaining - rest;
                    outcome.reached_end = true;
                    break;
                }
                Substep::Blocked(rest) => {
                    outcome.consumed += remaining - rest;
                    outcome.blocked_at_origin = true;
                    break;
                }
            }
        }
        outcome
    }

    fn forward_substep(
        &self,
        graph:     &PathGraph,
        state:     &mut CarrierState,
        remaining: f32,
        events:    &mut Vec<StepEvent>,
    ) -> Substep {
        let chain = graph.chain(state.chain);
        if state.index >= chain.last_index() {
            return self.leave_chain(graph, state, remaining, events);
        }

        let len  = chain.segment_length(state.index);
        let room = (1.0 - state.fraction) * len;
        if remaining < room {
            let advanced = state.fraction + remaining / len;
            if advanced < 1.0 {
                state.fraction = advanced;
                return Substep::Continue(0.0);
            }
        }

        // Arrive exactly on the next node.
        state.index += 1;
        state.fraction = 0.0;
        let rest = (remaining - room).max(0.0);
        let node = chain.node_id(state.index);
        trace!(chain = %state.chain, %node, "node reached");
        events.push(StepEvent::NodeChanged(node));

        if state.index == chain.last_index() {
            return self.leave_chain(graph, state, rest, events);
        }
        Substep::Continue(rest)
    }

    /// The carrier is on the terminal node of its chain: hand over to the
    /// successor chain, or become terminal.
    fn leave_chain(
        &self,
        graph:  &PathGraph,
        state:  &mut CarrierState,
        rest:   f32,
        events: &mut Vec<StepEvent>,
    ) -> Substep {
        let chain = graph.chain(state.chain);
        match chain.successor {
            Some(next) => {
                debug!(from = %chain.id, to = %next, rest, "chain hand-off");
                events.push(StepEvent::ChainSwitched { from: chain.id, to: next });
                state.enter_chain(next);
                Substep::Continue(rest)
            }
            None => {
                state.index = chain.last_index();
                state.fraction = 0.0;
                state.at_end = true;
                info!(chain = %chain.id, node = state.index, "reached end of path");
                events.push(StepEvent::ReachedEnd);
                Substep::Terminal(rest)
            }
        }
    }

    fn backward_substep(
        &self,
        graph:     &PathGraph,
        state:     &mut CarrierState,
        remaining: f32,
        events:    &mut Vec<StepEvent>,
    ) -> Substep {
        let chain = graph.chain(state.chain);

        if state.fraction <= 0.0 {
            if state.index == 0 {
                state.fraction = 0.0;
                events.push(StepEvent::BlockedAtOrigin);
                return Substep::Blocked(remaining);
            }

            // Step back into the previous segment and consume as much of it
            // as this sub-step allows, so fraction never rests at 1.
            state.index -= 1;
            let node = chain.node_id(state.index);
            trace!(chain = %state.chain, %node, "node reached (reversing)");
            events.push(StepEvent::NodeChanged(node));

            let len = chain.segment_length(state.index);
            if len <= 0.0 {
                state.fraction = 0.0;
                return Substep::Continue(remaining);
            }
            let slice = remaining.min(len);
            state.fraction = (1.0 - slice / len).clamp(0.0, MAX_FRACTION);
            return Substep::Continue(remaining - slice);
        }

        let len  = chain.segment_length(state.index);
        let room = state.fraction * len;
        if remaining < room {
            state.fraction = (state.fraction - remaining / len).max(0.0);
            return Substep::Continue(0.0);
        }
        state.fraction = 0.0;
        Substep::Continue(remaining - room)
    }
}
