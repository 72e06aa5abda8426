//! Validated construction of a [`MovementEngine`].

use tracing::debug;

use pt_core::{CarrierConfig, ChainId, Vec3};
use pt_motion::{CarrierState, SpeedController, StepIntegrator};
use pt_path::PathGraph;

use crate::{EngineError, EngineResult, MovementEngine};

/// Fluent builder for [`MovementEngine`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default           |
/// |---------------------|-------------------|
/// | `.start_chain(id)`  | `ChainId(0)`      |
/// | `.start_index(i)`   | `0` (chain start) |
///
/// # Example
///
/// ```rust,ignore
/// let engine = EngineBuilder::new(CarrierConfig::default())
///     .start_chain(graph.chain_by_name("main").unwrap())
///     .build(&graph)?;
/// ```
#[derive(Clone, Debug)]
pub struct EngineBuilder {
    config:      CarrierConfig,
    start_chain: ChainId,
    start_index: usize,
}

impl EngineBuilder {
    pub fn new(config: CarrierConfig) -> Self {
        Self { config, start_chain: ChainId(0), start_index: 0 }
    }

    pub fn start_chain(mut self, chain: ChainId) -> Self {
        self.start_chain = chain;
        self
    }

    /// Start at rest on node `index` of the start chain instead of its first
    /// node.
    pub fn start_index(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    /// Validate the configuration and start position against `graph`.
    ///
    /// The carrier starts at rest, exactly on its start node, facing along the
    /// segment ahead (or `+X` if there is none).
    pub fn build(self, graph: &PathGraph) -> EngineResult<MovementEngine> {
        self.config.validate()?;

        let chain = graph.try_chain(self.start_chain)?;
        if self.start_index >= chain.len() {
            return Err(EngineError::StartIndexOutOfRange {
                chain: self.start_chain,
                index: self.start_index,
                len:   chain.len(),
            });
        }

        let state = CarrierState::at_node(self.start_chain, self.start_index);
        let position = graph.position_at(state.chain, state.index, 0.0);
        let facing = graph
            .segment_direction(state.chain, state.index)
            .try_normalize()
            .unwrap_or(Vec3::X);

        debug!(chain = %self.start_chain, index = self.start_index, "movement engine built");

        Ok(MovementEngine {
            integrator: StepIntegrator::from_config(&self.config),
            config:     self.config,
            state,
            speed:      SpeedController::new(),
            position,
            facing,
            velocity:   Vec3::ZERO,
            events:     Vec::new(),
        })
    }
}

impl MovementEngine {
    /// Build an engine at the start of `chain` with `config`.
    ///
    /// Shorthand for `EngineBuilder::new(config).start_chain(chain).build(graph)`.
    pub fn new(config: CarrierConfig, graph: &PathGraph, chain: ChainId) -> EngineResult<Self> {
        EngineBuilder::new(config).start_chain(chain).build(graph)
    }
}
