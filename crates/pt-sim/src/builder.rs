//! Fluent builder for constructing a [`Sim`].

use tracing::{debug, info};

use pt_core::{CarrierConfig, CarrierId, CarrierRng, ChainId, SimConfig, Vec3};
use pt_engine::{EngineBuilder, EventLog};
use pt_path::PathGraph;

use crate::{InputModel, Sim, SimError, SimResult};

/// Where a carrier starts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Spawn {
    /// At rest on node `index` of `chain`.
    At { chain: ChainId, index: usize },

    /// At rest on the waypoint nearest to a world point.
    Near(Vec3),
}

impl From<ChainId> for Spawn {
    fn from(chain: ChainId) -> Self {
        Spawn::At { chain, index: 0 }
    }
}

/// Fluent builder for [`Sim<M>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick length, total ticks, seed, …
/// - [`PathGraph`]: shared by every carrier
/// - `M: InputModel`: where each carrier's signals come from
/// - at least one carrier via [`carrier`](Self::carrier) /
///   [`carriers`](Self::carriers)
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                      |
/// |----------------------------|------------------------------|
/// | `.carrier_config(c)`       | `CarrierConfig::default()`   |
/// | `.record_moving_cue(b)`    | `false`                      |
pub struct SimBuilder<M: InputModel> {
    config:         SimConfig,
    graph:          PathGraph,
    model:          M,
    carrier_config: CarrierConfig,
    spawns:         Vec<Spawn>,
    record_moving:  bool,
}

impl<M: InputModel> SimBuilder<M> {
    pub fn new(config: SimConfig, graph: PathGraph, model: M) -> Self {
        Self {
            config,
            graph,
            model,
            carrier_config: CarrierConfig::default(),
            spawns:         Vec::new(),
            record_moving:  false,
        }
    }

    /// Movement configuration shared by every carrier.
    pub fn carrier_config(mut self, config: CarrierConfig) -> Self {
        self.carrier_config = config;
        self
    }

    /// Add one carrier.  Carriers get ascending `CarrierId`s in call order.
    pub fn carrier(mut self, spawn: impl Into<Spawn>) -> Self {
        self.spawns.push(spawn.into());
        self
    }

    pub fn carriers<I>(mut self, spawns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Spawn>,
    {
        self.spawns.extend(spawns.into_iter().map(Into::into));
        self
    }

    /// Forward the per-tick `Moving` cue to the observer.  Off by default;
    /// the start/stop edges are always forwarded.
    pub fn record_moving_cue(mut self, record: bool) -> Self {
        self.record_moving = record;
        self
    }

    /// Validate inputs, place every carrier, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<M>> {
        self.config.validate()?;
        self.carrier_config.validate()?;
        if self.spawns.is_empty() {
            return Err(SimError::Config("at least one carrier is required".into()));
        }

        #[cfg(feature = "parallel")]
        if let Some(n) = self.config.num_threads {
            // Fails only if the global pool already exists, which is fine.
            if rayon::ThreadPoolBuilder::new().num_threads(n).build_global().is_err() {
                debug!(threads = n, "rayon global pool already initialised");
            }
        }

        let mut engines = Vec::with_capacity(self.spawns.len());
        let mut rngs = Vec::with_capacity(self.spawns.len());
        for (i, spawn) in self.spawns.iter().enumerate() {
            let carrier = CarrierId::try_from(i)
                .map_err(|_| SimError::Config(format!("too many carriers ({})", self.spawns.len())))?;
            let (chain, index) = resolve_spawn(&self.graph, *spawn)?;

            let engine = EngineBuilder::new(self.carrier_config.clone())
                .start_chain(chain)
                .start_index(index)
                .build(&self.graph)
                .map_err(|source| SimError::Engine { carrier, source })?;
            debug!(%carrier, %chain, index, "carrier placed");

            engines.push(engine);
            rngs.push(CarrierRng::new(self.config.seed, carrier));
        }

        let logs = (0..engines.len())
            .map(|_| EventLog { events: Vec::new(), skip_moving: !self.record_moving })
            .collect();

        info!(
            carriers = engines.len(),
            chains = self.graph.chain_count(),
            nodes = self.graph.node_count(),
            "simulation built"
        );

        Ok(Sim {
            clock:   self.config.make_clock(),
            config:  self.config,
            graph:   self.graph,
            engines,
            rngs,
            model:   self.model,
            logs,
        })
    }
}

fn resolve_spawn(graph: &PathGraph, spawn: Spawn) -> SimResult<(ChainId, usize)> {
    match spawn {
        Spawn::At { chain, index } => Ok((chain, index)),
        Spawn::Near(point) => {
            let node = graph
                .nearest_node(point)
                .map(|id| graph.node(id))
                .ok_or(SimError::NoNodeNear(point))?;
            let index = graph
                .chain(node.chain)
                .index_of(node.id)
                .ok_or(SimError::NoNodeNear(point))?;
            Ok((node.chain, index))
        }
    }
}
