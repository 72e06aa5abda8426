//! Path graph representation.
//!
//! # Data layout
//!
//! Nodes of all chains share one arena.  Chain `c` owns the slice
//!
//! ```text
//! nodes[ chain.first .. chain.first + chain.len ]
//! ```
//!
//! so "node `i` of chain `c`" is a single addition.  Segment lengths are
//! precomputed at build time; segment `i` runs from node `i` to node `i + 1`
//! and a chain with `n` nodes has `n - 1` segments.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps world positions to the nearest `NodeId`.  Used
//! at spawn time to pick the chain a carrier should start on.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use pt_core::{ChainId, CoreError, CoreResult, NodeId, Vec3};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub(crate) struct NodeEntry {
    pub(crate) point: [f32; 3],
    pub(crate) id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── WaypointNode ──────────────────────────────────────────────────────────────

/// One waypoint.  Immutable once the graph is built.
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointNode {
    pub id: NodeId,

    /// The chain that owns this node.
    pub chain: ChainId,

    /// World position.
    pub position: Vec3,

    /// Previous node in the same chain; `None` at the chain origin.
    pub prev: Option<NodeId>,

    /// Next node in the same chain; `None` at the chain terminal.
    pub next: Option<NodeId>,

    /// Successor chain, set only on the terminal node of a linked chain.
    pub next_chain: Option<ChainId>,
}

impl WaypointNode {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }
}

// ── PathChain ─────────────────────────────────────────────────────────────────

/// An ordered run of waypoint nodes plus an optional successor chain.
///
/// Invariant: `len >= 1`, enforced by [`PathGraphBuilder::build`][crate::PathGraphBuilder::build].
#[derive(Clone, Debug, PartialEq)]
pub struct PathChain {
    pub id:   ChainId,
    pub name: String,

    /// Arena index of node 0.
    pub(crate) first: u32,

    /// Number of nodes.
    pub(crate) len: u32,

    /// Length of each segment; `len - 1` entries.
    pub(crate) segment_lengths: Vec<f32>,

    /// Chain to continue on after the terminal node.
    pub successor: Option<ChainId>,
}

impl PathChain {
    /// Number of nodes (always at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always `false` for a chain that came out of the builder.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the terminal node.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.len() - 1
    }

    /// Number of segments (`len - 1`).
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segment_lengths.len()
    }

    /// Arena id of node `index` of this chain.
    ///
    /// # Panics
    /// Panics in debug mode if `index >= len`.
    #[inline]
    pub fn node_id(&self, index: usize) -> NodeId {
        debug_assert!(index < self.len(), "node index {index} out of range for chain {}", self.id);
        NodeId(self.first + index as u32)
    }

    /// Position of `node` within this chain, `None` if it belongs elsewhere.
    #[inline]
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        node.0
            .checked_sub(self.first)
            .filter(|&i| i < self.len)
            .map(|i| i as usize)
    }

    /// Length of segment `index` (node `index` → node `index + 1`).
    #[inline]
    pub fn segment_length(&self, index: usize) -> f32 {
        self.segment_lengths[index]
    }

    /// Sum of all segment lengths.
    pub fn total_length(&self) -> f32 {
        self.segment_lengths.iter().sum()
    }

    /// Distance from the chain origin to `(index, fraction)`.
    pub fn distance_at(&self, index: usize, fraction: f32) -> f32 {
        let before: f32 = self.segment_lengths[..index.min(self.segment_count())].iter().sum();
        match self.segment_lengths.get(index) {
            Some(len) => before + len * fraction,
            None      => before,
        }
    }
}

// ── PathGraph ─────────────────────────────────────────────────────────────────

/// Arena of waypoint nodes grouped into chains.
///
/// Do not construct directly; use [`PathGraphBuilder`][crate::PathGraphBuilder]
/// or the CSV loader.
#[derive(Clone)]
pub struct PathGraph {
    pub(crate) nodes:       Vec<WaypointNode>,
    pub(crate) chains:      Vec<PathChain>,
    pub(crate) by_name:     FxHashMap<String, ChainId>,
    pub(crate) spatial_idx: RTree<NodeEntry>,
}

impl PathGraph {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    pub fn chains(&self) -> impl Iterator<Item = &PathChain> + '_ {
        self.chains.iter()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Node by arena id.  Panics on an id that did not come from this graph.
    #[inline]
    pub fn node(&self, id: NodeId) -> &WaypointNode {
        &self.nodes[id.index()]
    }

    pub fn try_node(&self, id: NodeId) -> CoreResult<&WaypointNode> {
        self.nodes.get(id.index()).ok_or(CoreError::NodeNotFound(id))
    }

    /// Chain by id.  Panics on an id that did not come from this graph.
    #[inline]
    pub fn chain(&self, id: ChainId) -> &PathChain {
        &self.chains[id.index()]
    }

    pub fn try_chain(&self, id: ChainId) -> CoreResult<&PathChain> {
        self.chains.get(id.index()).ok_or(CoreError::ChainNotFound(id))
    }

    pub fn chain_by_name(&self, name: &str) -> Option<ChainId> {
        self.by_name.get(name).copied()
    }

    /// Node `index` of `chain`.
    #[inline]
    pub fn chain_node(&self, chain: ChainId, index: usize) -> &WaypointNode {
        self.node(self.chain(chain).node_id(index))
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// World position at `fraction` along segment `index` of `chain`.
    ///
    /// On the terminal node (no segment ahead) the node position is returned
    /// regardless of `fraction`.
    pub fn position_at(&self, chain: ChainId, index: usize, fraction: f32) -> Vec3 {
        let c = self.chain(chain);
        let from = self.node(c.node_id(index)).position;
        if index >= c.last_index() {
            return from;
        }
        let to = self.node(c.node_id(index + 1)).position;
        from.lerp(to, fraction)
    }

    /// Unit direction of segment `index` of `chain`, or `Vec3::ZERO` for a
    /// zero-length segment or the terminal node.
    pub fn segment_direction(&self, chain: ChainId, index: usize) -> Vec3 {
        let c = self.chain(chain);
        if index >= c.last_index() {
            return Vec3::ZERO;
        }
        let from = self.node(c.node_id(index)).position;
        let to = self.node(c.node_id(index + 1)).position;
        (to - from).normalize_or_zero()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest waypoint to `pos`.  `None` only for an empty graph.
    pub fn nearest_node(&self, pos: Vec3) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&pos.to_array())
            .map(|e| e.id)
    }
}
