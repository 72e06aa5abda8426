//! Per-carrier movement state.

use std::fmt;

use pt_core::ChainId;

// ── MotionState ───────────────────────────────────────────────────────────────

/// What drove the carrier's speed this tick.
///
/// `Stopped` covers both "at rest" and "coasting down to rest": no push and
/// no roll permission, so speed decays toward zero.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionState {
    #[default]
    Stopped,
    Pushing,
    RollingForward,
    RollingBackward,
}

impl MotionState {
    #[inline]
    pub fn is_rolling(self) -> bool {
        matches!(self, MotionState::RollingForward | MotionState::RollingBackward)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MotionState::Stopped         => "stopped",
            MotionState::Pushing         => "pushing",
            MotionState::RollingForward  => "rolling_forward",
            MotionState::RollingBackward => "rolling_backward",
        }
    }
}

impl fmt::Display for MotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// Direction of travel along the chain, derived from the sign of the speed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Forward,
    Backward,
    Still,
}

impl Direction {
    #[inline]
    pub fn from_speed(speed: f32) -> Self {
        if speed > 0.0 {
            Direction::Forward
        } else if speed < 0.0 {
            Direction::Backward
        } else {
            Direction::Still
        }
    }

    /// `+1.0`, `-1.0` or `0.0`.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward  => 1.0,
            Direction::Backward => -1.0,
            Direction::Still    => 0.0,
        }
    }
}

// ── CarrierState ──────────────────────────────────────────────────────────────

/// Where a carrier is on the path graph and how fast it is going.
///
/// `(chain, index, fraction)` addresses a point on segment `index` of
/// `chain`.  `fraction` is kept in `[0, 1)`; crossing a node carries into
/// `index` instead.  When the carrier sits on a chain's terminal node there is
/// no segment ahead, and `index == chain.len() - 1` with `fraction == 0`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarrierState {
    /// The chain currently being traversed.  Borrowed from the graph, not owned.
    pub chain: ChainId,

    /// Segment index within `chain`.
    pub index: usize,

    /// Progress along the segment, `0.0` meaning exactly on node `index`.
    pub fraction: f32,

    /// Signed speed; positive advances toward node `index + 1`.
    pub speed: f32,

    /// Set once, when the terminal node of a chain without successor is
    /// reached.  Never cleared.
    pub at_end: bool,

    /// Speed-law branch taken on the most recent tick.
    pub motion: MotionState,

    /// Rolling flag from the previous tick (edge detection only).
    pub was_rolling: bool,

    /// Moving flag from the previous tick (edge detection only).
    pub was_moving: bool,
}

impl CarrierState {
    /// A carrier at rest on node `index` of `chain`.
    pub fn at_node(chain: ChainId, index: usize) -> Self {
        Self {
            chain,
            index,
            fraction:    0.0,
            speed:       0.0,
            at_end:      false,
            motion:      MotionState::Stopped,
            was_rolling: false,
            was_moving:  false,
        }
    }

    /// A carrier at rest on the first node of `chain`.
    #[inline]
    pub fn at_chain_start(chain: ChainId) -> Self {
        Self::at_node(chain, 0)
    }

    /// `true` when the carrier cannot regress any further on this chain.
    #[inline]
    pub fn at_origin(&self) -> bool {
        self.index == 0 && self.fraction <= 0.0
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::from_speed(self.speed)
    }

    /// Move onto the first node of `chain`, keeping speed and edge flags.
    pub(crate) fn enter_chain(&mut self, chain: ChainId) {
        self.chain    = chain;
        self.index    = 0;
        self.fraction = 0.0;
    }
}
