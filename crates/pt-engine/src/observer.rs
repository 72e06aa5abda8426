//! Notification sink for carrier lifecycle events.

use std::fmt;

use pt_core::NodeId;
use pt_path::WaypointNode;

use crate::NotifyResult;

/// Callbacks invoked by [`MovementEngine::tick`][crate::MovementEngine::tick].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  A hook that returns `Err` is logged by
/// the engine and otherwise ignored; the rest of the tick still runs.
///
/// # Example — audio bridge
///
/// ```rust,ignore
/// struct CartAudio { player: AudioHandle }
///
/// impl CarrierObserver for CartAudio {
///     fn on_start_moving(&mut self) -> NotifyResult {
///         self.player.play("cart_start").map_err(|e| NotifyError(e.to_string()))
///     }
///     fn on_stop_moving(&mut self) -> NotifyResult {
///         self.player.play("cart_stop").map_err(|e| NotifyError(e.to_string()))
///     }
/// }
/// ```
pub trait CarrierObserver {
    /// The carrier's current node changed (forward or reversing).
    fn on_node_changed(&mut self, _node: &WaypointNode) -> NotifyResult {
        Ok(())
    }

    fn on_start_rolling(&mut self) -> NotifyResult {
        Ok(())
    }

    fn on_stop_rolling(&mut self) -> NotifyResult {
        Ok(())
    }

    /// Fired once, on the tick the final terminal node is reached.
    fn on_reached_end(&mut self) -> NotifyResult {
        Ok(())
    }

    fn on_start_moving(&mut self) -> NotifyResult {
        Ok(())
    }

    /// Continuous moving cue, every moving tick after the first.
    fn on_moving(&mut self) -> NotifyResult {
        Ok(())
    }

    fn on_stop_moving(&mut self) -> NotifyResult {
        Ok(())
    }

    /// Fired right after `on_reached_end` when the carrier is configured with
    /// `enable_physics_at_end`.
    fn enable_physics_at_end(&mut self) -> NotifyResult {
        Ok(())
    }

    /// The carrier is locked this tick; silence any movement cues.
    fn on_halted(&mut self) -> NotifyResult {
        Ok(())
    }
}

/// A [`CarrierObserver`] that does nothing.
pub struct NoopObserver;

impl CarrierObserver for NoopObserver {}

// ── CarrierEvent ──────────────────────────────────────────────────────────────

/// One notification, as recorded by [`EventLog`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CarrierEvent {
    NodeChanged(NodeId),
    StartRolling,
    StopRolling,
    ReachedEnd,
    StartMoving,
    Moving,
    StopMoving,
    PhysicsEnabled,
    Halted,
}

impl CarrierEvent {
    /// Stable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            CarrierEvent::NodeChanged(_) => "node_changed",
            CarrierEvent::StartRolling   => "start_rolling",
            CarrierEvent::StopRolling    => "stop_rolling",
            CarrierEvent::ReachedEnd     => "reached_end",
            CarrierEvent::StartMoving    => "start_moving",
            CarrierEvent::Moving         => "moving",
            CarrierEvent::StopMoving     => "stop_moving",
            CarrierEvent::PhysicsEnabled => "physics_enabled",
            CarrierEvent::Halted         => "halted",
        }
    }

    /// The node for `NodeChanged`, `None` otherwise.
    pub fn node(self) -> Option<NodeId> {
        match self {
            CarrierEvent::NodeChanged(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for CarrierEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarrierEvent::NodeChanged(n) => write!(f, "node_changed({n})"),
            other => f.write_str(other.as_str()),
        }
    }
}

// ── EventLog ──────────────────────────────────────────────────────────────────

/// A [`CarrierObserver`] that records every notification in order.
///
/// With `skip_moving` set, the per-tick `Moving` cue is not recorded, which
/// keeps long traces readable.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events:      Vec<CarrierEvent>,
    pub skip_moving: bool,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_moving_cue() -> Self {
        Self { events: Vec::new(), skip_moving: true }
    }

    /// Drain the recorded events, leaving the log empty.
    pub fn take(&mut self) -> Vec<CarrierEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn count(&self, event: CarrierEvent) -> usize {
        self.events.iter().filter(|&&e| e == event).count()
    }

    fn push(&mut self, event: CarrierEvent) -> NotifyResult {
        self.events.push(event);
        Ok(())
    }
}

impl CarrierObserver for EventLog {
    fn on_node_changed(&mut self, node: &WaypointNode) -> NotifyResult {
        self.push(CarrierEvent::NodeChanged(node.id))
    }

    fn on_start_rolling(&mut self) -> NotifyResult {
        self.push(CarrierEvent::StartRolling)
    }

    fn on_stop_rolling(&mut self) -> NotifyResult {
        self.push(CarrierEvent::StopRolling)
    }

    fn on_reached_end(&mut self) -> NotifyResult {
        self.push(CarrierEvent::ReachedEnd)
    }

    fn on_start_moving(&mut self) -> NotifyResult {
        self.push(CarrierEvent::StartMoving)
    }

    fn on_moving(&mut self) -> NotifyResult {
        if self.skip_moving {
            return Ok(());
        }
        self.push(CarrierEvent::Moving)
    }

    fn on_stop_moving(&mut self) -> NotifyResult {
        self.push(CarrierEvent::StopMoving)
    }

    fn enable_physics_at_end(&mut self) -> NotifyResult {
        self.push(CarrierEvent::PhysicsEnabled)
    }

    fn on_halted(&mut self) -> NotifyResult {
        self.push(CarrierEvent::Halted)
    }
}
