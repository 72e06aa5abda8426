//! External movement signals.

use pt_core::CaptureRate;

/// Capability surface the engine queries once per tick.
///
/// What the answers mean (who is pushing, whether the track ahead slopes
/// down) is entirely up to the implementor; the engine only combines them.
pub trait CarrierInputs {
    /// `false` while the carrier is locked (round setup, disabled objective).
    fn can_move(&self) -> bool {
        true
    }

    /// External push force is applied this tick.
    fn can_receive_push(&self) -> bool;

    /// The path ahead permits unpowered forward drift.
    fn can_roll_forward(&self) -> bool {
        false
    }

    /// The path behind permits unpowered backward drift.
    fn can_roll_backward(&self) -> bool {
        false
    }

    /// Push strength tier.
    fn capture_rate(&self) -> CaptureRate;
}

/// Plain-data [`CarrierInputs`], convenient for scripted runs and tests.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InputSnapshot {
    pub can_move:      bool,
    pub push:          bool,
    pub capture_rate:  CaptureRate,
    pub roll_forward:  bool,
    pub roll_backward: bool,
}

impl InputSnapshot {
    /// Movable, nobody pushing, no roll permission.
    pub fn idle() -> Self {
        Self {
            can_move:      true,
            push:          false,
            capture_rate:  CaptureRate::NONE,
            roll_forward:  false,
            roll_backward: false,
        }
    }

    /// Pushed with the given capture-rate tier.
    pub fn pushing(rate: u8) -> Self {
        Self { push: true, capture_rate: CaptureRate(rate), ..Self::idle() }
    }

    pub fn rolling_forward() -> Self {
        Self { roll_forward: true, ..Self::idle() }
    }

    pub fn rolling_backward() -> Self {
        Self { roll_backward: true, ..Self::idle() }
    }

    /// Cannot move at all.
    pub fn locked() -> Self {
        Self { can_move: false, ..Self::idle() }
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::idle()
    }
}

impl CarrierInputs for InputSnapshot {
    fn can_move(&self) -> bool {
        self.can_move
    }

    fn can_receive_push(&self) -> bool {
        self.push
    }

    fn can_roll_forward(&self) -> bool {
        self.roll_forward
    }

    fn can_roll_backward(&self) -> bool {
        self.roll_backward
    }

    fn capture_rate(&self) -> CaptureRate {
        self.capture_rate
    }
}
