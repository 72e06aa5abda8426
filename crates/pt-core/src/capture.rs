//! Capture-rate tier signal.

use std::fmt;

/// How strongly the carrier is being pushed, as reported by the gameplay
/// collaborator (typically the number of pushers, saturated at 3).
///
/// Only the tier matters: `0` means no push cap at all, `1` and `2` select
/// the lower caps, and anything `>= 3` selects the top cap.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaptureRate(pub u8);

impl CaptureRate {
    pub const NONE: CaptureRate = CaptureRate(0);
    pub const MAX_TIER: u8 = 3;

    /// Saturating tier in `0..=3`.
    #[inline]
    pub fn tier(self) -> u8 {
        self.0.min(Self::MAX_TIER)
    }
}

impl From<u8> for CaptureRate {
    #[inline]
    fn from(n: u8) -> Self {
        CaptureRate(n)
    }
}

impl fmt::Display for CaptureRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tier() {
            Self::MAX_TIER => write!(f, "x3+"),
            t              => write!(f, "x{t}"),
        }
    }
}
