//! Per-carrier movement configuration.
//!
//! All values are plain numbers supplied at construction time.  Units are
//! world length units and seconds; speeds are length units per second.

use crate::{CaptureRate, CoreError, CoreResult};

/// Speed caps, acceleration and integration limits for one carrier.
///
/// Typically loaded from a TOML file by the application crate (with the
/// `serde` feature) and validated once before any engine is built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarrierConfig {
    /// Push cap with capture-rate tier 1.
    pub level1_speed: f32,

    /// Push cap with capture-rate tier 2.
    pub level2_speed: f32,

    /// Push cap with capture-rate tier 3 or more.  Also the forward roll cap.
    pub level3_speed: f32,

    /// Magnitude of the backward roll cap (applied as `-backwards_speed`).
    pub backwards_speed: f32,

    /// Speed change per second, used for every ramp (push, roll and decay).
    pub acceleration: f32,

    /// Seconds that must pass after the last push before free rolling is
    /// allowed in either direction.
    pub roll_grace_secs: f32,

    /// Remaining tick distance at or below which sub-stepping stops.
    pub step_epsilon: f32,

    /// Hard upper bound on sub-steps per tick.
    pub max_substeps: u32,

    /// Ask the notification sink to enable physics when the end is reached.
    pub enable_physics_at_end: bool,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            level1_speed:          40.0,
            level2_speed:          60.0,
            level3_speed:          80.0,
            backwards_speed:       30.0,
            acceleration:          50.0,
            roll_grace_secs:       0.0,
            step_epsilon:          0.01,
            max_substeps:          4_096,
            enable_physics_at_end: false,
        }
    }
}

impl CarrierConfig {
    /// Push speed cap for the given capture-rate tier.
    #[inline]
    pub fn push_cap(&self, rate: CaptureRate) -> f32 {
        match rate.tier() {
            0 => 0.0,
            1 => self.level1_speed,
            2 => self.level2_speed,
            _ => self.level3_speed,
        }
    }

    /// Reject configurations the engine cannot integrate sensibly.
    ///
    /// Checked once at engine construction; a running engine never revalidates.
    pub fn validate(&self) -> CoreResult<()> {
        let speeds = [
            ("level1_speed", self.level1_speed),
            ("level2_speed", self.level2_speed),
            ("level3_speed", self.level3_speed),
            ("backwards_speed", self.backwards_speed),
            ("roll_grace_secs", self.roll_grace_secs),
        ];
        for (name, value) in speeds {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !(self.level1_speed <= self.level2_speed && self.level2_speed <= self.level3_speed) {
            return Err(CoreError::Config(format!(
                "push caps must be non-decreasing by tier, got {} / {} / {}",
                self.level1_speed, self.level2_speed, self.level3_speed
            )));
        }
        if !self.acceleration.is_finite() || self.acceleration <= 0.0 {
            return Err(CoreError::Config(format!(
                "acceleration must be positive, got {}",
                self.acceleration
            )));
        }
        if !self.step_epsilon.is_finite() || self.step_epsilon <= 0.0 {
            return Err(CoreError::Config(format!(
                "step_epsilon must be positive, got {}",
                self.step_epsilon
            )));
        }
        if self.max_substeps == 0 {
            return Err(CoreError::Config("max_substeps must be at least 1".into()));
        }
        Ok(())
    }
}
