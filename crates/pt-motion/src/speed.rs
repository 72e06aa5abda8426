//! The carrier speed law.
//!
//! Every branch uses the same acceleration magnitude, so the speed after a
//! tick depends only on the signals and `dt`, never on how the previous ticks
//! were sliced.

use pt_core::{CaptureRate, CarrierConfig};

use crate::{CarrierState, MotionState};

/// External signals sampled once per tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SpeedInputs {
    /// External push force is applied this tick.
    pub push: bool,

    /// Selects the push cap.
    pub capture_rate: CaptureRate,

    /// The path ahead permits unpowered forward drift.
    pub roll_forward: bool,

    /// The path behind permits unpowered backward drift.
    pub roll_backward: bool,
}

/// Transition of the rolling flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RollingEdge {
    Started,
    Stopped,
}

/// Result of one [`SpeedController::update`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpeedUpdate {
    pub motion: MotionState,
    pub speed:  f32,

    /// `Some` only on the tick the rolling flag flips.
    pub rolling_edge: Option<RollingEdge>,

    /// Negative speed was zeroed because the carrier is at the chain origin.
    pub origin_clamped: bool,
}

/// Applies the push / roll / decay rules to a [`CarrierState`].
///
/// Holds the only piece of speed state that is not part of the carrier
/// state proper: seconds since the last push, which gates free rolling.
#[derive(Clone, Debug, Default)]
pub struct SpeedController {
    time_since_push: f32,
}

impl SpeedController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since push was last applied (or since construction).
    #[inline]
    pub fn time_since_push(&self) -> f32 {
        self.time_since_push
    }

    /// Update `state.speed`, `state.motion` and `state.was_rolling` for one
    /// tick of length `dt`.
    ///
    /// Rules, first match wins:
    ///
    /// 1. push → ramp up to the capture-rate cap (tier 0 caps at 0);
    /// 2. forward roll permitted → ramp up to `level3_speed`;
    /// 3. backward roll permitted → ramp down to `-backwards_speed`;
    /// 4. otherwise → decay toward zero without crossing it.
    ///
    /// Rolling is only permitted once `roll_grace_secs` have passed since the
    /// last push.  Negative speed at the chain origin is forced to zero.
    pub fn update(
        &mut self,
        state:  &mut CarrierState,
        inputs: &SpeedInputs,
        dt:     f32,
        config: &CarrierConfig,
    ) -> SpeedUpdate {
        let ramp = config.acceleration * dt;

        let motion = if inputs.push {
            self.time_since_push = 0.0;
            MotionState::Pushing
        } else {
            self.time_since_push += dt;
            let grace_over = self.time_since_push >= config.roll_grace_secs;
            if grace_over && inputs.roll_forward {
                MotionState::RollingForward
            } else if grace_over && inputs.roll_backward {
                MotionState::RollingBackward
            } else {
                MotionState::Stopped
            }
        };

        let speed = state.speed;
        state.speed = match motion {
            MotionState::Pushing => (speed + ramp).min(config.push_cap(inputs.capture_rate)),
            MotionState::RollingForward => (speed + ramp).min(config.level3_speed),
            MotionState::RollingBackward => (speed - ramp).max(-config.backwards_speed),
            MotionState::Stopped if speed > 0.0 => (speed - ramp).max(0.0),
            MotionState::Stopped => (speed + ramp).min(0.0),
        };

        let rolling = motion.is_rolling();
        let rolling_edge = match (state.was_rolling, rolling) {
            (false, true) => Some(RollingEdge::Started),
            (true, false) => Some(RollingEdge::Stopped),
            _             => None,
        };
        state.was_rolling = rolling;
        state.motion = motion;

        let origin_clamped = state.speed < 0.0 && state.at_origin();
        if origin_clamped {
            state.speed = 0.0;
        }

        SpeedUpdate { motion, speed: state.speed, rolling_edge, origin_clamped }
    }
}
