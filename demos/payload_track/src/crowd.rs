//! A random crowd of pushers plus the track's slopes.

use pt_core::{CaptureRate, CarrierId, CarrierRng};
use pt_engine::InputSnapshot;
use pt_sim::{InputModel, SimContext};

use crate::config::CrowdConfig;

const PUSHERS: u8 = 3;

/// Segments steeper than this (unit-direction `y`) let the cart roll.
const ROLL_SLOPE: f32 = 0.05;

pub struct Crowd {
    pub config: CrowdConfig,
}

impl InputModel for Crowd {
    fn sample(&self, carrier: CarrierId, ctx: &SimContext<'_>, rng: &mut CarrierRng) -> InputSnapshot {
        if ctx.elapsed_secs() < self.config.setup_secs {
            return InputSnapshot::locked();
        }

        let pushers = (0..PUSHERS)
            .filter(|_| rng.gen_bool(self.config.pusher_probability))
            .count() as u8;

        let state = ctx.carrier(carrier).state();
        let slope = ctx.graph.segment_direction(state.chain, state.index).y;

        InputSnapshot {
            can_move:      true,
            push:          pushers > 0,
            capture_rate:  CaptureRate(pushers),
            roll_forward:  slope < -ROLL_SLOPE,
            roll_backward: slope > ROLL_SLOPE,
        }
    }
}
