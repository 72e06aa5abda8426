//! Per-carrier deterministic RNG.
//!
//! A carrier's stream is seeded from the run seed mixed with its id:
//!
//!   seed = run_seed XOR (carrier_id * 0x9e37_79b9_7f4a_7c15)
//!
//! so neighbouring ids land far apart in seed space.  Streams are never
//! shared, which keeps input sampling reproducible under the `parallel`
//! feature of `pt-sim`.

use rand::rngs::SmallRng;
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::{Rng, SeedableRng};

use crate::CarrierId;

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// The RNG an input model draws from for one carrier.
pub struct CarrierRng(SmallRng);

impl CarrierRng {
    pub fn new(run_seed: u64, carrier: CarrierId) -> Self {
        let seed = run_seed ^ u64::from(carrier.0).wrapping_mul(GOLDEN_GAMMA);
        CarrierRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.0.gen_range(range)
    }

    /// `true` with probability `p`; `p` outside [0, 1] is clamped.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
