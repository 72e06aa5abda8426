//! The `InputModel` trait: where the fleet's pushers and slopes come from.

use pt_core::{CarrierId, CarrierRng};
use pt_engine::InputSnapshot;

use crate::SimContext;

/// Produces each carrier's movement signals for one tick.
///
/// # Thread safety
///
/// With the `parallel` feature the sim samples many carriers at once, so
/// implementations must be `Send + Sync`.  Randomness must come from the
/// supplied per-carrier [`CarrierRng`], never from shared state, so a run is
/// reproducible whatever the thread count.
///
/// # Example
///
/// ```rust,ignore
/// struct Crowd;
///
/// impl InputModel for Crowd {
///     fn sample(&self, _c: CarrierId, _ctx: &SimContext<'_>, rng: &mut CarrierRng) -> InputSnapshot {
///         let pushers = rng.gen_range(0..=4u8);
///         if pushers == 0 { InputSnapshot::idle() } else { InputSnapshot::pushing(pushers) }
///     }
/// }
/// ```
pub trait InputModel: Send + Sync + 'static {
    fn sample(
        &self,
        carrier: CarrierId,
        ctx:     &SimContext<'_>,
        rng:     &mut CarrierRng,
    ) -> InputSnapshot;
}

/// Nobody pushes, nothing rolls.
pub struct IdleModel;

impl InputModel for IdleModel {
    fn sample(&self, _: CarrierId, _: &SimContext<'_>, _: &mut CarrierRng) -> InputSnapshot {
        InputSnapshot::idle()
    }
}

/// Every carrier is pushed every tick with the given capture-rate tier.
pub struct AlwaysPush(pub u8);

impl InputModel for AlwaysPush {
    fn sample(&self, _: CarrierId, _: &SimContext<'_>, _: &mut CarrierRng) -> InputSnapshot {
        InputSnapshot::pushing(self.0)
    }
}
