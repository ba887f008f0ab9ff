//! Stand-in demand providers.
//!
//! None of these model real demand. [`SeededDemand`] reproduces the noisy
//! signal drivers see in a demo, deterministically, so plans are repeatable.

use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shiftplan_core::{DemandProvider, MAX_DEMAND, MIN_DEMAND, TimeOfDay};

/// Demand provider returning zero everywhere.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoDemand;

impl DemandProvider for NoDemand {
    fn estimate_demand(&self, _location: Coord<f64>, _time: TimeOfDay) -> f64 {
        0.0
    }
}

/// Demand provider returning the same signal everywhere.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ConstantDemand(pub f64);

impl DemandProvider for ConstantDemand {
    fn estimate_demand(&self, _location: Coord<f64>, _time: TimeOfDay) -> f64 {
        Self::sanitise(self.0)
    }
}

/// Pseudo-random demand keyed on seed, coordinates and hour.
///
/// The same inputs always yield the same signal in `[-2, 2]`.
///
/// # Examples
/// ```
/// use shiftplan_core::{DemandProvider, TimeOfDay, geometry::lat_lng};
/// use shiftplan_scorer::SeededDemand;
///
/// let provider = SeededDemand::new(7);
/// let here = lat_lng(1.3521, 103.8198);
/// let a = provider.estimate_demand(here, TimeOfDay::from_hour(9));
/// let b = provider.estimate_demand(here, TimeOfDay::from_hour(9));
/// assert_eq!(a, b);
/// assert!((-2.0..=2.0).contains(&a));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeededDemand {
    seed: u64,
}

impl SeededDemand {
    /// Create a provider for `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed in use.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    fn key(&self, location: Coord<f64>, hour: u32) -> u64 {
        self.seed
            ^ location.x.to_bits().rotate_left(17)
            ^ location.y.to_bits().rotate_left(41)
            ^ u64::from(hour).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

impl DemandProvider for SeededDemand {
    fn estimate_demand(&self, location: Coord<f64>, time: TimeOfDay) -> f64 {
        let mut rng = ChaCha8Rng::seed_from_u64(self.key(location, time.hour()));
        rng.gen_range(MIN_DEMAND..=MAX_DEMAND)
    }
}
