//! Demand signals feeding candidate scores.
//!
//! The [`DemandProvider`] trait is the seam where a predictive model plugs in.
//! The scorer treats its output as opaque: positive values mean demand exceeds
//! supply at that place and time.

use geo::Coord;

use crate::time::TimeOfDay;

/// Lower bound of the demand signal range.
pub const MIN_DEMAND: f64 = -2.0;

/// Upper bound of the demand signal range.
pub const MAX_DEMAND: f64 = 2.0;

/// Estimate how favourable a location is at a given time.
///
/// Implementations must be `Send + Sync` so scorers can be shared across
/// threads. The method is infallible; return `0.0` when nothing is known.
/// Use [`DemandProvider::sanitise`] to guard raw outputs.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use shiftplan_core::{DemandProvider, TimeOfDay};
///
/// struct Busy;
///
/// impl DemandProvider for Busy {
///     fn estimate_demand(&self, _location: Coord<f64>, _time: TimeOfDay) -> f64 {
///         1.5
///     }
/// }
///
/// let signal = Busy.estimate_demand(Coord { x: 0.0, y: 0.0 }, TimeOfDay::from_hour(8));
/// assert_eq!(signal, 1.5);
/// ```
pub trait DemandProvider: Send + Sync {
    /// Return a demand signal for `location` at `time`.
    fn estimate_demand(&self, location: Coord<f64>, time: TimeOfDay) -> f64;

    /// Clamp a raw signal into `[MIN_DEMAND, MAX_DEMAND]`.
    ///
    /// Non-finite values become `0.0`.
    fn sanitise(signal: f64) -> f64
    where
        Self: Sized,
    {
        if !signal.is_finite() {
            return 0.0;
        }
        signal.clamp(MIN_DEMAND, MAX_DEMAND)
    }
}

impl<T: DemandProvider + ?Sized> DemandProvider for &T {
    fn estimate_demand(&self, location: Coord<f64>, time: TimeOfDay) -> f64 {
        (**self).estimate_demand(location, time)
    }
}

impl<T: DemandProvider + ?Sized> DemandProvider for Box<T> {
    fn estimate_demand(&self, location: Coord<f64>, time: TimeOfDay) -> f64 {
        (**self).estimate_demand(location, time)
    }
}
