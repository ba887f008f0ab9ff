//! Deterministic doubles shared by unit and behaviour tests.

use geo::Coord;

use crate::geometry::lat_lng;
use crate::shift::{ShiftDraft, ShiftParameters};
use crate::time::{BreakWindow, TimeOfDay};
use crate::{DemandProvider, ShiftError};

/// Demand provider returning the same signal everywhere.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FixedDemand(pub f64);

impl DemandProvider for FixedDemand {
    fn estimate_demand(&self, _location: Coord<f64>, _time: TimeOfDay) -> f64 {
        self.0
    }
}

/// Demand provider keyed on the hour of day.
///
/// Hours outside `busy_hours` yield `quiet`; hours inside yield `busy`.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyDemand {
    /// Hours of day (0-23) treated as busy.
    pub busy_hours: Vec<u32>,
    /// Signal returned during busy hours.
    pub busy: f64,
    /// Signal returned otherwise.
    pub quiet: f64,
}

impl DemandProvider for HourlyDemand {
    fn estimate_demand(&self, _location: Coord<f64>, time: TimeOfDay) -> f64 {
        let hour = time.hour().rem_euclid(24);
        if self.busy_hours.contains(&hour) {
            self.busy
        } else {
            self.quiet
        }
    }
}

/// Central Singapore, the default start location in tests.
pub const SAMPLE_START: Coord<f64> = lat_lng(1.3521, 103.8198);

/// A 06:00 to 01:00 shift with a lunch break from noon to 13:00.
///
/// # Errors
/// Never fails in practice; the signature mirrors [`ShiftDraft::validate`].
pub fn sample_shift() -> Result<ShiftParameters, ShiftError> {
    let mut draft = ShiftDraft::new(SAMPLE_START, 6, 25);
    draft.add_break(BreakWindow::new(12, 13));
    draft.validate()
}

/// A shift from `start_hour` to `end_hour` with the given breaks.
///
/// # Errors
/// Propagates [`ShiftDraft::validate`] failures.
pub fn shift_with_breaks(
    start_hour: u32,
    end_hour: u32,
    breaks: &[BreakWindow],
) -> Result<ShiftParameters, ShiftError> {
    let mut draft = ShiftDraft::new(SAMPLE_START, start_hour, end_hour);
    for window in breaks {
        draft.add_break(*window);
    }
    draft.validate()
}
