//! Unconfirmed locations under evaluation as the next stop.

use geo::Coord;

use crate::time::TimeOfDay;

/// Travel time assumed when a candidate carries no duration estimate.
pub const DEFAULT_DURATION_SECS: u32 = 300;

/// The point candidates are measured from: the last committed stop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference {
    /// Position (`x = lng`, `y = lat`).
    pub location: Coord<f64>,
    /// Current schedule time.
    pub time: TimeOfDay,
}

/// A location being considered for the next stop.
///
/// Scoring fills in the optional fields. Candidates are discarded once a stop
/// is committed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Position (`x = lng`, `y = lat`).
    pub location: Coord<f64>,
    /// Display label.
    pub label: String,
    /// Straight-line distance from the reference.
    pub distance_km: Option<f64>,
    /// Estimated travel time from the reference.
    pub duration_sec: Option<u32>,
    /// Opaque favourability signal, roughly `[-2, 2]`.
    pub demand_signal: Option<f64>,
    /// Estimated profitability; higher is better.
    pub score: Option<f64>,
    /// Arrival would land inside a break window.
    pub crosses_break: bool,
    /// Fare earned if this candidate becomes a drop-off.
    pub revenue: Option<f64>,
}

impl Candidate {
    /// An unscored candidate.
    #[must_use]
    pub fn at(location: Coord<f64>, label: impl Into<String>) -> Self {
        Self {
            location,
            label: label.into(),
            distance_km: None,
            duration_sec: None,
            demand_signal: None,
            score: None,
            crosses_break: false,
            revenue: None,
        }
    }

    /// Set a known travel time.
    #[must_use]
    pub const fn with_duration_sec(mut self, seconds: u32) -> Self {
        self.duration_sec = Some(seconds);
        self
    }

    /// Set a known fare.
    #[must_use]
    pub const fn with_revenue(mut self, revenue: f64) -> Self {
        self.revenue = Some(revenue);
        self
    }

    /// Travel time in whole minutes, rounded up.
    ///
    /// Falls back to [`DEFAULT_DURATION_SECS`] when no estimate is present.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        let seconds = match self.duration_sec {
            Some(seconds) => seconds,
            None => DEFAULT_DURATION_SECS,
        };
        seconds.div_ceil(60)
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.location.x
    }
}
