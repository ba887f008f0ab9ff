//! Confirmed pickup and drop-off stops.

use std::fmt;

use geo::Coord;

use crate::time::TimeOfDay;

/// Whether a stop collects or delivers a passenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StopKind {
    /// Passenger boards. Never carries revenue.
    Pickup,
    /// Passenger alights. Carries the trip's revenue.
    Dropoff,
}

impl StopKind {
    /// The kind that must follow this one in a route.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Pickup => Self::Dropoff,
            Self::Dropoff => Self::Pickup,
        }
    }
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pickup => "pickup",
            Self::Dropoff => "dropoff",
        })
    }
}

/// A location committed to a route.
///
/// `trip_id` links a pickup to its drop-off. The seed stop at the driver's
/// starting position is a pickup with `trip_id == 0`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Position (`x = lng`, `y = lat`).
    pub location: Coord<f64>,
    /// Pickup or drop-off.
    pub kind: StopKind,
    /// Scheduled time.
    pub time: TimeOfDay,
    /// Revenue earned at this stop; always zero for pickups.
    pub revenue: f64,
    /// Trip this stop belongs to.
    pub trip_id: u32,
    /// Resolved display name, once geocoding succeeds.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub location_name: Option<String>,
}

impl Stop {
    /// Construct a pickup; revenue is fixed at zero.
    #[must_use]
    pub const fn pickup(location: Coord<f64>, time: TimeOfDay, trip_id: u32) -> Self {
        Self {
            location,
            kind: StopKind::Pickup,
            time,
            revenue: 0.0,
            trip_id,
            location_name: None,
        }
    }

    /// Construct a drop-off earning `revenue`.
    #[must_use]
    pub const fn dropoff(location: Coord<f64>, time: TimeOfDay, revenue: f64, trip_id: u32) -> Self {
        Self {
            location,
            kind: StopKind::Dropoff,
            time,
            revenue,
            trip_id,
            location_name: None,
        }
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.location_name = Some(name.into());
        self
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

    /// Report whether this is a pickup.
    #[must_use]
    pub fn is_pickup(&self) -> bool {
        self.kind == StopKind::Pickup
    }

    /// Report whether this is a drop-off.
    #[must_use]
    pub fn is_dropoff(&self) -> bool {
        self.kind == StopKind::Dropoff
    }
}
