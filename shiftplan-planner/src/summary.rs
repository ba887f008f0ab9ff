//! Read-only statistics derived from a stop list.

use std::collections::{HashMap, HashSet};

use log::warn;
use serde::Serialize;
use shiftplan_core::{BreakSchedule, Route, Stop, StopKind, time::MINUTES_PER_HOUR};

/// Aggregate figures for one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    /// Sum of drop-off revenue.
    pub total_revenue: f64,
    /// Hours between the first and last stop, to one decimal place.
    pub total_driving_hours: f64,
    /// Break windows rendered for display, in stored order.
    pub break_summary: String,
    /// Number of recovered trips.
    pub trip_count: usize,
}

/// Sum of revenue over drop-off stops.
#[must_use]
pub fn total_revenue(route: &Route) -> f64 {
    route
        .stops()
        .iter()
        .filter(|stop| stop.kind == StopKind::Dropoff)
        .map(|stop| stop.revenue)
        .sum()
}

/// Elapsed time from the first to the last stop, in hours rounded to one
/// decimal place. Zero for routes with fewer than two stops.
#[expect(
    clippy::float_arithmetic,
    reason = "hours are reported as a rounded decimal"
)]
#[must_use]
pub fn total_driving_hours(route: &Route) -> f64 {
    let (Some(first), Some(last)) = (route.first(), route.last()) else {
        return 0.0;
    };
    if route.len() < 2 {
        return 0.0;
    }
    let minutes = f64::from(last.time.minutes_since(first.time));
    (minutes / f64::from(MINUTES_PER_HOUR) * 10.0).round() / 10.0
}

/// Render break windows as `"12:00 PM - 1:00 PM, ..."` in stored order.
#[must_use]
pub fn break_summary(breaks: &BreakSchedule) -> String {
    breaks
        .windows()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compute every summary figure for `route`.
#[must_use]
pub fn summarise(route: &Route, breaks: &BreakSchedule) -> RouteSummary {
    RouteSummary {
        total_revenue: total_revenue(route),
        total_driving_hours: total_driving_hours(route),
        break_summary: break_summary(breaks),
        trip_count: recover_trips(route.stops()).trips.len(),
    }
}

/// A pickup paired with its drop-off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    /// Where the passenger boarded.
    pub pickup: Stop,
    /// Where the passenger alighted.
    pub dropoff: Stop,
    /// Revenue earned on the trip.
    pub revenue: f64,
}

impl Trip {
    fn new(pickup: &Stop, dropoff: &Stop) -> Self {
        Self {
            pickup: pickup.clone(),
            dropoff: dropoff.clone(),
            revenue: dropoff.revenue,
        }
    }
}

/// How trips were paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingMode {
    /// Pickups and drop-offs matched on trip id.
    ByTripId,
    /// Trip ids were unusable; each drop-off took the nearest earlier pickup.
    Positional,
}

/// Trips reconstructed from a stop list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecovery {
    /// Trips in drop-off order.
    pub trips: Vec<Trip>,
    /// Pairing used.
    pub mode: PairingMode,
}

/// Reconstruct trips from an arbitrary stop list.
///
/// Trip ids are trusted when every pickup id and every drop-off id is
/// unique and each drop-off finds a partner. The partner is an earlier
/// pickup with the same id, or, for the drop-off directly after it, the
/// seed pickup at the head of the route. Otherwise each drop-off is paired with the nearest
/// preceding pickup and the result is marked [`PairingMode::Positional`].
///
/// # Examples
/// ```
/// use shiftplan_core::{Stop, TimeOfDay, geometry::lat_lng};
/// use shiftplan_planner::summary::{PairingMode, recover_trips};
///
/// let here = lat_lng(1.35, 103.82);
/// let stops = [
///     Stop::pickup(here, TimeOfDay::from_hour(6), 0),
///     Stop::dropoff(here, TimeOfDay::from_hm(6, 20), 9.0, 1),
///     Stop::pickup(here, TimeOfDay::from_hm(6, 30), 2),
///     Stop::dropoff(here, TimeOfDay::from_hm(6, 50), 7.5, 2),
/// ];
/// let recovered = recover_trips(&stops);
/// assert_eq!(recovered.mode, PairingMode::ByTripId);
/// assert_eq!(recovered.trips.len(), 2);
/// ```
#[must_use]
pub fn recover_trips(stops: &[Stop]) -> TripRecovery {
    if let Some(trips) = pair_by_trip_id(stops) {
        return TripRecovery {
            trips,
            mode: PairingMode::ByTripId,
        };
    }
    warn!(
        "trip ids are inconsistent across {} stops; pairing positionally",
        stops.len()
    );
    TripRecovery {
        trips: pair_positionally(stops),
        mode: PairingMode::Positional,
    }
}

fn has_unique_ids(stops: &[Stop], kind: StopKind) -> bool {
    let mut seen = HashSet::new();
    stops
        .iter()
        .filter(|stop| stop.kind == kind)
        .all(|stop| seen.insert(stop.trip_id))
}

fn pair_by_trip_id(stops: &[Stop]) -> Option<Vec<Trip>> {
    if !has_unique_ids(stops, StopKind::Pickup) || !has_unique_ids(stops, StopKind::Dropoff) {
        return None;
    }
    let pickups: HashMap<u32, usize> = stops
        .iter()
        .enumerate()
        .filter(|(_, stop)| stop.is_pickup())
        .map(|(index, stop)| (stop.trip_id, index))
        .collect();
    let seed = stops
        .first()
        .filter(|stop| stop.is_pickup() && stop.trip_id == 0);
    let mut claimed = HashSet::new();
    let mut trips = Vec::new();

    for (index, dropoff) in stops.iter().enumerate().filter(|(_, s)| s.is_dropoff()) {
        let by_id = pickups
            .get(&dropoff.trip_id)
            .copied()
            .filter(|&at| at < index && !claimed.contains(&at));
        // Only the opening drop-off, straight after the seed, may borrow it.
        let partner = by_id.or_else(|| seed.filter(|_| index == 1).map(|_| 0));
        let pickup_index = partner.filter(|&at| at < index)?;
        let pickup = stops.get(pickup_index)?;
        claimed.insert(pickup_index);
        trips.push(Trip::new(pickup, dropoff));
    }
    Some(trips)
}

fn pair_positionally(stops: &[Stop]) -> Vec<Trip> {
    let mut trips = Vec::new();
    let mut last_pickup: Option<&Stop> = None;
    for stop in stops {
        match stop.kind {
            StopKind::Pickup => last_pickup = Some(stop),
            StopKind::Dropoff => {
                if let Some(pickup) = last_pickup {
                    trips.push(Trip::new(pickup, stop));
                }
            }
        }
    }
    trips
}
