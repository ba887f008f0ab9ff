//! Ordered stop sequences for one shift.
//!
//! A [`Route`] is either in progress (the planner is still appending stops)
//! or finalized. Only the planner appends stops; finalized routes are
//! archived and never change again.

use crate::stop::Stop;

/// Lifecycle of a [`Route`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RouteStatus {
    /// Stops are still being added.
    #[default]
    InProgress,
    /// The shift ended or the driver finished early.
    Finalized,
}

/// An ordered sequence of stops.
///
/// # Examples
/// ```
/// use shiftplan_core::{Route, Stop, TimeOfDay, geometry::lat_lng};
///
/// let seed = Stop::pickup(lat_lng(1.3521, 103.8198), TimeOfDay::from_hour(6), 0);
/// let route = Route::seeded(seed);
/// assert_eq!(route.len(), 1);
/// assert!(!route.is_finalized());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    stops: Vec<Stop>,
    status: RouteStatus,
}

impl Route {
    /// Start an in-progress route at `seed`.
    #[must_use]
    pub fn seeded(seed: Stop) -> Self {
        Self {
            stops: vec![seed],
            status: RouteStatus::InProgress,
        }
    }

    /// Construct a route from existing stops, e.g. when re-loading history.
    #[must_use]
    pub const fn from_stops(stops: Vec<Stop>, status: RouteStatus) -> Self {
        Self { stops, status }
    }

    /// Stops in visiting order.
    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Lifecycle status.
    #[must_use]
    pub const fn status(&self) -> RouteStatus {
        self.status
    }

    /// Report whether the route is finalized.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.status == RouteStatus::Finalized
    }

    /// First stop.
    #[must_use]
    pub fn first(&self) -> Option<&Stop> {
        self.stops.first()
    }

    /// Most recent stop.
    #[must_use]
    pub fn last(&self) -> Option<&Stop> {
        self.stops.last()
    }

    /// Number of stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Report whether the route has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Append a stop. Finalized routes are left untouched and return `false`.
    pub fn push(&mut self, stop: Stop) -> bool {
        if self.is_finalized() {
            return false;
        }
        self.stops.push(stop);
        true
    }

    /// Mark the route finalized.
    pub const fn finalize(&mut self) {
        self.status = RouteStatus::Finalized;
    }

    /// Attach a display name to the stop at `index`.
    ///
    /// Returns `false` if no such stop exists.
    pub fn set_stop_name(&mut self, index: usize, name: String) -> bool {
        match self.stops.get_mut(index) {
            Some(stop) => {
                stop.location_name = Some(name);
                true
            }
            None => false,
        }
    }
}
