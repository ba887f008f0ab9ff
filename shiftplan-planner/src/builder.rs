//! The route-building state machine.
//!
//! Planning alternates between choosing a drop-off and choosing a pickup:
//!
//! ```text
//! AwaitingStart -> SelectingDropoff <-> SelectingPickup -> Finalized
//! ```
//!
//! Every transition either succeeds and mutates the route, or fails with
//! [`PlanningError::InvalidTransition`] and leaves everything untouched.

use std::fmt;

use log::{debug, error, info};
use shiftplan_core::{
    Candidate, Reference, Route, ShiftParameters, Stop, StopKind, TimeOfDay, haversine_km,
};
use shiftplan_scorer::ScoreWeights;

use crate::PlanningError;

/// Where the builder is in the planning flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlanningState {
    /// No shift has been submitted.
    #[default]
    AwaitingStart,
    /// The next stop must be a drop-off.
    SelectingDropoff,
    /// The next stop must be a pickup.
    SelectingPickup,
    /// The route is closed.
    Finalized,
}

impl fmt::Display for PlanningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AwaitingStart => "awaiting start",
            Self::SelectingDropoff => "selecting a drop-off",
            Self::SelectingPickup => "selecting a pickup",
            Self::Finalized => "finalized",
        })
    }
}

#[derive(Debug, Clone)]
struct ActiveRoute {
    shift: ShiftParameters,
    route: Route,
    next_trip_id: u32,
}

/// Owns the growing stop list for one shift.
///
/// # Examples
/// ```
/// use shiftplan_core::{BreakWindow, Candidate, ShiftDraft, geometry::lat_lng};
/// use shiftplan_planner::{PlanningState, RouteBuilder};
///
/// let mut draft = ShiftDraft::new(lat_lng(1.3521, 103.8198), 6, 25);
/// draft.add_break(BreakWindow::new(12, 13));
/// let params = draft.validate()?;
///
/// let mut builder = RouteBuilder::new();
/// builder.submit_shift(params)?;
/// let drop = Candidate::at(lat_lng(1.30, 103.85), "Marina").with_duration_sec(900);
/// assert_eq!(builder.commit_dropoff(&drop)?, PlanningState::SelectingPickup);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteBuilder {
    state: PlanningState,
    active: Option<ActiveRoute>,
    weights: ScoreWeights,
}

impl RouteBuilder {
    /// A builder awaiting its first shift, using default fare weights.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder using `weights` to estimate fares for candidates without
    /// revenue.
    #[must_use]
    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> PlanningState {
        self.state
    }

    /// The route being built, or the finalized route awaiting reset.
    #[must_use]
    pub fn route(&self) -> Option<&Route> {
        self.active.as_ref().map(|active| &active.route)
    }

    /// Shift parameters for the current route.
    #[must_use]
    pub fn shift(&self) -> Option<&ShiftParameters> {
        self.active.as_ref().map(|active| &active.shift)
    }

    /// Position and time of the last committed stop.
    #[must_use]
    pub fn reference(&self) -> Option<Reference> {
        self.route()?.last().map(|stop| Reference {
            location: stop.location,
            time: stop.time,
        })
    }

    /// Kind the next commit must have, if any.
    #[must_use]
    pub const fn expected_kind(&self) -> Option<StopKind> {
        match self.state {
            PlanningState::SelectingDropoff => Some(StopKind::Dropoff),
            PlanningState::SelectingPickup => Some(StopKind::Pickup),
            PlanningState::AwaitingStart | PlanningState::Finalized => None,
        }
    }

    fn reject(&self, action: &'static str) -> PlanningError {
        let state = self.state;
        error!("rejected transition: cannot {action} while {state}");
        PlanningError::InvalidTransition { state, action }
    }

    /// Start a route at the shift's start location and time.
    ///
    /// The route is seeded with a pickup carrying trip id 0.
    ///
    /// # Errors
    /// Returns [`PlanningError::InvalidTransition`] unless awaiting start.
    pub fn submit_shift(&mut self, shift: ShiftParameters) -> Result<(), PlanningError> {
        if self.state != PlanningState::AwaitingStart {
            return Err(self.reject("submit a shift"));
        }
        let seed = Stop::pickup(shift.start(), shift.start_time(), 0);
        info!(
            "shift submitted: {} to {} with {} break(s)",
            shift.start_time(),
            TimeOfDay::from_hour(shift.window().end_hour),
            shift.breaks().len()
        );
        self.active = Some(ActiveRoute {
            shift,
            route: Route::seeded(seed),
            next_trip_id: 1,
        });
        self.state = PlanningState::SelectingDropoff;
        Ok(())
    }

    /// Append a drop-off built from `candidate`.
    ///
    /// Revenue comes from the candidate, or from the fare estimate when the
    /// candidate carries none. The trip counter advances afterwards.
    ///
    /// # Errors
    /// Returns [`PlanningError::InvalidTransition`] unless selecting a drop-off.
    pub fn commit_dropoff(&mut self, candidate: &Candidate) -> Result<PlanningState, PlanningError> {
        if self.state != PlanningState::SelectingDropoff {
            return Err(self.reject("commit a drop-off"));
        }
        let weights = self.weights;
        let Some(active) = self.active.as_mut() else {
            return Err(self.reject("commit a drop-off"));
        };
        let Some(last) = active.route.last() else {
            return Err(self.reject("commit a drop-off"));
        };
        let time = active
            .shift
            .breaks()
            .advance(last.time, candidate.duration_minutes());
        let revenue = candidate
            .revenue
            .unwrap_or_else(|| weights.fare(haversine_km(last.location, candidate.location)));
        let trip_id = active.next_trip_id;
        active
            .route
            .push(Stop::dropoff(candidate.location, time, revenue, trip_id));
        active.next_trip_id = trip_id.saturating_add(1);
        debug!(
            "drop-off for trip {trip_id} at {time} earning {revenue:.2} ({label})",
            label = candidate.label
        );
        self.state = PlanningState::SelectingPickup;
        Ok(self.state)
    }

    /// Append a pickup built from `candidate`.
    ///
    /// If the pickup lands at or after the shift's end hour the route is
    /// finalized immediately.
    ///
    /// # Errors
    /// Returns [`PlanningError::InvalidTransition`] unless selecting a pickup.
    pub fn commit_pickup(&mut self, candidate: &Candidate) -> Result<PlanningState, PlanningError> {
        if self.state != PlanningState::SelectingPickup {
            return Err(self.reject("commit a pickup"));
        }
        let Some(active) = self.active.as_mut() else {
            return Err(self.reject("commit a pickup"));
        };
        let Some(last) = active.route.last() else {
            return Err(self.reject("commit a pickup"));
        };
        let time = active
            .shift
            .breaks()
            .advance(last.time, candidate.duration_minutes());
        let trip_id = active.next_trip_id;
        active
            .route
            .push(Stop::pickup(candidate.location, time, trip_id));
        debug!(
            "pickup for trip {trip_id} at {time} ({label})",
            label = candidate.label
        );
        if time.hour() >= active.shift.window().end_hour {
            active.route.finalize();
            info!("shift ended at {time}; route finalized with {} stops", active.route.len());
            self.state = PlanningState::Finalized;
        } else {
            self.state = PlanningState::SelectingDropoff;
        }
        Ok(self.state)
    }

    /// Close the route early.
    ///
    /// # Errors
    /// Returns [`PlanningError::InvalidTransition`] unless selecting a stop,
    /// or [`PlanningError::RouteTooShort`] when only the seed stop exists.
    pub fn finish(&mut self) -> Result<(), PlanningError> {
        if !matches!(
            self.state,
            PlanningState::SelectingDropoff | PlanningState::SelectingPickup
        ) {
            return Err(self.reject("finish the route"));
        }
        let Some(active) = self.active.as_mut() else {
            return Err(self.reject("finish the route"));
        };
        let stops = active.route.len();
        if stops < 2 {
            error!("rejected finish: route has {stops} stop(s)");
            return Err(PlanningError::RouteTooShort { stops });
        }
        active.route.finalize();
        info!("route finished early with {stops} stops");
        self.state = PlanningState::Finalized;
        Ok(())
    }

    /// Discard the in-progress route and await a new shift.
    ///
    /// Returns the discarded route, if there was one.
    ///
    /// # Errors
    /// Returns [`PlanningError::InvalidTransition`] when the route is
    /// finalized; use [`reset`](Self::reset) instead.
    pub fn abandon(&mut self) -> Result<Option<Route>, PlanningError> {
        if self.state == PlanningState::Finalized {
            return Err(self.reject("abandon the route"));
        }
        let discarded = self.active.take().map(|active| active.route);
        if let Some(route) = &discarded {
            info!("route abandoned after {} stops", route.len());
        }
        self.state = PlanningState::AwaitingStart;
        Ok(discarded)
    }

    /// Hand out the finalized route and await a new shift.
    ///
    /// # Errors
    /// Returns [`PlanningError::InvalidTransition`] unless finalized.
    pub fn reset(&mut self) -> Result<Route, PlanningError> {
        if self.state != PlanningState::Finalized {
            return Err(self.reject("reset"));
        }
        let Some(active) = self.active.take() else {
            return Err(self.reject("reset"));
        };
        self.state = PlanningState::AwaitingStart;
        Ok(active.route)
    }

    /// Attach a display name to a committed stop.
    ///
    /// Returns `false` if there is no route, no such stop, or the route is
    /// finalized.
    pub fn set_stop_name(&mut self, index: usize, name: String) -> bool {
        if self.state == PlanningState::Finalized {
            return false;
        }
        self.active
            .as_mut()
            .is_some_and(|active| active.route.set_stop_name(index, name))
    }
}
