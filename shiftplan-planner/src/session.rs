//! A planning session: one builder, its candidates, and past routes.
//!
//! Name lookups run outside the engine and may finish after the user has
//! moved on. A lookup starts by taking a [`NameTicket`]; its result is applied
//! only if nothing the ticket refers to has changed in the meantime.

use std::fmt;

use log::{debug, info, warn};
use serde::Serialize;
use shiftplan_core::{Candidate, Reference, Route, ShiftParameters, StopKind};
use shiftplan_scorer::recommended;

use crate::builder::{PlanningState, RouteBuilder};
use crate::summary::{RouteSummary, summarise};
use crate::PlanningError;

/// Label applied to candidates whose name lookup failed.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// A finalized route with its summary and the shift it was planned for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchivedRoute {
    route: Route,
    summary: RouteSummary,
    shift: ShiftParameters,
}

impl ArchivedRoute {
    /// The finalized stops.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Figures computed when the route was archived.
    #[must_use]
    pub const fn summary(&self) -> &RouteSummary {
        &self.summary
    }

    /// Shift parameters the route was planned under.
    #[must_use]
    pub const fn shift(&self) -> &ShiftParameters {
        &self.shift
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameTarget {
    Stop(usize),
    Candidate(usize),
}

/// Proof that a name lookup was started against a particular state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameTicket {
    target: NameTarget,
    epoch: u64,
}

impl NameTicket {
    /// Index of the stop or candidate being named.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self.target {
            NameTarget::Stop(index) | NameTarget::Candidate(index) => index,
        }
    }
}

/// What happened to a lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The resolved name was applied.
    Applied,
    /// The lookup failed and the fallback label was applied.
    FellBack,
    /// The state moved on; the result was dropped.
    Discarded,
}

/// Owns exactly one [`RouteBuilder`] plus the state around it.
#[derive(Debug, Default)]
pub struct PlanningSession {
    builder: RouteBuilder,
    candidates: Vec<Candidate>,
    previous: Vec<ArchivedRoute>,
    route_epoch: u64,
    candidate_epoch: u64,
}

impl PlanningSession {
    /// An empty session awaiting a shift.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A session driving a pre-configured builder.
    #[must_use]
    pub fn with_builder(builder: RouteBuilder) -> Self {
        Self {
            builder,
            ..Self::default()
        }
    }

    /// Current planning state.
    #[must_use]
    pub const fn state(&self) -> PlanningState {
        self.builder.state()
    }

    /// The route being built, if any.
    #[must_use]
    pub fn route(&self) -> Option<&Route> {
        self.builder.route()
    }

    /// Shift parameters for the current route.
    #[must_use]
    pub fn shift(&self) -> Option<&ShiftParameters> {
        self.builder.shift()
    }

    /// Position and time candidates should be measured from.
    #[must_use]
    pub fn reference(&self) -> Option<Reference> {
        self.builder.reference()
    }

    /// Kind the next commit must have.
    #[must_use]
    pub const fn expected_kind(&self) -> Option<StopKind> {
        self.builder.expected_kind()
    }

    /// Finalized routes, oldest first.
    #[must_use]
    pub fn previous_routes(&self) -> &[ArchivedRoute] {
        &self.previous
    }

    /// Summary of the current route.
    #[must_use]
    pub fn summary(&self) -> Option<RouteSummary> {
        let route = self.builder.route()?;
        let shift = self.builder.shift()?;
        Some(summarise(route, shift.breaks()))
    }

    fn clear_candidates(&mut self) {
        self.candidates.clear();
        self.candidate_epoch = self.candidate_epoch.wrapping_add(1);
    }

    fn invalidate_route(&mut self) {
        self.route_epoch = self.route_epoch.wrapping_add(1);
        self.clear_candidates();
    }

    fn archive_if_finalized(&mut self) {
        if self.builder.state() != PlanningState::Finalized {
            return;
        }
        let (Some(route), Some(shift)) = (self.builder.route(), self.builder.shift()) else {
            return;
        };
        let archived = ArchivedRoute {
            summary: summarise(route, shift.breaks()),
            route: route.clone(),
            shift: shift.clone(),
        };
        info!(
            "archived route {} with {} trips earning {:.2}",
            self.previous.len() + 1,
            archived.summary.trip_count,
            archived.summary.total_revenue
        );
        self.previous.push(archived);
        self.route_epoch = self.route_epoch.wrapping_add(1);
    }

    /// Start planning `shift`.
    ///
    /// # Errors
    /// Propagates [`RouteBuilder::submit_shift`] failures.
    pub fn submit_shift(&mut self, shift: ShiftParameters) -> Result<(), PlanningError> {
        self.builder.submit_shift(shift)?;
        self.invalidate_route();
        Ok(())
    }

    /// Commit a drop-off.
    ///
    /// # Errors
    /// Propagates [`RouteBuilder::commit_dropoff`] failures.
    pub fn commit_dropoff(&mut self, candidate: &Candidate) -> Result<PlanningState, PlanningError> {
        let state = self.builder.commit_dropoff(candidate)?;
        self.clear_candidates();
        self.archive_if_finalized();
        Ok(state)
    }

    /// Commit a pickup, archiving the route if it ends the shift.
    ///
    /// # Errors
    /// Propagates [`RouteBuilder::commit_pickup`] failures.
    pub fn commit_pickup(&mut self, candidate: &Candidate) -> Result<PlanningState, PlanningError> {
        let state = self.builder.commit_pickup(candidate)?;
        self.clear_candidates();
        self.archive_if_finalized();
        Ok(state)
    }

    /// Finish early and archive the route.
    ///
    /// # Errors
    /// Propagates [`RouteBuilder::finish`] failures.
    pub fn finish(&mut self) -> Result<(), PlanningError> {
        self.builder.finish()?;
        self.clear_candidates();
        self.archive_if_finalized();
        Ok(())
    }

    /// Discard the in-progress route.
    ///
    /// # Errors
    /// Propagates [`RouteBuilder::abandon`] failures.
    pub fn abandon(&mut self) -> Result<(), PlanningError> {
        self.builder.abandon()?;
        self.invalidate_route();
        Ok(())
    }

    /// Return to awaiting a shift, from any state.
    ///
    /// A finalized route is already archived; an in-progress one is
    /// discarded.
    ///
    /// # Errors
    /// Propagates builder failures.
    pub fn start_new_route(&mut self) -> Result<(), PlanningError> {
        if self.builder.state() == PlanningState::Finalized {
            self.builder.reset()?;
        } else {
            self.builder.abandon()?;
        }
        self.invalidate_route();
        Ok(())
    }

    /// Replace the candidate list.
    pub fn set_candidates(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.candidate_epoch = self.candidate_epoch.wrapping_add(1);
    }

    /// Candidates currently offered.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Highest-scoring candidate; the first wins ties.
    #[must_use]
    pub fn recommended(&self) -> Option<&Candidate> {
        recommended(&self.candidates).and_then(|index| self.candidates.get(index))
    }

    /// Commit the candidate at `index` as whatever kind the state expects.
    ///
    /// # Errors
    /// Returns [`PlanningError::UnknownCandidate`] for a bad index, or
    /// [`PlanningError::InvalidTransition`] when no stop is expected.
    pub fn commit_candidate(&mut self, index: usize) -> Result<PlanningState, PlanningError> {
        let candidate = self
            .candidates
            .get(index)
            .cloned()
            .ok_or(PlanningError::UnknownCandidate { index })?;
        match self.builder.expected_kind() {
            Some(StopKind::Dropoff) => self.commit_dropoff(&candidate),
            Some(StopKind::Pickup) => self.commit_pickup(&candidate),
            None => Err(PlanningError::InvalidTransition {
                state: self.builder.state(),
                action: "commit a candidate",
            }),
        }
    }

    /// Commit the recommended candidate.
    ///
    /// # Errors
    /// Returns [`PlanningError::NoCandidate`] when nothing is scored, or
    /// propagates [`commit_candidate`](Self::commit_candidate) failures.
    pub fn commit_recommended(&mut self) -> Result<PlanningState, PlanningError> {
        let index = recommended(&self.candidates).ok_or(PlanningError::NoCandidate)?;
        self.commit_candidate(index)
    }

    /// Begin a name lookup for the stop at `index`.
    ///
    /// Finalized routes are archived and take no further names.
    #[must_use]
    pub fn stop_name_ticket(&self, index: usize) -> Option<NameTicket> {
        if self.builder.state() == PlanningState::Finalized {
            return None;
        }
        self.builder.route()?.stops().get(index)?;
        Some(NameTicket {
            target: NameTarget::Stop(index),
            epoch: self.route_epoch,
        })
    }

    /// Begin a name lookup for the candidate at `index`.
    #[must_use]
    pub fn candidate_name_ticket(&self, index: usize) -> Option<NameTicket> {
        self.candidates.get(index)?;
        Some(NameTicket {
            target: NameTarget::Candidate(index),
            epoch: self.candidate_epoch,
        })
    }

    /// Apply a stop name lookup result.
    ///
    /// Failures fall back to `"Location {n}"` with a 1-based stop number.
    pub fn apply_stop_name<E: fmt::Display>(
        &mut self,
        ticket: NameTicket,
        result: Result<String, E>,
    ) -> LookupOutcome {
        let NameTarget::Stop(index) = ticket.target else {
            return LookupOutcome::Discarded;
        };
        if ticket.epoch != self.route_epoch {
            debug!("discarding stale name for stop {index}");
            return LookupOutcome::Discarded;
        }
        let (name, outcome) = match result {
            Ok(name) => (name, LookupOutcome::Applied),
            Err(err) => {
                warn!("name lookup for stop {index} failed: {err}");
                (format!("Location {}", index + 1), LookupOutcome::FellBack)
            }
        };
        if self.builder.set_stop_name(index, name) {
            outcome
        } else {
            LookupOutcome::Discarded
        }
    }

    /// Apply a candidate name lookup result.
    ///
    /// Failures fall back to [`UNKNOWN_LOCATION`].
    pub fn apply_candidate_name<E: fmt::Display>(
        &mut self,
        ticket: NameTicket,
        result: Result<String, E>,
    ) -> LookupOutcome {
        let NameTarget::Candidate(index) = ticket.target else {
            return LookupOutcome::Discarded;
        };
        if ticket.epoch != self.candidate_epoch {
            debug!("discarding stale name for candidate {index}");
            return LookupOutcome::Discarded;
        }
        let Some(candidate) = self.candidates.get_mut(index) else {
            return LookupOutcome::Discarded;
        };
        match result {
            Ok(name) => {
                candidate.label = name;
                LookupOutcome::Applied
            }
            Err(err) => {
                warn!("name lookup for candidate {index} failed: {err}");
                UNKNOWN_LOCATION.clone_into(&mut candidate.label);
                LookupOutcome::FellBack
            }
        }
    }
}
