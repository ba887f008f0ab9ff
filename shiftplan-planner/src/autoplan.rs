//! Hands-free planning: generate, score, select and commit until the shift
//! ends.

use log::{info, warn};
use shiftplan_core::{DemandProvider, Route, ShiftParameters};
use shiftplan_scorer::CandidateScorer;

use crate::builder::PlanningState;
use crate::generate::{CandidateSource, SelectionStrategy};
use crate::session::{ArchivedRoute, PlanningSession};
use crate::PlanningError;

/// Drives a [`PlanningSession`] without a human in the loop.
///
/// # Examples
/// ```
/// use shiftplan_core::{ShiftDraft, geometry::lat_lng};
/// use shiftplan_planner::{AutoPlanner, PlanningSession, RadialCandidates};
/// use shiftplan_scorer::{CandidateScorer, SeededDemand};
///
/// let params = ShiftDraft::new(lat_lng(1.3521, 103.8198), 6, 10).validate()?;
/// let mut planner = AutoPlanner::new(
///     CandidateScorer::new(SeededDemand::new(1)),
///     RadialCandidates::new(1),
/// );
/// let mut session = PlanningSession::new();
/// let archived = planner.plan(&mut session, params)?;
/// assert!(archived.route().is_finalized());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct AutoPlanner<D, S> {
    scorer: CandidateScorer<D>,
    source: S,
    strategy: SelectionStrategy,
    max_stops: usize,
}

impl<D, S> AutoPlanner<D, S>
where
    D: DemandProvider,
    S: CandidateSource,
{
    /// Default cap on stops per route.
    pub const DEFAULT_MAX_STOPS: usize = 60;

    /// Build a planner choosing the best-scoring candidate each step.
    #[must_use]
    pub const fn new(scorer: CandidateScorer<D>, source: S) -> Self {
        Self {
            scorer,
            source,
            strategy: SelectionStrategy::BestScore,
            max_stops: Self::DEFAULT_MAX_STOPS,
        }
    }

    /// Choose how candidates are picked.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Cap the number of stops; values below 2 are raised to 2.
    #[must_use]
    pub fn with_max_stops(mut self, max_stops: usize) -> Self {
        self.max_stops = max_stops.max(2);
        self
    }

    /// Strategy in use.
    #[must_use]
    pub const fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    /// Plan a complete route for `shift` and return its archive entry.
    ///
    /// The route ends when a pickup passes the shift's end hour, when the
    /// stop cap is hit, or when the source runs dry.
    ///
    /// # Errors
    /// Returns [`PlanningError::InvalidTransition`] if the session is not
    /// awaiting a shift, or [`PlanningError::NoCandidate`] if the source
    /// offers nothing before the first stop (the route is abandoned).
    pub fn plan<'s>(
        &mut self,
        session: &'s mut PlanningSession,
        shift: ShiftParameters,
    ) -> Result<&'s ArchivedRoute, PlanningError> {
        session.submit_shift(shift)?;
        while session.state() != PlanningState::Finalized {
            self.step(session)?;
        }
        info!("auto-planning with {} strategy finished", self.strategy);
        session
            .previous_routes()
            .last()
            .ok_or(PlanningError::NoCandidate)
    }

    fn step(&mut self, session: &mut PlanningSession) -> Result<(), PlanningError> {
        let stops = session.route().map_or(0, Route::len);
        if stops >= self.max_stops {
            info!("stop cap of {} reached", self.max_stops);
            return session.finish();
        }
        let (Some(reference), Some(purpose), Some(shift)) =
            (session.reference(), session.expected_kind(), session.shift())
        else {
            return Err(PlanningError::InvalidTransition {
                state: session.state(),
                action: "plan the next stop",
            });
        };
        let breaks = shift.breaks().windows().to_vec();
        let raw = self.source.candidates(&reference, purpose);
        let scored = self.scorer.score_all(&reference, &raw, purpose, &breaks);
        let choice = self.strategy.select(&scored);
        session.set_candidates(scored);

        match choice {
            Some(index) => session.commit_candidate(index).map(|_| ()),
            None if stops >= 2 => {
                warn!("no candidates offered; finishing with {stops} stops");
                session.finish()
            }
            None => {
                warn!("no candidates offered for the first stop; abandoning");
                session.abandon()?;
                Err(PlanningError::NoCandidate)
            }
        }
    }
}
