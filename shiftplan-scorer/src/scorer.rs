//! Profitability scoring for next-stop candidates.

use std::cmp::Ordering;

use log::debug;
use shiftplan_core::time::is_during_break;
use shiftplan_core::{
    BreakWindow, Candidate, DemandProvider, Reference, StopKind, haversine_km, travel_seconds,
};

use crate::{ScoreWeights, ScorerError};

/// Scores candidates relative to a reference point and time.
///
/// Scoring is pure given its inputs: the same reference, candidate and
/// breaks always produce the same result for a deterministic provider.
///
/// # Examples
/// ```
/// use shiftplan_core::{Candidate, Reference, StopKind, TimeOfDay, geometry::lat_lng};
/// use shiftplan_scorer::{CandidateScorer, NoDemand};
///
/// let scorer = CandidateScorer::new(NoDemand);
/// let reference = Reference {
///     location: lat_lng(1.30, 103.80),
///     time: TimeOfDay::from_hour(9),
/// };
/// let candidate = Candidate::at(lat_lng(1.35, 103.85), "Bishan");
/// let scored = scorer.score(&reference, &candidate, StopKind::Dropoff, &[]);
/// assert!(scored.score.is_some());
/// assert!(scored.revenue.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct CandidateScorer<D> {
    demand: D,
    weights: ScoreWeights,
}

impl<D: DemandProvider> CandidateScorer<D> {
    /// Build a scorer with default weights.
    #[must_use]
    pub fn new(demand: D) -> Self {
        Self {
            demand,
            weights: ScoreWeights::default(),
        }
    }

    /// Build a scorer with custom weights.
    ///
    /// # Errors
    /// Returns [`ScorerError::InvalidWeights`] if the weights fail validation.
    pub fn with_weights(demand: D, weights: ScoreWeights) -> Result<Self, ScorerError> {
        Ok(Self {
            demand,
            weights: weights.validate()?,
        })
    }

    /// Weights in use.
    #[must_use]
    pub const fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Demand provider in use.
    #[must_use]
    pub const fn demand(&self) -> &D {
        &self.demand
    }

    /// Fare for a trip of `distance_km`.
    #[must_use]
    pub fn fare(&self, distance_km: f64) -> f64 {
        self.weights.fare(distance_km)
    }

    /// Score one candidate as the next stop of kind `purpose`.
    ///
    /// Pickups are valued by demand at arrival; drop-offs by the fare, which
    /// is also stored as the candidate's revenue. Arrivals inside a break are
    /// penalised, never rejected.
    #[expect(
        clippy::float_arithmetic,
        reason = "scores combine fares, demand and distance penalties"
    )]
    #[must_use]
    pub fn score(
        &self,
        reference: &Reference,
        candidate: &Candidate,
        purpose: StopKind,
        breaks: &[BreakWindow],
    ) -> Candidate {
        let distance_km = haversine_km(reference.location, candidate.location);
        let duration_sec = candidate
            .duration_sec
            .unwrap_or_else(|| travel_seconds(distance_km, self.weights.speed_kmh));
        let arrival = reference.time.plus_minutes(duration_sec.div_ceil(60));
        let demand_signal = D::sanitise(self.demand.estimate_demand(candidate.location, arrival));

        let (base, revenue) = match purpose {
            StopKind::Pickup => (self.weights.demand_weight * demand_signal, candidate.revenue),
            StopKind::Dropoff => {
                let fare = self.fare(distance_km);
                (fare, Some(fare))
            }
        };
        let unpenalised = base - distance_km * self.weights.distance_penalty;
        let crosses_break = is_during_break(arrival, breaks);
        let score = if crosses_break {
            unpenalised * self.weights.break_penalty_factor
        } else {
            unpenalised
        };

        debug!(
            "scored {label} as {purpose}: {distance_km:.2} km, arrival {arrival}, score {score:.3}",
            label = candidate.label
        );

        Candidate {
            distance_km: Some(distance_km),
            duration_sec: Some(duration_sec),
            demand_signal: Some(demand_signal),
            score: Some(score),
            crosses_break,
            revenue,
            ..candidate.clone()
        }
    }

    /// Score every candidate, preserving the caller's order.
    #[must_use]
    pub fn score_all(
        &self,
        reference: &Reference,
        candidates: &[Candidate],
        purpose: StopKind,
        breaks: &[BreakWindow],
    ) -> Vec<Candidate> {
        candidates
            .iter()
            .map(|candidate| self.score(reference, candidate, purpose, breaks))
            .collect()
    }
}

fn comparable_score(candidate: &Candidate) -> Option<f64> {
    candidate.score.filter(|score| !score.is_nan())
}

/// Index of the highest-scoring candidate.
///
/// Ties go to the earliest candidate. Unscored candidates are ignored.
///
/// # Examples
/// ```
/// use shiftplan_core::{Candidate, geometry::lat_lng};
/// use shiftplan_scorer::recommended;
///
/// let mut a = Candidate::at(lat_lng(0.0, 0.0), "a");
/// let mut b = Candidate::at(lat_lng(0.0, 0.0), "b");
/// a.score = Some(3.0);
/// b.score = Some(3.0);
/// assert_eq!(recommended(&[a, b]), Some(0));
/// ```
#[must_use]
pub fn recommended(candidates: &[Candidate]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, score) in candidates
        .iter()
        .enumerate()
        .filter_map(|(index, c)| comparable_score(c).map(|score| (index, score)))
    {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}

/// Sort candidates by descending score.
///
/// The sort is stable, so equal scores keep their original order. Unscored
/// candidates sink to the end.
#[must_use]
pub fn rank(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| match (comparable_score(a), comparable_score(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    candidates
}
