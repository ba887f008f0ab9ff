//! Deterministic candidate fixtures for planner tests.

use shiftplan_core::geometry::lat_lng;
use shiftplan_core::{Candidate, Reference, StopKind};

use crate::CandidateSource;

/// Construct a candidate with a known travel time.
///
/// # Examples
/// ```rust
/// use shiftplan_planner::test_support::candidate;
///
/// let c = candidate("Marina", 1.28, 103.86, 600);
/// assert_eq!(c.duration_minutes(), 10);
/// ```
#[must_use]
pub fn candidate(label: &str, lat: f64, lng: f64, duration_sec: u32) -> Candidate {
    Candidate::at(lat_lng(lat, lng), label).with_duration_sec(duration_sec)
}

/// A [`CandidateSource`] returning the same list on every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedCandidates {
    candidates: Vec<Candidate>,
}

impl FixedCandidates {
    /// Offer `candidates` on every call.
    #[must_use]
    pub const fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

impl CandidateSource for FixedCandidates {
    fn candidates(&mut self, _reference: &Reference, _purpose: StopKind) -> Vec<Candidate> {
        self.candidates.clone()
    }
}
