//! Candidate scoring for shift route planning.
//!
//! [`CandidateScorer`] ranks possible next stops relative to the driver's
//! current position and time. Each candidate gains a straight-line distance,
//! a travel-time estimate, a demand signal and a profitability score. Arrivals
//! that would land inside a break are penalised rather than excluded, so the
//! driver can still choose them.
//!
//! Demand comes from a [`DemandProvider`](shiftplan_core::DemandProvider).
//! This crate ships three stand-ins: [`NoDemand`], [`ConstantDemand`] and
//! the deterministic [`SeededDemand`].
//!
//! # Examples
//!
//! ```
//! use shiftplan_core::{Candidate, Reference, StopKind, TimeOfDay, geometry::lat_lng};
//! use shiftplan_scorer::{CandidateScorer, SeededDemand, rank};
//!
//! let scorer = CandidateScorer::new(SeededDemand::new(42));
//! let reference = Reference {
//!     location: lat_lng(1.3521, 103.8198),
//!     time: TimeOfDay::from_hour(8),
//! };
//! let candidates = vec![
//!     Candidate::at(lat_lng(1.30, 103.85), "Marina"),
//!     Candidate::at(lat_lng(1.44, 103.78), "Woodlands"),
//! ];
//! let scored = scorer.score_all(&reference, &candidates, StopKind::Pickup, &[]);
//! let ranked = rank(scored);
//! assert_eq!(ranked.len(), 2);
//! ```

#![forbid(unsafe_code)]

mod demand;
mod error;
mod scorer;
mod types;

pub use demand::{ConstantDemand, NoDemand, SeededDemand};
pub use error::ScorerError;
pub use scorer::{CandidateScorer, rank, recommended};
pub use types::ScoreWeights;

#[cfg(test)]
mod tests;
