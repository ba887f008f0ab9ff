//! Candidate generation and selection strategies.

use std::fmt;
use std::str::FromStr;

use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use shiftplan_core::geometry::{EARTH_RADIUS_KM, lat_lng};
use shiftplan_core::{Candidate, Reference, StopKind};
use shiftplan_scorer::recommended;
use thiserror::Error;

/// Supplies locations to consider for the next stop.
///
/// Implementations may be stateful; a seeded generator advances its RNG on
/// every call.
pub trait CandidateSource {
    /// Produce candidates around `reference` for a stop of kind `purpose`.
    fn candidates(&mut self, reference: &Reference, purpose: StopKind) -> Vec<Candidate>;
}

impl<T: CandidateSource + ?Sized> CandidateSource for &mut T {
    fn candidates(&mut self, reference: &Reference, purpose: StopKind) -> Vec<Candidate> {
        (**self).candidates(reference, purpose)
    }
}

impl<T: CandidateSource + ?Sized> CandidateSource for Box<T> {
    fn candidates(&mut self, reference: &Reference, purpose: StopKind) -> Vec<Candidate> {
        (**self).candidates(reference, purpose)
    }
}

/// Seeded random points scattered in a ring around the reference.
///
/// Stands in for real demand hot-spots. Offsets follow the great circle, so
/// distances are honest regardless of latitude.
#[derive(Debug, Clone)]
pub struct RadialCandidates {
    count: usize,
    min_radius_km: f64,
    max_radius_km: f64,
    rng: ChaCha8Rng,
}

impl RadialCandidates {
    /// Default number of candidates per call.
    pub const DEFAULT_COUNT: usize = 5;
    /// Default inner radius.
    pub const DEFAULT_MIN_RADIUS_KM: f64 = 0.5;
    /// Default outer radius.
    pub const DEFAULT_MAX_RADIUS_KM: f64 = 8.0;

    /// Create a generator seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            count: Self::DEFAULT_COUNT,
            min_radius_km: Self::DEFAULT_MIN_RADIUS_KM,
            max_radius_km: Self::DEFAULT_MAX_RADIUS_KM,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Set how many candidates each call yields.
    #[must_use]
    pub const fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the ring radii. Values are reordered if given backwards and
    /// negative or non-finite values collapse to zero.
    #[must_use]
    pub fn with_radius(mut self, min_km: f64, max_km: f64) -> Self {
        let sane = |km: f64| if km.is_finite() { km.max(0.0) } else { 0.0 };
        let (low, high) = (sane(min_km), sane(max_km));
        self.min_radius_km = low.min(high);
        self.max_radius_km = low.max(high);
        self
    }

    /// Number of candidates per call.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    fn sample(&mut self, origin: Coord<f64>) -> Coord<f64> {
        let bearing = self.rng.gen_range(0.0..std::f64::consts::TAU);
        let distance_km = if self.max_radius_km > self.min_radius_km {
            self.rng.gen_range(self.min_radius_km..self.max_radius_km)
        } else {
            self.min_radius_km
        };
        destination(origin, bearing, distance_km)
    }
}

impl CandidateSource for RadialCandidates {
    fn candidates(&mut self, reference: &Reference, _purpose: StopKind) -> Vec<Candidate> {
        (1..=self.count)
            .map(|n| Candidate::at(self.sample(reference.location), format!("Candidate {n}")))
            .collect()
    }
}

/// Point reached by travelling `distance_km` from `origin` on `bearing`
/// (radians clockwise from north).
#[expect(
    clippy::float_arithmetic,
    reason = "spherical destination formula"
)]
fn destination(origin: Coord<f64>, bearing: f64, distance_km: f64) -> Coord<f64> {
    let angular = distance_km / EARTH_RADIUS_KM;
    let lat1 = origin.y.to_radians();
    let lng1 = origin.x.to_radians();
    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lng2 = lng1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());
    let lng_deg = (lng2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    lat_lng(lat2.to_degrees(), lng_deg)
}

/// How the automatic planner picks among scored candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Highest score, first wins ties.
    #[default]
    BestScore,
    /// Shortest distance, first wins ties.
    Nearest,
}

/// Raised when parsing an unknown strategy name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown selection strategy {0:?}; expected \"best-score\" or \"nearest\"")]
pub struct UnknownStrategy(pub String);

impl FromStr for SelectionStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best-score" | "best_score" | "best" => Ok(Self::BestScore),
            "nearest" => Ok(Self::Nearest),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BestScore => "best-score",
            Self::Nearest => "nearest",
        })
    }
}

impl SelectionStrategy {
    /// Index of the chosen candidate, if any qualifies.
    #[must_use]
    pub fn select(self, candidates: &[Candidate]) -> Option<usize> {
        match self {
            Self::BestScore => recommended(candidates),
            Self::Nearest => {
                let mut best: Option<(usize, f64)> = None;
                for (index, distance) in candidates.iter().enumerate().filter_map(|(i, c)| {
                    c.distance_km.filter(|d| !d.is_nan()).map(|d| (i, d))
                }) {
                    if best.is_none_or(|(_, closest)| distance < closest) {
                        best = Some((index, distance));
                    }
                }
                best.map(|(index, _)| index)
            }
        }
    }
}
