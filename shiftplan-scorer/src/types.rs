//! Tunable weights for candidate scoring.

use serde::{Deserialize, Serialize};
use shiftplan_core::geometry::DEFAULT_SPEED_KMH;

use crate::ScorerError;

/// Coefficients applied by [`CandidateScorer`](crate::CandidateScorer).
///
/// Defaults reproduce the observed fare model: a 4.50 flag fall plus 0.70 per
/// kilometre, a 0.5 distance penalty, and a 50% break penalty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Score deducted per kilometre travelled.
    pub distance_penalty: f64,
    /// Multiplier applied when arrival lands inside a break, in `[0, 1]`.
    pub break_penalty_factor: f64,
    /// Flat fare for any drop-off.
    pub base_fare: f64,
    /// Fare added per kilometre.
    pub per_km_rate: f64,
    /// Multiplier applied to the demand signal for pickups.
    pub demand_weight: f64,
    /// Average driving speed used for duration estimates.
    pub speed_kmh: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            distance_penalty: 0.5,
            break_penalty_factor: 0.5,
            base_fare: 4.5,
            per_km_rate: 0.7,
            demand_weight: 1.0,
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl ScoreWeights {
    /// Fare for a trip of `distance_km`: the flag fall plus the per-km rate.
    #[expect(
        clippy::float_arithmetic,
        reason = "fares are a linear function of distance"
    )]
    #[must_use]
    pub fn fare(&self, distance_km: f64) -> f64 {
        self.base_fare + distance_km * self.per_km_rate
    }

    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScorerError::InvalidWeights`] naming the first field that is
    /// not finite, a non-positive speed, or a break penalty outside `[0, 1]`.
    pub fn validate(self) -> Result<Self, ScorerError> {
        let fields = [
            ("distance_penalty", self.distance_penalty),
            ("break_penalty_factor", self.break_penalty_factor),
            ("base_fare", self.base_fare),
            ("per_km_rate", self.per_km_rate),
            ("demand_weight", self.demand_weight),
            ("speed_kmh", self.speed_kmh),
        ];
        if let Some((field, value)) = fields.into_iter().find(|(_, value)| !value.is_finite()) {
            return Err(ScorerError::InvalidWeights { field, value });
        }
        if self.speed_kmh <= 0.0 {
            return Err(ScorerError::InvalidWeights {
                field: "speed_kmh",
                value: self.speed_kmh,
            });
        }
        if !(0.0..=1.0).contains(&self.break_penalty_factor) {
            return Err(ScorerError::InvalidWeights {
                field: "break_penalty_factor",
                value: self.break_penalty_factor,
            });
        }
        Ok(self)
    }
}
