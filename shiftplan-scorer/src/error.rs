//! Error types raised while configuring the candidate scorer.

use thiserror::Error;

/// Errors raised by [`ScoreWeights::validate`](crate::ScoreWeights::validate).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScorerError {
    /// A weight is unusable.
    #[error("invalid score weight {field}: {value}")]
    InvalidWeights {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied for it.
        value: f64,
    },
}
