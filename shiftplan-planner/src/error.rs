//! Errors raised by the route builder and planning session.

use thiserror::Error;

use crate::builder::PlanningState;

/// Errors raised while building a route.
///
/// None of these are business-rule failures: they indicate a caller asked
/// for something the current state cannot do.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// The action is not permitted in the current state.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        /// State the builder was in.
        state: PlanningState,
        /// Attempted action.
        action: &'static str,
    },
    /// Only the seed stop exists, so there is nothing to finish.
    #[error("a route needs at least 2 stops to finish, found {stops}")]
    RouteTooShort {
        /// Number of stops in the route.
        stops: usize,
    },
    /// No scored candidate is available to commit.
    #[error("no candidate is available")]
    NoCandidate,
    /// A candidate index was out of range.
    #[error("no candidate at index {index}")]
    UnknownCandidate {
        /// Requested index.
        index: usize,
    },
}
