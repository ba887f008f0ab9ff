//! Route planning for a driver's shift.
//!
//! [`RouteBuilder`] is the state machine at the centre of the crate: it seeds
//! a route at the shift's start, then alternates between drop-offs and
//! pickups, pushing every stop past any break it would land in. A
//! [`PlanningSession`] wraps one builder together with the candidates on
//! offer and the archive of finished routes, and guards against late name
//! lookups landing on the wrong stop. [`summary`] derives totals and trips
//! from a stop list. [`AutoPlanner`] drives a session end to end from a
//! [`CandidateSource`].
//!
//! Transitions requested from the wrong state fail with
//! [`PlanningError::InvalidTransition`] and are logged; they never mutate the
//! route.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod autoplan;
mod builder;
mod error;
mod generate;
mod session;
pub mod summary;

#[doc(hidden)]
pub mod test_support;

pub use autoplan::AutoPlanner;
pub use builder::{PlanningState, RouteBuilder};
pub use error::PlanningError;
pub use generate::{CandidateSource, RadialCandidates, SelectionStrategy, UnknownStrategy};
pub use session::{ArchivedRoute, LookupOutcome, NameTicket, PlanningSession, UNKNOWN_LOCATION};
pub use summary::{PairingMode, RouteSummary, Trip, TripRecovery, recover_trips, summarise};
