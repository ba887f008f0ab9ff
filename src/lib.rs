//! Facade crate for the shift route planning engine.
//!
//! This crate re-exports the time model, data model and scorer, and exposes
//! the planner and geocoding collaborators behind feature flags.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use shiftplan_core::{
    BreakSchedule, BreakWindow, Candidate, DemandProvider, LatLng, OverlapPolicy, Reference,
    Route, RouteStatus, ShiftDraft, ShiftError, ShiftParameters, ShiftWindow, Stop, StopKind,
    TimeOfDay, haversine_km, travel_seconds,
};

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub use shiftplan_core::ShiftRequest;

pub use shiftplan_scorer::{
    CandidateScorer, ConstantDemand, NoDemand, ScoreWeights, ScorerError, SeededDemand, rank,
    recommended,
};

#[cfg(feature = "planner")]
#[cfg_attr(docsrs, doc(cfg(feature = "planner")))]
pub use shiftplan_planner::{
    ArchivedRoute, AutoPlanner, CandidateSource, LookupOutcome, NameTicket, PlanningError,
    PlanningSession, PlanningState, RadialCandidates, RouteBuilder, RouteSummary,
    SelectionStrategy, Trip, recover_trips, summarise,
};

#[cfg(feature = "geocoding")]
#[cfg_attr(docsrs, doc(cfg(feature = "geocoding")))]
pub use shiftplan_data::{
    BlockingGeocoder, GeocodeError, Geocoder, NominatimConfig, NominatimGeocoder, Place,
    resolve_name_or, search_or_empty,
};
