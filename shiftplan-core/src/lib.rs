//! Core domain types for the shiftplan engine.
//!
//! This crate models a ride-hail driver's shift: the working window and
//! breaks ([`ShiftParameters`]), break-aware schedule arithmetic
//! ([`time`]), committed stops ([`Stop`]) gathered into a [`Route`], and the
//! candidates under evaluation for the next stop ([`Candidate`]). Scoring and
//! planning live in sibling crates; this crate holds the shared vocabulary and
//! the [`DemandProvider`] seam they plug into.
//!
//! Constructors validate early. [`ShiftDraft::validate`] is the single gate
//! between user input and planning, so downstream components can assume well
//! formed windows and breaks.

#![forbid(unsafe_code)]

pub mod candidate;
pub mod demand;
pub mod geometry;
pub mod route;
pub mod shift;
pub mod stop;
pub mod time;

#[doc(hidden)]
pub mod test_support;

pub use candidate::{Candidate, DEFAULT_DURATION_SECS, Reference};
pub use demand::{DemandProvider, MAX_DEMAND, MIN_DEMAND};
pub use geometry::{LatLng, haversine_km, travel_seconds};
pub use route::{Route, RouteStatus};
#[cfg(feature = "serde")]
pub use shift::ShiftRequest;
pub use shift::{MAX_SHIFT_HOUR, OverlapPolicy, ShiftDraft, ShiftError, ShiftParameters, ShiftWindow};
pub use stop::{Stop, StopKind};
pub use time::{BreakSchedule, BreakWindow, TimeOfDay};
