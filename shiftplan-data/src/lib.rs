//! External data collaborators for the shift planning engine.
//!
//! Responsibilities:
//! - Turn coordinates into human-readable place names and search places by
//!   free text.
//! - Provide an HTTP adapter for Nominatim plus a deterministic stub.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `shiftplan-core` and
//!   `shiftplan-planner`).
//! - Lookups are asynchronous; synchronous callers go through
//!   [`geocoding::BlockingGeocoder`].
//!
//! Invariants:
//! - Lookup failures never abort planning; the soft-fail helpers substitute
//!   a fallback and log the cause.
//! - No global mutable state.
#![forbid(unsafe_code)]

pub mod geocoding;

pub use geocoding::{
    BlockingGeocoder, DEFAULT_USER_AGENT, GeocodeError, Geocoder, GeocoderBuildError,
    MIN_QUERY_CHARS, NominatimConfig, NominatimGeocoder, Place, resolve_name_or, search_or_empty,
    search_places,
};
