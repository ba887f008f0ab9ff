//! Reverse geocoding and place search.
//!
//! [`Geocoder`] is the seam the planner's hosts use to label stops and
//! candidates. [`NominatimGeocoder`] talks to a Nominatim instance over HTTP;
//! [`test_support::StubGeocoder`] answers from canned data.
//!
//! Lookups can fail for reasons outside the engine's control, so hosts
//! normally call [`resolve_name_or`] and [`search_or_empty`], which log the
//! failure and substitute a fallback rather than surfacing an error.
//!
//! # Example
//!
//! ```no_run
//! use shiftplan_core::geometry::lat_lng;
//! use shiftplan_data::geocoding::{NominatimConfig, NominatimGeocoder, resolve_name_or};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let geocoder = NominatimGeocoder::with_config(
//!     NominatimConfig::new("https://nominatim.openstreetmap.org")
//!         .with_user_agent("my-dispatcher/1.0"),
//! )?;
//! let name = resolve_name_or(&geocoder, lat_lng(1.3521, 103.8198), "Unknown").await;
//! println!("{name}");
//! # Ok(())
//! # }
//! ```

mod blocking;
mod error;
mod nominatim;
mod wire;

#[doc(hidden)]
pub mod test_support;

use async_trait::async_trait;
use geo::Coord;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub use blocking::BlockingGeocoder;
pub use error::{GeocodeError, GeocoderBuildError};
pub use nominatim::{DEFAULT_USER_AGENT, NominatimConfig, NominatimGeocoder};

/// Queries shorter than this many characters are not sent to a geocoder.
pub const MIN_QUERY_CHARS: usize = 3;

/// A named location returned by a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Display name.
    pub name: String,
    /// Position (`x` = longitude, `y` = latitude).
    pub location: Coord<f64>,
}

impl Place {
    /// Build a place from a name and position.
    #[must_use]
    pub fn new(name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// Resolves coordinates to names and free text to places.
#[async_trait(?Send)]
pub trait Geocoder {
    /// Human-readable name for `location`.
    ///
    /// # Errors
    /// Returns a [`GeocodeError`] when the lookup fails or finds nothing.
    async fn resolve_name(&self, location: Coord<f64>) -> Result<String, GeocodeError>;

    /// Places matching `query`, best match first.
    ///
    /// Callers should prefer [`search_places`], which skips short queries.
    ///
    /// # Errors
    /// Returns a [`GeocodeError`] when the lookup fails.
    async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodeError>;
}

/// Whether `query` is long enough to be worth sending.
#[must_use]
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Search `geocoder`, returning no places for queries under
/// [`MIN_QUERY_CHARS`] characters without calling out.
///
/// # Errors
/// Propagates the geocoder's error for searchable queries.
pub async fn search_places<G>(geocoder: &G, query: &str) -> Result<Vec<Place>, GeocodeError>
where
    G: Geocoder + ?Sized,
{
    if !is_searchable(query) {
        debug!("skipping search for short query {query:?}");
        return Ok(Vec::new());
    }
    geocoder.search(query.trim()).await
}

/// Resolve a name for `location`, logging any failure and returning
/// `fallback` instead.
pub async fn resolve_name_or<G>(geocoder: &G, location: Coord<f64>, fallback: &str) -> String
where
    G: Geocoder + ?Sized,
{
    match geocoder.resolve_name(location).await {
        Ok(name) => name,
        Err(err) => {
            warn!(
                "reverse geocoding {:.5},{:.5} failed: {err}",
                location.y, location.x
            );
            fallback.to_owned()
        }
    }
}

/// Search for `query`, logging any failure and returning no places instead.
pub async fn search_or_empty<G>(geocoder: &G, query: &str) -> Vec<Place>
where
    G: Geocoder + ?Sized,
{
    search_places(geocoder, query).await.unwrap_or_else(|err| {
        warn!("place search for {query:?} failed: {err}");
        Vec::new()
    })
}
