//! Deterministic geocoder for tests and offline runs.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use geo::Coord;

use super::{GeocodeError, Geocoder, Place};

/// Canned-answer [`Geocoder`] that counts the calls it receives.
///
/// # Example
///
/// ```
/// use shiftplan_core::geometry::lat_lng;
/// use shiftplan_data::geocoding::{BlockingGeocoder, test_support::StubGeocoder};
///
/// let stub = StubGeocoder::new().with_name("Clarke Quay");
/// let geocoder = BlockingGeocoder::new(stub)?;
/// assert_eq!(geocoder.resolve_name_or(lat_lng(1.29, 103.85), "?"), "Clarke Quay");
/// # Ok::<(), shiftplan_data::GeocoderBuildError>(())
/// ```
#[derive(Debug)]
pub struct StubGeocoder {
    name: Result<String, GeocodeError>,
    places: Result<Vec<Place>, GeocodeError>,
    calls: Cell<usize>,
    last_query: RefCell<Option<String>>,
}

impl Default for StubGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StubGeocoder {
    /// Name lookups answer `"Stub Street"`; searches find nothing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: Ok("Stub Street".to_owned()),
            places: Ok(Vec::new()),
            calls: Cell::new(0),
            last_query: RefCell::new(None),
        }
    }

    /// Every lookup fails with `error`.
    #[must_use]
    pub fn failing(error: GeocodeError) -> Self {
        Self {
            name: Err(error.clone()),
            places: Err(error),
            ..Self::new()
        }
    }

    /// Answer name lookups with `name`.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Ok(name.into());
        self
    }

    /// Answer searches with `places`.
    #[must_use]
    pub fn with_places(mut self, places: Vec<Place>) -> Self {
        self.places = Ok(places);
        self
    }

    /// Number of lookups received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Text of the most recent search.
    #[must_use]
    pub fn last_query(&self) -> Option<String> {
        self.last_query.borrow().clone()
    }

    fn record(&self) {
        self.calls.set(self.calls.get().saturating_add(1));
    }
}

#[async_trait(?Send)]
impl Geocoder for StubGeocoder {
    async fn resolve_name(&self, _location: Coord<f64>) -> Result<String, GeocodeError> {
        self.record();
        self.name.clone()
    }

    async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        self.record();
        *self.last_query.borrow_mut() = Some(query.to_owned());
        self.places.clone()
    }
}
