//! Synchronous facade over an async [`Geocoder`].

use std::fmt;
use std::future::Future;

use geo::Coord;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::{
    GeocodeError, Geocoder, GeocoderBuildError, Place, resolve_name_or, search_or_empty,
    search_places,
};

/// Drives a [`Geocoder`] to completion from synchronous code.
///
/// The adapter owns a current-thread Tokio runtime reused across calls.
/// When called from inside a multi-threaded runtime it borrows that
/// runtime's handle through [`tokio::task::block_in_place`] instead, which
/// avoids nested-runtime panics. Inside a `current_thread` runtime it falls
/// back to its own runtime, which blocks the caller's executor for the
/// duration of the lookup.
pub struct BlockingGeocoder<G> {
    inner: G,
    runtime: Runtime,
}

impl<G: fmt::Debug> fmt::Debug for BlockingGeocoder<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingGeocoder")
            .field("inner", &self.inner)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl<G: Geocoder> BlockingGeocoder<G> {
    /// Wrap `inner`.
    ///
    /// # Errors
    /// Returns [`GeocoderBuildError::Runtime`] if the runtime fails to build.
    pub fn new(inner: G) -> Result<Self, GeocoderBuildError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(GeocoderBuildError::Runtime)?;
        Ok(Self { inner, runtime })
    }

    /// Wrapped geocoder.
    pub const fn inner(&self) -> &G {
        &self.inner
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    /// Blocking [`Geocoder::resolve_name`].
    ///
    /// # Errors
    /// Propagates the geocoder's error.
    pub fn resolve_name(&self, location: Coord<f64>) -> Result<String, GeocodeError> {
        self.block_on(self.inner.resolve_name(location))
    }

    /// Blocking [`search_places`].
    ///
    /// # Errors
    /// Propagates the geocoder's error for searchable queries.
    pub fn search(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        self.block_on(search_places(&self.inner, query))
    }

    /// Blocking [`resolve_name_or`].
    pub fn resolve_name_or(&self, location: Coord<f64>, fallback: &str) -> String {
        self.block_on(resolve_name_or(&self.inner, location, fallback))
    }

    /// Blocking [`search_or_empty`].
    pub fn search_or_empty(&self, query: &str) -> Vec<Place> {
        self.block_on(search_or_empty(&self.inner, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::test_support::StubGeocoder;
    use rstest::rstest;
    use shiftplan_core::geometry::lat_lng;

    #[rstest]
    fn resolves_outside_any_runtime() {
        let geocoder =
            BlockingGeocoder::new(StubGeocoder::new().with_name("Tiong Bahru")).expect("runtime");
        assert_eq!(
            geocoder.resolve_name(lat_lng(1.28, 103.83)).as_deref(),
            Ok("Tiong Bahru")
        );
        assert_eq!(geocoder.inner().calls(), 1);
    }

    #[rstest]
    fn resolves_inside_multi_thread_runtime() {
        let geocoder =
            BlockingGeocoder::new(StubGeocoder::new().with_name("Bugis")).expect("runtime");
        let host = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .build()
            .expect("host runtime");
        let name = host.block_on(async { geocoder.resolve_name_or(lat_lng(1.30, 103.85), "?") });
        assert_eq!(name, "Bugis");
    }

    #[rstest]
    fn short_search_is_skipped() {
        let geocoder = BlockingGeocoder::new(StubGeocoder::new()).expect("runtime");
        assert!(geocoder.search_or_empty("a").is_empty());
        assert_eq!(geocoder.inner().calls(), 0);
    }
}
