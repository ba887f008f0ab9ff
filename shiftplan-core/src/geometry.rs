//! Straight-line distance and travel-time estimates.
//!
//! Coordinates follow `geo`'s convention: `x` is longitude and `y` is
//! latitude. These estimates ignore roads entirely; they stand in for a real
//! routing provider.

use geo::Coord;

/// Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average driving speed assumed by the placeholder travel-time estimate.
pub const DEFAULT_SPEED_KMH: f64 = 60.0;

/// Build a coordinate from latitude and longitude.
///
/// # Examples
/// ```
/// use shiftplan_core::geometry::lat_lng;
///
/// let singapore = lat_lng(1.3521, 103.8198);
/// assert_eq!(singapore.x, 103.8198);
/// assert_eq!(singapore.y, 1.3521);
/// ```
#[must_use]
pub const fn lat_lng(lat: f64, lng: f64) -> Coord<f64> {
    Coord { x: lng, y: lat }
}

/// Latitude/longitude pair as exchanged with the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Report whether both components are finite and within range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<LatLng> for Coord<f64> {
    fn from(value: LatLng) -> Self {
        lat_lng(value.lat, value.lng)
    }
}

impl From<Coord<f64>> for LatLng {
    fn from(value: Coord<f64>) -> Self {
        Self {
            lat: value.y,
            lng: value.x,
        }
    }
}

/// Great-circle distance between two coordinates in kilometres.
#[expect(
    clippy::float_arithmetic,
    reason = "haversine distance is floating-point by definition"
)]
#[must_use]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();
    let delta_lat = (to.y - from.y).to_radians();
    let delta_lng = (to.x - from.x).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Travel time in whole seconds for `distance_km` at `speed_kmh`.
///
/// Rounds up so a non-zero distance never takes zero seconds. Non-finite or
/// non-positive inputs yield zero.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is range-checked before the cast"
)]
#[must_use]
pub fn travel_seconds(distance_km: f64, speed_kmh: f64) -> u32 {
    if !distance_km.is_finite() || distance_km <= 0.0 || !(speed_kmh > 0.0) {
        return 0;
    }
    let seconds = (distance_km / speed_kmh * 3600.0).ceil();
    if seconds >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        seconds as u32
    }
}
