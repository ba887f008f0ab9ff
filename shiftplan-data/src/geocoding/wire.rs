//! Nominatim `jsonv2` response bodies.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Output/>

use serde::Deserialize;

use super::{GeocodeError, Place};
use shiftplan_core::geometry::lat_lng;

/// Body of a `/reverse` call.
///
/// Unknown locations come back with status 200 and only `error` set.
#[derive(Debug, Default, Deserialize)]
pub struct ReverseResponse {
    /// Short name of the matched feature, often empty for plain roads.
    #[serde(default)]
    pub name: Option<String>,
    /// Full comma-separated address.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Error text when nothing matched.
    #[serde(default)]
    pub error: Option<String>,
}

impl ReverseResponse {
    /// Preferred label: the feature name, else the full address.
    pub fn into_name(self, query: &str) -> Result<String, GeocodeError> {
        if self.error.is_some() {
            return Err(GeocodeError::NotFound {
                query: query.to_owned(),
            });
        }
        non_blank(self.name)
            .or_else(|| non_blank(self.display_name))
            .ok_or_else(|| GeocodeError::NotFound {
                query: query.to_owned(),
            })
    }
}

/// One element of a `/search` response array.
#[derive(Debug, Deserialize)]
pub struct SearchHit {
    /// Latitude as a decimal string.
    pub lat: String,
    /// Longitude as a decimal string.
    pub lon: String,
    /// Short name of the matched feature.
    #[serde(default)]
    pub name: Option<String>,
    /// Full comma-separated address.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SearchHit {
    /// Convert to a [`Place`], rejecting unparsable coordinates.
    pub fn into_place(self) -> Result<Place, GeocodeError> {
        let lat = parse_degrees(&self.lat, "lat")?;
        let lng = parse_degrees(&self.lon, "lon")?;
        let name = non_blank(self.name)
            .or_else(|| non_blank(self.display_name))
            .unwrap_or_else(|| format!("{lat:.5}, {lng:.5}"));
        Ok(Place::new(name, lat_lng(lat, lng)))
    }
}

fn parse_degrees(raw: &str, field: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| GeocodeError::Parse {
            message: format!("invalid {field} value {raw:?}"),
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"name":"Raffles Place","display_name":"Raffles Place, Singapore"}"#, "Raffles Place")]
    #[case(r#"{"name":"","display_name":"1 Fullerton Road, Singapore"}"#, "1 Fullerton Road, Singapore")]
    fn reverse_prefers_short_name(#[case] body: &str, #[case] expected: &str) {
        let response: ReverseResponse = serde_json::from_str(body).expect("valid json");
        assert_eq!(response.into_name("q").as_deref(), Ok(expected));
    }

    #[rstest]
    #[case(r#"{"error":"Unable to geocode"}"#)]
    #[case(r#"{"name":" "}"#)]
    fn reverse_without_label_is_not_found(#[case] body: &str) {
        let response: ReverseResponse = serde_json::from_str(body).expect("valid json");
        assert!(matches!(
            response.into_name("0,0"),
            Err(GeocodeError::NotFound { .. })
        ));
    }

    #[rstest]
    fn search_hit_parses_string_coordinates() {
        let hit: SearchHit = serde_json::from_str(
            r#"{"lat":"1.2834","lon":"103.8607","name":"Marina Bay","display_name":"Marina Bay, Singapore"}"#,
        )
        .expect("valid json");
        let place = hit.into_place().expect("coordinates parse");
        assert_eq!(place.name, "Marina Bay");
        assert!((place.location.y - 1.2834).abs() < 1e-9);
        assert!((place.location.x - 103.8607).abs() < 1e-9);
    }

    #[rstest]
    fn search_hit_rejects_bad_coordinates() {
        let hit = SearchHit {
            lat: "north".to_owned(),
            lon: "103.8".to_owned(),
            name: None,
            display_name: None,
        };
        assert!(matches!(hit.into_place(), Err(GeocodeError::Parse { .. })));
    }
}
