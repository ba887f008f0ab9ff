//! HTTP [`Geocoder`] backed by Nominatim's `jsonv2` API.

use std::time::Duration;

use async_trait::async_trait;
use geo::Coord;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::wire::{ReverseResponse, SearchHit};
use super::{GeocodeError, Geocoder, GeocoderBuildError, Place};

/// Default user agent for Nominatim requests.
///
/// The public Nominatim instance rejects requests without an identifying
/// agent.
pub const DEFAULT_USER_AGENT: &str = "shiftplan-geocoding/0.1";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SEARCH_LIMIT: u8 = 5;

/// Configuration for [`NominatimGeocoder`].
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Service root, e.g. `"https://nominatim.openstreetmap.org"`.
    pub base_url: String,
    /// Connect and total request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Maximum number of search results requested.
    pub search_limit: u8,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl NominatimConfig {
    /// Configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the search result limit; zero is raised to one.
    #[must_use]
    pub fn with_search_limit(mut self, limit: u8) -> Self {
        self.search_limit = limit.max(1);
        self
    }
}

/// Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    config: NominatimConfig,
}

impl NominatimGeocoder {
    /// Client for `base_url` with default settings.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GeocoderBuildError> {
        Self::with_config(NominatimConfig::new(base_url))
    }

    /// Client with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(mut config: NominatimConfig) -> Result<Self, GeocoderBuildError> {
        let trimmed = config.base_url.trim().trim_end_matches('/').to_owned();
        Url::parse(&trimmed).map_err(|source| GeocoderBuildError::BaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        config.base_url = trimmed;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(GeocoderBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &NominatimConfig {
        &self.config
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, GeocodeError> {
        let base = format!("{}/{path}", self.config.base_url);
        Url::parse_with_params(&base, params).map_err(|err| GeocodeError::Network {
            url: base.clone(),
            message: err.to_string(),
        })
    }

    fn reverse_url(&self, location: Coord<f64>) -> Result<Url, GeocodeError> {
        self.endpoint(
            "reverse",
            &[
                ("format", "jsonv2".to_owned()),
                ("lat", location.y.to_string()),
                ("lon", location.x.to_string()),
            ],
        )
    }

    fn search_url(&self, query: &str) -> Result<Url, GeocodeError> {
        self.endpoint(
            "search",
            &[
                ("format", "jsonv2".to_owned()),
                ("q", query.to_owned()),
                ("limit", self.config.search_limit.to_string()),
            ],
        )
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, GeocodeError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;
        response.json().await.map_err(|err| GeocodeError::Parse {
            message: err.to_string(),
        })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> GeocodeError {
        if error.is_timeout() {
            return GeocodeError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return GeocodeError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
            };
        }
        if error.is_decode() {
            return GeocodeError::Parse {
                message: error.to_string(),
            };
        }
        GeocodeError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl Geocoder for NominatimGeocoder {
    async fn resolve_name(&self, location: Coord<f64>) -> Result<String, GeocodeError> {
        let url = self.reverse_url(location)?;
        let body: ReverseResponse = self.fetch(url).await?;
        body.into_name(&format!("{:.5},{:.5}", location.y, location.x))
    }

    async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        let url = self.search_url(query)?;
        let hits: Vec<SearchHit> = self.fetch(url).await?;
        hits.into_iter().map(SearchHit::into_place).collect()
    }
}
