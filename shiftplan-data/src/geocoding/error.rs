//! Errors raised by geocoders.

use thiserror::Error;

/// Failure of a single geocoding lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The service did not answer within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("request to {url} failed with HTTP status {status}")]
    Http {
        /// Requested URL.
        url: String,
        /// Status code returned.
        status: u16,
    },
    /// The request never completed.
    #[error("network error calling {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error text.
        message: String,
    },
    /// The response body could not be understood.
    #[error("failed to parse geocoder response: {message}")]
    Parse {
        /// Decoder error text.
        message: String,
    },
    /// The service answered but knew nothing about the query.
    #[error("no place found for {query}")]
    NotFound {
        /// Coordinates or search text that matched nothing.
        query: String,
    },
}

/// Raised when an HTTP geocoder cannot be constructed.
#[derive(Debug, Error)]
pub enum GeocoderBuildError {
    /// The base URL is not a valid absolute URL.
    #[error("invalid geocoder base URL {url:?}: {source}")]
    BaseUrl {
        /// Offending URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
