use thiserror::Error;

/// Errors returned by the geocoding client.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Network or TLS failure, or a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid geocode URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// The device has no position capability at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("geolocation not supported")]
pub struct GeolocationUnsupported;
