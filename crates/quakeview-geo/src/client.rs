//! HTTP client for the ArcGIS World geocoding `find` endpoint.
//!
//! Requests are `GET {base}?f=json&text={query}` with the query
//! percent-encoded. The response is returned as delivered; choosing a match
//! and handling "no match" is the service's job.

use std::time::Duration;

use futures::future::BoxFuture;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Url};

use quakeview_core::DEFAULT_GEOCODE_URL;

use crate::error::GeoError;
use crate::provider::Geocoder;
use crate::types::GeocodeResponse;

/// Client for the geocoding REST endpoint.
///
/// Use [`GeocodeClient::new`] for production or
/// [`GeocodeClient::with_base_url`] to point at a mock server in tests.
pub struct GeocodeClient {
    client: Client,
    base_url: Url,
}

impl GeocodeClient {
    /// Creates a client pointed at the production geocoder.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GeoError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_GEOCODE_URL)
    }

    /// Creates a client with a custom `find` endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`GeoError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(base_url).map_err(|e| GeoError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(GeoError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Looks up `query` and returns the provider's ranked matches.
    ///
    /// # Errors
    ///
    /// - [`GeoError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GeoError::Deserialize`] if the body does not match the expected
    ///   shape.
    pub async fn find(&self, query: &str) -> Result<GeocodeResponse, GeoError> {
        let url = self.build_url(query);
        tracing::debug!(%url, "geocode request");

        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeoError::Deserialize {
            context: format!("find(text={query})"),
            source: e,
        })
    }

    /// Builds the request URL. Any query string already on the base URL is
    /// replaced.
    fn build_url(&self, query: &str) -> String {
        let mut base = self.base_url.clone();
        base.set_query(None);
        base.set_fragment(None);
        format!(
            "{}?f=json&text={}",
            base.as_str().trim_end_matches('/'),
            utf8_percent_encode(query, NON_ALPHANUMERIC)
        )
    }
}

impl Geocoder for GeocodeClient {
    fn geocode<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<GeocodeResponse, GeoError>> {
        Box::pin(self.find(query))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
