//! Location service: geocode free text or locate the device, and publish the
//! outcome through replay-latest signals.
//!
//! Each request kind has its own busy flag. A flag is raised synchronously
//! when a request is issued and lowered by a detached timer once the request
//! settles. Timers are never cancelled, so a timer left over from an earlier
//! request can lower the flag while a newer request of the same kind is still
//! in flight. Results arriving while the flag is down are dropped.
//!
//! Requests run on the ambient tokio runtime; calling [`LocationService::geocode`]
//! or [`LocationService::geolocate`] outside one panics.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use quakeview_core::Formatter;

use crate::provider::{Geocoder, PositionProvider};
use crate::signal::BehaviorSignal;
use crate::types::{
    GeocodeCandidate, GeocodeResponse, Location, LocationError, Position, PositionError,
    Resolution,
};

/// Minimum time a busy indicator stays up after a request settles.
pub const DEFAULT_FLICKER_TIMEOUT: Duration = Duration::from_millis(500);

const MSG_GEOCODE_FAILED: &str = "Geocoding failed";
const MSG_NO_LOCATION: &str = "No location found";
const MSG_NOT_SUPPORTED: &str = "Geolocation not supported";

struct Inner {
    geocoder: Arc<dyn Geocoder>,
    positions: Arc<dyn PositionProvider>,
    formatter: Formatter,
    flicker_timeout: Duration,
    error: BehaviorSignal<Option<LocationError>>,
    geocoding: BehaviorSignal<bool>,
    geolocating: BehaviorSignal<bool>,
    location: BehaviorSignal<Option<Location>>,
}

#[derive(Clone)]
pub struct LocationService {
    inner: Arc<Inner>,
}

impl LocationService {
    #[must_use]
    pub fn new(geocoder: Arc<dyn Geocoder>, positions: Arc<dyn PositionProvider>) -> Self {
        Self::with_options(geocoder, positions, Formatter::default(), DEFAULT_FLICKER_TIMEOUT)
    }

    #[must_use]
    pub fn with_options(
        geocoder: Arc<dyn Geocoder>,
        positions: Arc<dyn PositionProvider>,
        formatter: Formatter,
        flicker_timeout: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                geocoder,
                positions,
                formatter,
                flicker_timeout,
                error: BehaviorSignal::new(None),
                geocoding: BehaviorSignal::new(false),
                geolocating: BehaviorSignal::new(false),
                location: BehaviorSignal::new(None),
            }),
        }
    }

    /// Most recent failure, `None` until the first one.
    #[must_use]
    pub fn error(&self) -> &BehaviorSignal<Option<LocationError>> {
        &self.inner.error
    }

    #[must_use]
    pub fn geocoding_in_progress(&self) -> &BehaviorSignal<bool> {
        &self.inner.geocoding
    }

    #[must_use]
    pub fn geolocating_in_progress(&self) -> &BehaviorSignal<bool> {
        &self.inner.geolocating
    }

    /// Most recent resolved location, `None` until the first one.
    #[must_use]
    pub fn location(&self) -> &BehaviorSignal<Option<Location>> {
        &self.inner.location
    }

    #[must_use]
    pub fn flicker_timeout(&self) -> Duration {
        self.inner.flicker_timeout
    }

    /// Start resolving `query` to a location.
    ///
    /// An empty or absent query does nothing and returns `None`. Otherwise the
    /// geocoding flag is raised before this returns, and the handle resolves
    /// once the response has been applied. Dropping the handle does not stop
    /// the request.
    pub fn geocode(&self, query: Option<&str>) -> Option<JoinHandle<()>> {
        let query = match query {
            Some(q) if !q.is_empty() => q.to_string(),
            _ => return None,
        };

        tracing::debug!(%query, "geocode issued");
        self.inner.geocoding.publish(true);

        let inner = Arc::clone(&self.inner);
        Some(tokio::spawn(async move {
            let response = match inner.geocoder.geocode(&query).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(error = %e, %query, "geocode request failed");
                    GeocodeResponse::default()
                }
            };
            inner.on_geocode_response(response);
        }))
    }

    /// Start locating the device.
    ///
    /// When the device has no position capability the error signal is set
    /// immediately, the geolocating flag is left alone, and `None` is
    /// returned.
    pub fn geolocate(&self) -> Option<JoinHandle<()>> {
        let request = match self.inner.positions.current_position() {
            Ok(request) => request,
            Err(_) => {
                tracing::debug!("geolocation unsupported");
                self.inner
                    .error
                    .publish(Some(LocationError::local(MSG_NOT_SUPPORTED)));
                return None;
            }
        };

        tracing::debug!("geolocate issued");
        self.inner.geolocating.publish(true);

        let inner = Arc::clone(&self.inner);
        Some(tokio::spawn(async move {
            match request.await {
                Ok(position) => inner.on_geolocate_success(position),
                Err(e) => inner.on_geolocate_error(&e),
            }
        }))
    }
}

impl Inner {
    fn on_geocode_response(&self, response: GeocodeResponse) {
        match response.locations {
            Some(mut locations) if !locations.is_empty() => {
                self.on_geocode_success(locations.swap_remove(0));
            }
            Some(_) => self.on_geocode_error(MSG_NO_LOCATION),
            None => self.on_geocode_error(MSG_GEOCODE_FAILED),
        }
    }

    fn on_geocode_success(&self, candidate: GeocodeCandidate) {
        if !self.geocoding.get() {
            tracing::debug!(name = %candidate.name, "dropping stale geocode result");
            return;
        }
        let location = Resolution::Geocoded(candidate).into_location(&self.formatter);
        self.location.publish(Some(location));
        clear_after(&self.geocoding, Duration::ZERO);
    }

    fn on_geocode_error(&self, message: &str) {
        self.error.publish(Some(LocationError::local(message)));
        clear_after(&self.geocoding, self.flicker_timeout);
    }

    fn on_geolocate_success(&self, position: Position) {
        if !self.geolocating.get() {
            tracing::debug!("dropping stale geolocation result");
            return;
        }
        let location = Resolution::Geolocated(position).into_location(&self.formatter);
        self.location.publish(Some(location));
        clear_after(&self.geolocating, self.flicker_timeout);
    }

    fn on_geolocate_error(&self, error: &PositionError) {
        tracing::debug!(code = error.code, message = %error.message, "geolocation failed");
        self.error.publish(Some(LocationError {
            code: error.code,
            message: position_error_message(error.code).to_string(),
        }));
        clear_after(&self.geolocating, self.flicker_timeout);
    }
}

/// User-facing message for a device provider error code.
#[must_use]
pub fn position_error_message(code: i32) -> &'static str {
    match code {
        PositionError::PERMISSION_DENIED => "Geolocation permission denied",
        PositionError::POSITION_UNAVAILABLE => "Geolocation not currently available",
        PositionError::TIMEOUT => "Geolocation taking too long to complete",
        _ => "An unknown error occurred during geolocation",
    }
}

/// Lower `flag` after `delay` on a detached task.
fn clear_after(flag: &BehaviorSignal<bool>, delay: Duration) {
    let flag = flag.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        flag.publish(false);
    });
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
