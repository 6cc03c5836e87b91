//! Seams between the location service and its two data sources.

use futures::future::{self, BoxFuture};

use crate::error::{GeoError, GeolocationUnsupported};
use crate::types::{GeocodeResponse, Position, PositionError};

/// Resolves free text to ranked candidate locations over the network.
pub trait Geocoder: Send + Sync {
    fn geocode<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<GeocodeResponse, GeoError>>;
}

/// Pending device position request.
pub type PositionRequest = BoxFuture<'static, Result<Position, PositionError>>;

/// Reports the device's current position.
///
/// Capability is checked synchronously: a device without any position
/// support returns `Err(GeolocationUnsupported)` before anything is started.
pub trait PositionProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns [`GeolocationUnsupported`] when the device has no position
    /// capability.
    fn current_position(&self) -> Result<PositionRequest, GeolocationUnsupported>;
}

/// A provider that always reports the same fix. Used by the command line and
/// for hosts whose position is configured rather than sensed.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Position);

impl PositionProvider for FixedPosition {
    fn current_position(&self) -> Result<PositionRequest, GeolocationUnsupported> {
        Ok(Box::pin(future::ready(Ok(self.0))))
    }
}

/// A provider for hosts with no position capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPositionSupport;

impl PositionProvider for NoPositionSupport {
    fn current_position(&self) -> Result<PositionRequest, GeolocationUnsupported> {
        Err(GeolocationUnsupported)
    }
}
