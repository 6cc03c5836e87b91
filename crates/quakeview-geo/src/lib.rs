//! Location lookup for event pages: free-text geocoding over HTTP, device
//! geolocation, and a service that reports both through observable signals.

pub mod client;
pub mod error;
pub mod precision;
pub mod provider;
pub mod service;
pub mod signal;
pub mod types;

pub use client::GeocodeClient;
pub use error::{GeoError, GeolocationUnsupported};
pub use precision::{geocode_precision, geolocation_precision};
pub use provider::{FixedPosition, Geocoder, NoPositionSupport, PositionProvider, PositionRequest};
pub use service::{position_error_message, LocationService, DEFAULT_FLICKER_TIMEOUT};
pub use signal::{BehaviorSignal, Subscription};
pub use types::{
    Coordinates, GeocodeCandidate, GeocodeResponse, Location, LocationError, Position,
    PositionError, Resolution,
};
