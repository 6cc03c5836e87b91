//! Provider response shapes and the unified location model.
//!
//! Geocoding results follow the ArcGIS `find` response:
//! `{ "locations": [ { "name", "extent", "feature": { "attributes", "geometry" } } ], "spatialReference" }`.
//! Device positions follow the browser geolocation `Position` /
//! `PositionError` shapes. Both are converted into [`Location`] at the service
//! boundary and never leak further.

use serde::{Deserialize, Serialize};

use quakeview_core::Formatter;

use crate::precision::{geocode_precision, geolocation_precision};

// ---------------------------------------------------------------------------
// Geocoding provider
// ---------------------------------------------------------------------------

/// Top-level geocoding response.
///
/// `locations` is `None` when the provider omitted it (or the request failed
/// and a placeholder response was substituted) and `Some(vec![])` when the
/// provider answered with no match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub locations: Option<Vec<GeocodeCandidate>>,
    #[serde(rename = "spatialReference", default)]
    pub spatial_reference: Option<SpatialReference>,
}

/// One ranked match; the provider returns best match first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    pub name: String,
    #[serde(default)]
    pub extent: Option<Extent>,
    pub feature: GeocodeFeature,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeFeature {
    pub attributes: GeocodeAttributes,
    pub geometry: PointGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeAttributes {
    /// Match confidence, 0–100.
    #[serde(rename = "Score")]
    pub score: f64,
    #[serde(rename = "Addr_Type", default)]
    pub addr_type: Option<String>,
}

/// `x` is longitude, `y` is latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialReference {
    #[serde(default)]
    pub wkid: Option<i64>,
    #[serde(rename = "latestWkid", default)]
    pub latest_wkid: Option<i64>,
}

// ---------------------------------------------------------------------------
// Device position provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius of the 95% confidence circle, in meters.
    pub accuracy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub coords: Coordinates,
}

impl Position {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            coords: Coordinates {
                latitude,
                longitude,
                accuracy,
            },
        }
    }
}

/// Failure reported by the device position provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionError {
    pub code: i32,
    pub message: String,
}

impl PositionError {
    pub const PERMISSION_DENIED: i32 = 1;
    pub const POSITION_UNAVAILABLE: i32 = 2;
    pub const TIMEOUT: i32 = 3;

    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Unified model
// ---------------------------------------------------------------------------

/// A resolved location, whatever produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A failed resolution. `code` is `-1` for locally detected conditions,
/// otherwise the device provider's error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationError {
    pub code: i32,
    pub message: String,
}

impl LocationError {
    pub const LOCAL: i32 = -1;

    #[must_use]
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            code: Self::LOCAL,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// A successful provider result before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Geocoded(GeocodeCandidate),
    Geolocated(Position),
}

impl Resolution {
    /// Normalize into a [`Location`], rounding coordinates to the precision
    /// the provider's confidence supports.
    ///
    /// Geocoded addresses are the provider's display name; device positions
    /// get a formatted coordinate string as their address.
    #[must_use]
    pub fn into_location(self, formatter: &Formatter) -> Location {
        match self {
            Resolution::Geocoded(candidate) => {
                let precision = geocode_precision(candidate.feature.attributes.score);
                Location {
                    latitude: Formatter::round(candidate.feature.geometry.y, precision),
                    longitude: Formatter::round(candidate.feature.geometry.x, precision),
                    address: candidate.name,
                }
            }
            Resolution::Geolocated(position) => {
                let precision = geolocation_precision(position.coords.accuracy);
                let latitude = Formatter::round(position.coords.latitude, precision);
                let longitude = Formatter::round(position.coords.longitude, precision);
                Location {
                    address: formatter.location(latitude, longitude, precision),
                    latitude,
                    longitude,
                }
            }
        }
    }
}
