//! Coordinate precision derived from provider confidence.
//!
//! A coordinate is never shown with more decimals than its source can
//! support: a city-level geocode match or a cell-tower fix rounded to five
//! decimals would suggest meter-level accuracy that isn't there.

/// Decimal places for a geocode match, from its 0–100 score.
#[must_use]
pub fn geocode_precision(score: f64) -> u32 {
    if score >= 90.0 {
        5
    } else if score >= 80.0 {
        4
    } else if score >= 70.0 {
        3
    } else if score >= 60.0 {
        2
    } else if score >= 50.0 {
        1
    } else {
        0
    }
}

/// Decimal places for a device fix, from its accuracy radius in meters.
#[must_use]
pub fn geolocation_precision(accuracy_m: f64) -> u32 {
    if accuracy_m > 100_000.0 {
        1
    } else if accuracy_m > 10_000.0 {
        2
    } else if accuracy_m > 1_000.0 {
        3
    } else if accuracy_m > 100.0 {
        4
    } else {
        5
    }
}
