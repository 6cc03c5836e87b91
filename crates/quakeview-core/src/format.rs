//! Display formatting for numbers, coordinates, depths and times.
//!
//! Every formatter returns the configured `empty` token for missing values so
//! callers can render a field without branching on presence.

use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_EMPTY: &str = "–";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    pub empty: String,
    pub depth_decimals: u32,
    pub location_decimals: u32,
    pub magnitude_decimals: u32,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            empty: DEFAULT_EMPTY.to_string(),
            depth_decimals: 1,
            location_decimals: 3,
            magnitude_decimals: 1,
        }
    }
}

impl Formatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Round half-up to `decimals` places.
    ///
    /// Halves round toward positive infinity (`-2.5` becomes `-2`), and a
    /// negative zero result is normalized to `0.0`.
    #[must_use]
    pub fn round(value: f64, decimals: u32) -> f64 {
        let exponent = i32::try_from(decimals.min(15)).unwrap_or(15);
        let factor = 10f64.powi(exponent);
        let rounded = (value * factor + 0.5).floor() / factor;
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }

    /// Format a number with fixed `decimals` places and optional units.
    ///
    /// `None` and `NaN` render as `empty`. Without `decimals` the value is
    /// rendered unrounded.
    #[must_use]
    pub fn number(&self, value: Option<f64>, decimals: Option<u32>, empty: &str, units: &str) -> String {
        let Some(value) = value.filter(|v| !v.is_nan()) else {
            return empty.to_string();
        };

        let mut result = match decimals {
            Some(decimals) => format!("{:.*}", decimals as usize, Self::round(value, decimals)),
            None => format!("{value}"),
        };

        if !units.is_empty() {
            result.push(' ');
            result.push_str(units);
        }
        result
    }

    #[must_use]
    pub fn latitude(&self, latitude: Option<f64>, decimals: u32) -> String {
        let Some(latitude) = latitude else {
            return self.empty.clone();
        };
        let hemisphere = if latitude >= 0.0 { 'N' } else { 'S' };
        let value = self.number(Some(latitude.abs()), Some(decimals), &self.empty, "");
        format!("{value}°{hemisphere}")
    }

    #[must_use]
    pub fn longitude(&self, longitude: Option<f64>, decimals: u32) -> String {
        let Some(longitude) = longitude else {
            return self.empty.clone();
        };
        let hemisphere = if longitude >= 0.0 { 'E' } else { 'W' };
        let value = self.number(Some(longitude.abs()), Some(decimals), &self.empty, "");
        format!("{value}°{hemisphere}")
    }

    /// `"38.123°N 120.123°W"`.
    #[must_use]
    pub fn location(&self, latitude: f64, longitude: f64, decimals: u32) -> String {
        format!(
            "{} {}",
            self.latitude(Some(latitude), decimals),
            self.longitude(Some(longitude), decimals)
        )
    }

    #[must_use]
    pub fn magnitude(&self, magnitude: Option<f64>) -> String {
        self.number(magnitude, Some(self.magnitude_decimals), &self.empty, "")
    }

    /// Depth with optional units and uncertainty, e.g. `"10.5 km ± 1.2"`.
    #[must_use]
    pub fn depth(&self, depth: Option<f64>, units: &str, precision: Option<u32>, error: Option<f64>) -> String {
        let precision = precision.unwrap_or(self.depth_decimals);
        let number = self.number(depth, Some(precision), &self.empty, units);
        let uncertainty = self.uncertainty(error, Some(precision), "", "");
        if uncertainty.is_empty() {
            number
        } else {
            format!("{number} {uncertainty}")
        }
    }

    #[must_use]
    pub fn uncertainty(&self, error: Option<f64>, decimals: Option<u32>, empty: &str, units: &str) -> String {
        match error.filter(|e| !e.is_nan()) {
            Some(error) => format!("± {}", self.number(Some(error), decimals, "", units)),
            None => empty.to_string(),
        }
    }

    /// `YYYY-MM-DD` in UTC.
    #[must_use]
    pub fn date(&self, date: Option<DateTime<Utc>>) -> String {
        date.map_or_else(|| self.empty.clone(), |d| d.format("%Y-%m-%d").to_string())
    }

    /// `HH:MM:SS`, or `HH:MM:SS.mmm` when `include_millis`.
    #[must_use]
    pub fn time(&self, date: Option<DateTime<Utc>>, include_millis: bool) -> String {
        let Some(date) = date else {
            return self.empty.clone();
        };
        if include_millis {
            date.format("%H:%M:%S%.3f").to_string()
        } else {
            date.format("%H:%M:%S").to_string()
        }
    }

    /// `"2023-11-14 22:13:20 (UTC)"`, shifted by `minutes_offset` with the
    /// offset shown in the suffix, e.g. `"(UTC-08:00)"`.
    #[must_use]
    pub fn date_time(&self, date: Option<DateTime<Utc>>, minutes_offset: i32, include_millis: bool) -> String {
        let Some(date) = date else {
            return self.empty.clone();
        };
        let shifted = date + Duration::minutes(i64::from(minutes_offset));
        format!(
            "{} {} (UTC{})",
            self.date(Some(shifted)),
            self.time(Some(shifted), include_millis),
            Self::timezone_offset(minutes_offset)
        )
    }

    /// `""` for UTC, otherwise `"+HH:MM"` / `"-HH:MM"`.
    #[must_use]
    pub fn timezone_offset(offset_minutes: i32) -> String {
        if offset_minutes == 0 {
            return String::new();
        }
        let sign = if offset_minutes < 0 { '-' } else { '+' };
        let offset = offset_minutes.unsigned_abs();
        format!("{sign}{:02}:{:02}", offset / 60, offset % 60)
    }
}

/// Convert epoch milliseconds from the feed into a UTC timestamp.
#[must_use]
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt() -> Formatter {
        Formatter::default()
    }

    #[test]
    fn round_is_half_up() {
        assert_eq!(Formatter::round(38.123_456, 5), 38.123_46);
        assert_eq!(Formatter::round(-120.123_456, 5), -120.123_46);
        assert_eq!(Formatter::round(2.5, 0), 3.0);
        assert_eq!(Formatter::round(-2.5, 0), -2.0);
        assert_eq!(Formatter::round(1.25, 1), 1.3);
    }

    #[test]
    fn round_normalizes_negative_zero() {
        let rounded = Formatter::round(-0.000_01, 2);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());
    }

    #[test]
    fn number_pads_to_fixed_width() {
        assert_eq!(fmt().number(Some(10.0), Some(2), "-", ""), "10.00");
        assert_eq!(fmt().number(Some(0.0), Some(1), "-", "km"), "0.0 km");
        assert_eq!(fmt().number(Some(-0.001), Some(1), "-", ""), "0.0");
    }

    #[test]
    fn number_without_decimals_is_unrounded() {
        assert_eq!(fmt().number(Some(10.5), None, "-", ""), "10.5");
        assert_eq!(fmt().number(Some(7.0), None, "-", "km"), "7 km");
    }

    #[test]
    fn number_uses_empty_token_for_missing_values() {
        assert_eq!(fmt().number(None, Some(2), "n/a", "km"), "n/a");
        assert_eq!(fmt().number(Some(f64::NAN), Some(2), "n/a", ""), "n/a");
    }

    #[test]
    fn latitude_and_longitude_carry_hemisphere() {
        assert_eq!(fmt().latitude(Some(38.123_456), 3), "38.123°N");
        assert_eq!(fmt().latitude(Some(-12.5), 1), "12.5°S");
        assert_eq!(fmt().longitude(Some(-120.123_456), 2), "120.12°W");
        assert_eq!(fmt().longitude(Some(0.0), 0), "0°E");
        assert_eq!(fmt().latitude(None, 3), DEFAULT_EMPTY);
    }

    #[test]
    fn location_uses_same_precision_for_both_axes() {
        assert_eq!(
            fmt().location(38.123_46, -120.123_46, 5),
            "38.12346°N 120.12346°W"
        );
    }

    #[test]
    fn depth_includes_uncertainty_when_present() {
        assert_eq!(fmt().depth(Some(10.46), "km", None, None), "10.5 km");
        assert_eq!(fmt().depth(Some(10.46), "km", Some(2), Some(1.234)), "10.46 km ± 1.23");
        assert_eq!(fmt().depth(None, "km", None, None), DEFAULT_EMPTY);
    }

    #[test]
    fn magnitude_has_one_decimal() {
        assert_eq!(fmt().magnitude(Some(6.14)), "6.1");
        assert_eq!(fmt().magnitude(None), DEFAULT_EMPTY);
    }

    #[test]
    fn date_and_time_formatting() {
        let stamp = from_epoch_millis(1_700_000_000_123);
        assert_eq!(fmt().date(stamp), "2023-11-14");
        assert_eq!(fmt().time(stamp, false), "22:13:20");
        assert_eq!(fmt().time(stamp, true), "22:13:20.123");
        assert_eq!(fmt().date(None), DEFAULT_EMPTY);
    }

    #[test]
    fn date_time_applies_offset() {
        let stamp = from_epoch_millis(1_700_000_000_000);
        assert_eq!(fmt().date_time(stamp, 0, false), "2023-11-14 22:13:20 (UTC)");
        assert_eq!(
            fmt().date_time(stamp, -480, false),
            "2023-11-14 14:13:20 (UTC-08:00)"
        );
        assert_eq!(
            fmt().date_time(stamp, 330, false),
            "2023-11-15 03:43:20 (UTC+05:30)"
        );
    }

    #[test]
    fn timezone_offset_formats_sign_and_padding() {
        assert_eq!(Formatter::timezone_offset(0), "");
        assert_eq!(Formatter::timezone_offset(60), "+01:00");
        assert_eq!(Formatter::timezone_offset(-570), "-09:30");
    }
}
