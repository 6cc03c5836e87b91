use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

pub const DEFAULT_GEOCODE_URL: &str =
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/find";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read contributors file {path}: {source}")]
    ContributorsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse contributors file: {0}")]
    ContributorsFileParse(#[source] serde_yaml::Error),

    #[error("contributors validation failed: {0}")]
    Validation(String),
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("QUAKEVIEW_ENV", "development"))?;
    let log_level = or_default("QUAKEVIEW_LOG_LEVEL", "info");

    let geocode_url = or_default("QUAKEVIEW_GEOCODE_URL", DEFAULT_GEOCODE_URL);
    if !(geocode_url.starts_with("http://") || geocode_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "QUAKEVIEW_GEOCODE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{geocode_url}'"),
        });
    }

    let geocode_timeout_secs = parse_u64("QUAKEVIEW_GEOCODE_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("QUAKEVIEW_USER_AGENT", "quakeview/0.1 (event-pages)");
    let flicker_timeout_ms = parse_u64("QUAKEVIEW_FLICKER_TIMEOUT_MS", "500")?;
    let contributors_path = lookup("QUAKEVIEW_CONTRIBUTORS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        geocode_url,
        geocode_timeout_secs,
        user_agent,
        flicker_timeout_ms,
        contributors_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "QUAKEVIEW_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
