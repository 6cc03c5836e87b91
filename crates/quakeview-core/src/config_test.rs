use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "QUAKEVIEW_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.geocode_url, DEFAULT_GEOCODE_URL);
    assert_eq!(cfg.geocode_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "quakeview/0.1 (event-pages)");
    assert_eq!(cfg.flicker_timeout_ms, 500);
    assert!(cfg.contributors_path.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("QUAKEVIEW_ENV", "production");
    map.insert("QUAKEVIEW_LOG_LEVEL", "debug");
    map.insert("QUAKEVIEW_GEOCODE_URL", "http://localhost:9000/find");
    map.insert("QUAKEVIEW_GEOCODE_TIMEOUT_SECS", "5");
    map.insert("QUAKEVIEW_USER_AGENT", "custom-agent/2.0");
    map.insert("QUAKEVIEW_FLICKER_TIMEOUT_MS", "250");
    map.insert("QUAKEVIEW_CONTRIBUTORS_PATH", "./config/contributors.yaml");

    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.geocode_url, "http://localhost:9000/find");
    assert_eq!(cfg.geocode_timeout_secs, 5);
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(cfg.flicker_timeout_ms, 250);
    assert_eq!(
        cfg.contributors_path.as_deref(),
        Some(std::path::Path::new("./config/contributors.yaml"))
    );
}

#[test]
fn build_app_config_rejects_non_http_geocode_url() {
    let mut map = HashMap::new();
    map.insert("QUAKEVIEW_GEOCODE_URL", "ftp://example.org/find");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "QUAKEVIEW_GEOCODE_URL"),
        "expected InvalidEnvVar(QUAKEVIEW_GEOCODE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("QUAKEVIEW_GEOCODE_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "QUAKEVIEW_GEOCODE_TIMEOUT_SECS"),
        "expected InvalidEnvVar(QUAKEVIEW_GEOCODE_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_flicker_timeout() {
    let mut map = HashMap::new();
    map.insert("QUAKEVIEW_FLICKER_TIMEOUT_MS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "QUAKEVIEW_FLICKER_TIMEOUT_MS"),
        "expected InvalidEnvVar(QUAKEVIEW_FLICKER_TIMEOUT_MS), got: {result:?}"
    );
}

#[test]
fn blank_contributors_path_is_ignored() {
    let mut map = HashMap::new();
    map.insert("QUAKEVIEW_CONTRIBUTORS_PATH", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.contributors_path.is_none());
}

#[test]
fn environment_display() {
    assert_eq!(Environment::Development.to_string(), "development");
    assert_eq!(Environment::Test.to_string(), "test");
    assert_eq!(Environment::Production.to_string(), "production");
}
