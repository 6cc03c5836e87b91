use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Geocoding `find` endpoint; queries are appended as `?f=json&text=...`.
    pub geocode_url: String,
    pub geocode_timeout_secs: u64,
    pub user_agent: String,
    /// Minimum time a busy indicator stays up after an error or a device fix.
    pub flicker_timeout_ms: u64,
    /// Contributors YAML file; `None` uses the built-in table.
    pub contributors_path: Option<PathBuf>,
}
