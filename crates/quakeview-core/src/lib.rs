pub mod app_config;
pub mod attribution;
pub mod config;
pub mod event;
pub mod format;
pub mod origin;
pub mod summary;

pub use app_config::{AppConfig, Environment};
pub use attribution::{load_contributors, Contributor, Contributors};
pub use config::{load_app_config, load_app_config_from_env, ConfigError, DEFAULT_GEOCODE_URL};
pub use event::{EventDetails, EventError, Product, ProductCollection, ProductContent};
pub use format::Formatter;
pub use origin::{preferred_origin, reconcile_origin, reconcile_origin_value};
pub use summary::{summarize, translate_mmi, ProductSummary, SUMMARY_TYPES};
