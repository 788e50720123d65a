mod admin_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod ui_config;

#[cfg(test)]
mod tests;

pub use admin_config::AdminConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use ui_config::UiConfig;

const CONFIG_DIR_ENV: &str = "MT_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".mt";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_DATABASE_FILENAME: &str = "data.db";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;

pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 3000;
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 5_000;
pub const MAX_NOTIFICATION_TIMEOUT_MS: u64 = 60_000;
