//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `LOTTERY_LIVE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use lottery_live::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod database;
mod error;
mod live;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use live::LiveConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Every section has defaults, so an empty environment is a valid
/// development setup with in-memory history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL archive); absent means in-memory
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Live streaming and archival configuration
    #[serde(default)]
    pub live: LiveConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LOTTERY_LIVE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `LOTTERY_LIVE__SERVER__PORT=4545` -> `server.port = 4545`
    /// - `LOTTERY_LIVE__DATABASE__URL=...` -> `database.url = ...`
    /// - `LOTTERY_LIVE__LIVE__MAILBOX_CAPACITY=32` -> `live.mailbox_capacity = 32`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LOTTERY_LIVE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.live.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "LOTTERY_LIVE__DATABASE__URL",
        "LOTTERY_LIVE__SERVER__PORT",
        "LOTTERY_LIVE__SERVER__ENVIRONMENT",
        "LOTTERY_LIVE__SERVER__LOG_FORMAT",
        "LOTTERY_LIVE__LIVE__MAILBOX_CAPACITY",
        "LOTTERY_LIVE__LIVE__ARCHIVE_WINDOW_START",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(config.database.is_none());
        assert_eq!(config.server.port, 4545);
        assert_eq!(config.live.mailbox_capacity, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_section_is_loaded() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("LOTTERY_LIVE__DATABASE__URL", "postgresql://test@localhost/test");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        let database = config.database.unwrap();
        assert_eq!(database.url, "postgresql://test@localhost/test");
        assert!(database.run_migrations);
    }

    #[test]
    fn test_environment_is_loaded() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("LOTTERY_LIVE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.environment, Environment::Production);
    }

    #[test]
    fn test_custom_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("LOTTERY_LIVE__SERVER__PORT", "3000");
        env::set_var("LOTTERY_LIVE__SERVER__LOG_FORMAT", "json");
        env::set_var("LOTTERY_LIVE__LIVE__MAILBOX_CAPACITY", "32");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.live.mailbox_capacity, 32);
    }

    #[test]
    fn test_invalid_window_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("LOTTERY_LIVE__LIVE__ARCHIVE_WINDOW_START", "25:00");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_database_url_fails_validation() {
        let config = AppConfig {
            database: Some(DatabaseConfig::with_url("mysql://localhost/test")),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
