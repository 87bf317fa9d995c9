//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates. Variables carry the `OMISE` prefix and nested values use
//! double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use omise::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod api;
mod error;
mod log;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use log::{LogConfig, LogFormat};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// API credentials and endpoint
    pub api: ApiConfig,

    /// Logging output
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `OMISE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `OMISE__API__SECRET_KEY=skey_test_...` -> `api.secret_key`
    /// - `OMISE__LOG__FORMAT=json` -> `log.format`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("OMISE").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration and validate it in one step
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` when loading fails and
    /// `ConfigError::ValidationFailed` when a value is invalid.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.log.validate()?;
        Ok(())
    }
}
