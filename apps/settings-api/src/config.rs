//! Settings API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. `main` loads a local `.env` first through dotenvy.

use bountip_core::validation::validate_currency;
use bountip_core::DEFAULT_CURRENCY;
use bountip_db::DbConfig;
use std::env;

/// Settings API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind (`BIND_ADDRESS`)
    pub bind_address: String,

    /// HTTP port (`PORT`)
    pub port: u16,

    /// SQLite database file (`DATABASE_PATH`)
    pub database_path: String,

    /// Pool size (`DB_MAX_CONNECTIONS`)
    pub db_max_connections: u32,

    /// Currency for outlets created without one (`DEFAULT_CURRENCY`)
    pub default_currency: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            database_path: "./bountip.db".to_string(),
            db_max_connections: 5,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let config = AppConfig {
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),

            port: match lookup("PORT") {
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,
                None => defaults.port,
            },

            database_path: lookup("DATABASE_PATH").unwrap_or(defaults.database_path),

            db_max_connections: match lookup("DB_MAX_CONNECTIONS") {
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,
                None => defaults.db_max_connections,
            },

            default_currency: match lookup("DEFAULT_CURRENCY") {
                Some(value) => validate_currency(&value)
                    .map_err(|_| ConfigError::InvalidValue("DEFAULT_CURRENCY".to_string()))?,
                None => defaults.default_currency,
            },
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        if config.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("DATABASE_PATH".to_string()));
        }

        Ok(config)
    }

    /// `host:port` to bind the HTTP server to.
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
