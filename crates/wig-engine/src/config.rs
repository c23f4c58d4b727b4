//! Engine configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;
use wig_db::DbConfig;

/// Development-only signing secret used when `WIG_JWT_SECRET` is unset.
pub const DEV_JWT_SECRET: &str = "wig-dev-secret-change-in-production";

/// Default UPCitemdb lookup endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://api.upcitemdb.com/prod/trial/lookup";

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Catalog lookup endpoint (barcode passed as `?upc=`)
    pub catalog_url: String,

    /// Catalog request timeout in seconds
    pub catalog_timeout_secs: u64,

    /// HS256 secret owner tokens are signed with
    pub jwt_secret: String,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = EngineConfig {
            db_path: lookup("WIG_DB_PATH")
                .unwrap_or_else(|| "./wig.db".to_string())
                .into(),

            db_max_connections: lookup("WIG_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("WIG_DB_MAX_CONNECTIONS".to_string()))?,

            catalog_url: lookup("WIG_CATALOG_URL")
                .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),

            catalog_timeout_secs: lookup("WIG_CATALOG_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("WIG_CATALOG_TIMEOUT_SECS".to_string()))?,

            jwt_secret: lookup("WIG_JWT_SECRET").unwrap_or_else(|| {
                warn!("WIG_JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("WIG_DB_MAX_CONNECTIONS".to_string()));
        }

        if config.jwt_secret.is_empty() {
            return Err(ConfigError::MissingRequired("WIG_JWT_SECRET".to_string()));
        }

        Ok(config)
    }

    /// Store settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.db_path.clone()).max_connections(self.db_max_connections)
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog_timeout_secs)
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
