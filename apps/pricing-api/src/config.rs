//! Pricing API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable             | Default      |
//! |----------------------|--------------|
//! | `PORT`               | `8000`       |
//! | `DATABASE_PATH`      | `pricing.db` |
//! | `DB_MAX_CONNECTIONS` | `5`          |
//!
//! Log filtering is read separately from `RUST_LOG` by the subscriber.

use dynprice_db::DbConfig;
use serde::{Deserialize, Serialize};
use std::env;

/// Pricing API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite database file (or `:memory:`)
    pub database_path: String,

    /// Connection pool size
    pub max_connections: u32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: lookup("DATABASE_PATH").unwrap_or_else(|| "pricing.db".to_string()),

            max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,
        };

        if config.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("DATABASE_PATH".to_string()));
        }

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.max_connections)
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.database_path, "pricing.db");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            ("PORT", "9090"),
            ("DATABASE_PATH", "/var/lib/dynprice/prices.db"),
            ("DB_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.db_config().max_connections, 12);
        assert!(!config.db_config().is_in_memory());
    }

    #[test]
    fn test_invalid_values() {
        let err = ApiConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "PORT"));

        let err = ApiConfig::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        let err = ApiConfig::from_lookup(lookup_from(&[("DATABASE_PATH", " ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));
    }
}
