//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `EUNOIA` prefix
//! and nested sections use double underscores as separators, e.g.
//! `EUNOIA__STORE__DATA_DIR=/var/lib/eunoia`.

mod auth;
mod error;
mod store;

pub use auth::{AuthConfig, HashingScheme};
pub use error::{ConfigError, ValidationError};
pub use store::StoreConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Record store configuration (name, snapshot directory).
    #[serde(default)]
    pub store: StoreConfig,

    /// Authentication configuration (secret hashing scheme).
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present, then reads `EUNOIA`-prefixed
    /// variables with `__` separating nested sections. Every section has
    /// defaults, so an empty environment yields a valid in-memory
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("EUNOIA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.store.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.auth.hashing, HashingScheme::Sha256);
    }
}
