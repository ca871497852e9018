//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid cache ttl_minutes: {0}. Must be at least 1")]
    InvalidTtl(u64),

    #[error("Invalid request_timeout_secs: {0}. Must be at least 1")]
    InvalidRequestTimeout(u64),

    #[error("GitHub api_url cannot be empty")]
    EmptyApiUrl,

    #[error("Server port cannot be 0")]
    InvalidPort,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. gitfolio.yaml in the working directory
    /// 3. Environment variables (GITFOLIO_* prefix, highest priority),
    ///    e.g. `GITFOLIO_GITHUB__USERNAME`, `GITFOLIO_CACHE__TTL_MINUTES`
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("gitfolio.yaml"))
            .merge(Env::prefixed("GITFOLIO_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.cache.ttl_minutes == 0 {
            return Err(ConfigError::InvalidTtl(config.cache.ttl_minutes));
        }

        if config.github.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidRequestTimeout(
                config.github.request_timeout_secs,
            ));
        }

        if config.github.api_url.is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }

        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        // An empty github.username is allowed here: only the portfolio
        // operation needs it, and it fails with a domain error instead.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = Config::default();
        config.cache.ttl_minutes = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTtl(0))
        ));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_empty_username_passes_validation() {
        let config = Config::default();
        assert!(config.github.username.is_empty());
        assert!(ConfigLoader::validate(&config).is_ok());
    }
}
