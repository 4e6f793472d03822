//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MATURITY_LENS` prefix and nested values use double underscores as separators.
//! Every section has defaults, so the service starts with no environment at all.
//!
//! # Example
//!
//! ```no_run
//! use maturity_lens::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod cache;
mod enrichment;
mod error;
mod features;
mod server;

pub use ai::{AiConfig, NarrativeProvider};
pub use cache::CacheConfig;
pub use enrichment::EnrichmentConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Evidence sources and the enrichment deadline
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Response cache capacity and TTL
    #[serde(default)]
    pub cache: CacheConfig,

    /// Narrative provider configuration (template or Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MATURITY_LENS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MATURITY_LENS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MATURITY_LENS__ENRICHMENT__LISTING_API_KEY=...` -> `enrichment.listing_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MATURITY_LENS")
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
    /// Returns `ValidationError` for the first section that is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.enrichment.validate()?;
        self.cache.validate()?;
        self.ai.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const TOUCHED_VARS: &[&str] = &[
        "MATURITY_LENS__SERVER__PORT",
        "MATURITY_LENS__SERVER__ENVIRONMENT",
        "MATURITY_LENS__ENRICHMENT__DEADLINE_MS",
        "MATURITY_LENS__ENRICHMENT__LISTING_API_KEY",
        "MATURITY_LENS__ENRICHMENT__ENABLED",
        "MATURITY_LENS__CACHE__MAX_ENTRIES",
        "MATURITY_LENS__CACHE__TTL_SECS",
        "MATURITY_LENS__AI__NARRATIVE_PROVIDER",
        "MATURITY_LENS__AI__ANTHROPIC_API_KEY",
    ];

    fn clear_env() {
        for var in TOUCHED_VARS {
            env::remove_var(var);
        }
    }

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_with_no_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.max_entries, 100);
        assert_eq!(config.enrichment.deadline_ms, 5_000);
        assert_eq!(config.ai.narrative_provider, NarrativeProvider::Template);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("MATURITY_LENS__SERVER__PORT", "3000"),
            ("MATURITY_LENS__ENRICHMENT__DEADLINE_MS", "2500"),
            ("MATURITY_LENS__ENRICHMENT__LISTING_API_KEY", "places-key"),
            ("MATURITY_LENS__CACHE__MAX_ENTRIES", "10"),
            ("MATURITY_LENS__CACHE__TTL_SECS", "60"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.enrichment.deadline_ms, 2_500);
        assert!(config.enrichment.has_listing_key());
        assert_eq!(config.cache.max_entries, 10);
        assert_eq!(config.cache.ttl_secs, 60);
    }

    #[test]
    fn test_disable_enrichment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("MATURITY_LENS__ENRICHMENT__ENABLED", "false")]).unwrap();
        assert!(!config.enrichment.enabled);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("MATURITY_LENS__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_anthropic_without_key_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("MATURITY_LENS__AI__NARRATIVE_PROVIDER", "anthropic")]).unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"))
        );
    }
}
