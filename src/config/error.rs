//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid host or port")]
    InvalidAddress,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Enrichment deadline must be between 1 and 60000 ms")]
    InvalidEnrichmentDeadline,

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("Social profile URL template must contain {{handle}}")]
    InvalidProfileTemplate,

    #[error("Cache capacity must be between 1 and 100000 entries")]
    InvalidCacheCapacity,

    #[error("Cache TTL must be positive")]
    InvalidCacheTtl,
}
