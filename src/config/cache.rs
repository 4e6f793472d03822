//! Response cache configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::cache::{CacheSettings, DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS};

/// Upper bound on configurable capacity.
const MAX_CAPACITY: usize = 100_000;

/// Response cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached responses
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Entry lifetime in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn settings(&self) -> CacheSettings {
        CacheSettings {
            max_entries: self.max_entries,
            ttl_secs: self.ttl_secs,
        }
    }

    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_entries == 0 || self.max_entries > MAX_CAPACITY {
            return Err(ValidationError::InvalidCacheCapacity);
        }
        if self.ttl_secs == 0 {
            return Err(ValidationError::InvalidCacheTtl);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 100);
        assert_eq!(config.ttl_secs, 86_400);
        assert_eq!(config.settings(), CacheSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_capacity() {
        let config = CacheConfig {
            max_entries: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCacheCapacity));
    }

    #[test]
    fn test_invalid_ttl() {
        let config = CacheConfig {
            ttl_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCacheTtl));
    }
}
