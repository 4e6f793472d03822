//! Evidence enrichment configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::enrichment::{
    DEFAULT_LISTING_BASE_URL, DEFAULT_PROFILE_URL_TEMPLATE, DEFAULT_USER_AGENT,
};

/// Evidence enrichment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    /// Master switch; when off no source is registered
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Budget for a whole enrichment call, in milliseconds
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,

    /// Per-request timeout for each source, in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// User agent sent to evidence sources
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Places API key; the listing source is only registered when set
    pub listing_api_key: Option<String>,

    /// Places details endpoint
    #[serde(default = "default_listing_base_url")]
    pub listing_base_url: String,

    /// Profile URL with a `{handle}` placeholder
    #[serde(default = "default_profile_template")]
    pub social_profile_url_template: String,
}

impl EnrichmentConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Check if the listing source can be used
    pub fn has_listing_key(&self) -> bool {
        self.listing_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate enrichment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.deadline_ms == 0 || self.deadline_ms > 60_000 {
            return Err(ValidationError::InvalidEnrichmentDeadline);
        }
        if self.request_timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !is_http_url(&self.listing_base_url) {
            return Err(ValidationError::InvalidUrl("listing_base_url"));
        }
        if !self.social_profile_url_template.contains("{handle}")
            || !is_http_url(&self.social_profile_url_template)
        {
            return Err(ValidationError::InvalidProfileTemplate);
        }
        Ok(())
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            deadline_ms: default_deadline_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: default_user_agent(),
            listing_api_key: None,
            listing_base_url: default_listing_base_url(),
            social_profile_url_template: default_profile_template(),
        }
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}

fn default_enabled() -> bool {
    true
}

fn default_deadline_ms() -> u64 {
    5_000
}

fn default_request_timeout_ms() -> u64 {
    4_000
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_listing_base_url() -> String {
    DEFAULT_LISTING_BASE_URL.to_string()
}

fn default_profile_template() -> String {
    DEFAULT_PROFILE_URL_TEMPLATE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrichment_defaults() {
        let config = EnrichmentConfig::default();
        assert!(config.enabled);
        assert_eq!(config.deadline(), Duration::from_secs(5));
        assert_eq!(config.request_timeout(), Duration::from_secs(4));
        assert!(!config.has_listing_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_listing_key_counts_as_missing() {
        let config = EnrichmentConfig {
            listing_api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.has_listing_key());
    }

    #[test]
    fn test_deadline_bounds() {
        for deadline_ms in [0, 60_001] {
            let config = EnrichmentConfig {
                deadline_ms,
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ValidationError::InvalidEnrichmentDeadline)
            );
        }
    }

    #[test]
    fn test_profile_template_needs_placeholder() {
        let config = EnrichmentConfig {
            social_profile_url_template: "https://social.example/profile".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidProfileTemplate));
    }

    #[test]
    fn test_listing_url_must_be_http() {
        let config = EnrichmentConfig {
            listing_base_url: "ftp://places.example".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidUrl("listing_base_url"))
        );
    }
}
