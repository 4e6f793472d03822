//! Narrative provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Narrative provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which generator writes narrative panes
    #[serde(default)]
    pub narrative_provider: NarrativeProvider,

    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// Anthropic model
    #[serde(default = "default_model")]
    pub model: String,

    /// Anthropic API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Narrative timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Narrative generator type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeProvider {
    #[default]
    Template,
    Anthropic,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate narrative configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.narrative_provider == NarrativeProvider::Anthropic && !self.has_anthropic() {
            return Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidUrl("ai.base_url"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            narrative_provider: NarrativeProvider::default(),
            anthropic_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_timeout() -> u64 {
    20
}
