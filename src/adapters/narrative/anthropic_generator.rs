//! Anthropic Narrative Generator - panes written by Claude via the Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicNarrativeConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_timeout(Duration::from_secs(20));
//!
//! let generator = AnthropicNarrativeGenerator::new(config)?;
//! ```
//!
//! The model is asked for a JSON object `{"panes": [{key, title, body}]}`.
//! Anything else is reported as a parse error; the caller then serves the
//! classification without narrative.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::classification::NarrativePane;
use crate::ports::{NarrativeError, NarrativeGenerator, NarrativeRequest};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

const SYSTEM_PROMPT: &str = "You write short, plain-spoken business insight for small business owners. \
You are given a digital operating maturity classification and any evidence found online. \
Respond with only a JSON object of the form {\"panes\":[{\"key\":string,\"title\":string,\"body\":string}]} \
containing exactly four panes with keys snapshot, archetype, evidence and next-steps. \
Each body is at most three sentences. Never invent evidence.";

/// Configuration for the Anthropic narrative generator.
#[derive(Debug, Clone)]
pub struct AnthropicNarrativeConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_tokens: u32,
}

impl AnthropicNarrativeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(20),
            max_tokens: 1024,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Narrative generator backed by Anthropic's Messages API.
pub struct AnthropicNarrativeGenerator {
    config: AnthropicNarrativeConfig,
    client: Client,
}

impl AnthropicNarrativeGenerator {
    pub fn new(config: AnthropicNarrativeConfig) -> Result<Self, NarrativeError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NarrativeError::unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    /// Renders the user message describing the classification.
    fn build_prompt(request: &NarrativeRequest<'_>) -> Result<String, NarrativeError> {
        let classification = serde_json::to_string_pretty(request.classification)
            .map_err(|e| NarrativeError::parse(format!("Failed to encode classification: {}", e)))?;

        let evidence = if request.nuggets.is_empty() {
            "No online evidence was found.".to_string()
        } else {
            request
                .nuggets
                .iter()
                .map(|n| format!("- [{} / {:?}] {}", n.source_kind, n.relevance, n.content))
                .collect::<Vec<_>>()
                .join("\n")
        };

        Ok(format!(
            "Business: {}\n\nClassification:\n{}\n\nEvidence:\n{}",
            request.business_label.unwrap_or("(unnamed)"),
            classification,
            evidence
        ))
    }

    fn to_anthropic_request(&self, prompt: String) -> AnthropicRequest {
        AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            system: SYSTEM_PROMPT.to_string(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        }
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, NarrativeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u32>().ok());
        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(NarrativeError::AuthenticationFailed),
            429 => Err(NarrativeError::RateLimited {
                retry_after_secs: retry_after.unwrap_or(60),
            }),
            500..=599 => Err(NarrativeError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(NarrativeError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Extracts panes from the model's text output.
    fn parse_panes(text: &str) -> Result<Vec<NarrativePane>, NarrativeError> {
        let start = text.find('{');
        let end = text.rfind('}');
        let json = match (start, end) {
            (Some(start), Some(end)) if start < end => &text[start..=end],
            _ => return Err(NarrativeError::parse("no JSON object in model output")),
        };

        let parsed: PanesEnvelope = serde_json::from_str(json)
            .map_err(|e| NarrativeError::parse(format!("Invalid panes JSON: {}", e)))?;

        if parsed.panes.is_empty() {
            return Err(NarrativeError::parse("model returned no panes"));
        }
        Ok(parsed.panes)
    }
}

#[async_trait]
impl NarrativeGenerator for AnthropicNarrativeGenerator {
    async fn generate_panes(
        &self,
        request: NarrativeRequest<'_>,
    ) -> Result<Vec<NarrativePane>, NarrativeError> {
        let body = self.to_anthropic_request(Self::build_prompt(&request)?);

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NarrativeError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    NarrativeError::network(format!("Connection failed: {}", e))
                } else {
                    NarrativeError::network(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response).await?;
        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| NarrativeError::parse(format!("Failed to parse response: {}", e)))?;

        let text = anthropic_response
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        Self::parse_panes(&text)
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Anthropic API Types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PanesEnvelope {
    panes: Vec<NarrativePane>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::{ScoringInput, SignalScorer};
    use crate::domain::evidence::{EvidenceNugget, Relevance, SourceKind};
    use crate::domain::intake::{
        BusinessFeeling, CallHandling, Invoicing, PresenceChannel, Scheduling, Selections,
        TeamShape,
    };

    #[test]
    fn config_builder_works() {
        let config = AnthropicNarrativeConfig::new("test-key")
            .with_model("claude-3-haiku-20240307")
            .with_base_url("https://custom.api.com/")
            .with_timeout(Duration::from_secs(5))
            .with_max_tokens(512);

        assert_eq!(config.model, "claude-3-haiku-20240307");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.api_key(), "test-key");

        let generator = AnthropicNarrativeGenerator::new(config).unwrap();
        assert_eq!(generator.messages_url(), "https://custom.api.com/v1/messages");
        assert_eq!(generator.name(), "anthropic");
    }

    #[test]
    fn parses_panes_wrapped_in_prose() {
        let text = "Here you go:\n```json\n{\"panes\":[{\"key\":\"snapshot\",\"title\":\"Today\",\"body\":\"Busy.\"}]}\n```";

        let panes = AnthropicNarrativeGenerator::parse_panes(text).unwrap();

        assert_eq!(panes, vec![NarrativePane::new("snapshot", "Today", "Busy.")]);
    }

    #[test]
    fn rejects_output_without_panes() {
        assert!(matches!(
            AnthropicNarrativeGenerator::parse_panes("I cannot help with that."),
            Err(NarrativeError::Parse(_))
        ));
        assert!(matches!(
            AnthropicNarrativeGenerator::parse_panes("{\"panes\":[]}"),
            Err(NarrativeError::Parse(_))
        ));
    }

    #[test]
    fn prompt_includes_label_classification_and_evidence() {
        let selections = Selections::new(
            [PresenceChannel::Website],
            TeamShape::SmallTeam,
            Scheduling::OnlineBooking,
            Invoicing::AccountingSoftware,
            CallHandling::Staff,
            BusinessFeeling::Growing,
        )
        .unwrap();
        let classification = SignalScorer::new().score(&ScoringInput::new(&selections));
        let nuggets = vec![EvidenceNugget::new(
            SourceKind::Website,
            Relevance::High,
            "Website \"Smith\"",
        )];

        let prompt = AnthropicNarrativeGenerator::build_prompt(&NarrativeRequest {
            classification: &classification,
            nuggets: &nuggets,
            business_label: Some("Smith Plumbing"),
        })
        .unwrap();

        assert!(prompt.starts_with("Business: Smith Plumbing"));
        assert!(prompt.contains("\"topArchetype\""));
        assert!(prompt.contains("- [website / High] Website \"Smith\""));
    }
}
