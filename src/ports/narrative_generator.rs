//! Narrative Generator Port - turns a classification into readable panes.
//!
//! The generator is an external collaborator: the classifier invokes it once
//! per computed response and tolerates it being slow or failing.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::classification::{Classification, NarrativePane};
use crate::domain::evidence::EvidenceNugget;

/// Port for narrative generation.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Produces narrative panes for a classification.
    async fn generate_panes(
        &self,
        request: NarrativeRequest<'_>,
    ) -> Result<Vec<NarrativePane>, NarrativeError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Everything the generator may draw on.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeRequest<'a> {
    pub classification: &'a Classification,
    pub nuggets: &'a [EvidenceNugget],
    pub business_label: Option<&'a str>,
}

/// Errors from narrative generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrativeError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider is unavailable.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl NarrativeError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
