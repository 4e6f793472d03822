//! Evidence Source Port - Interface for external evidence lookups.
//!
//! Each adapter knows how to turn one kind of reference identifier (a website
//! address, a listing id, a social handle) into a single evidence nugget.
//!
//! # Design
//!
//! - One fetch per reference, no retries: the orchestrator's deadline is the
//!   only time budget that matters
//! - Errors are typed so they can be logged meaningfully, but callers never
//!   propagate them

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::evidence::{EvidenceNugget, SourceKind};

/// Port for fetching evidence about a business from one kind of source.
#[async_trait]
pub trait EvidenceSource: Send + Sync {
    /// Which reference kind this source handles.
    fn kind(&self) -> SourceKind;

    /// Fetches and summarizes the referenced source.
    async fn fetch(&self, reference: &str) -> Result<EvidenceNugget, EvidenceError>;
}

/// Errors from evidence source adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvidenceError {
    /// The reference cannot be turned into something fetchable.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded the per-source timeout.
    #[error("request timed out")]
    Timeout,

    /// Source answered with a non-success status.
    #[error("unexpected status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be understood.
    #[error("parse error: {0}")]
    Parse(String),

    /// The source answered but had nothing usable to say.
    #[error("no evidence found: {0}")]
    NotFound(String),
}

impl EvidenceError {
    pub fn invalid_reference(message: impl Into<String>) -> Self {
        Self::InvalidReference(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<reqwest::Error> for EvidenceError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            EvidenceError::Timeout
        } else if let Some(status) = error.status() {
            EvidenceError::Status {
                status: status.as_u16(),
            }
        } else if error.is_decode() {
            EvidenceError::parse(error.to_string())
        } else if error.is_connect() {
            EvidenceError::network(format!("Connection failed: {}", error))
        } else {
            EvidenceError::network(error.to_string())
        }
    }
}
