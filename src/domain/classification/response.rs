//! The full response returned for a classification request.

use serde::{Deserialize, Serialize};

use super::scoring::Classification;
use crate::domain::evidence::EvidenceNugget;

/// One block of human-readable narrative produced for a classification.
///
/// Opaque to the classifier: it only ever stores and returns panes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativePane {
    pub key: String,
    pub title: String,
    pub body: String,
}

impl NarrativePane {
    pub fn new(key: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Timing and provenance of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub total_execution_time_ms: u64,
    pub scoring_time_ms: u64,
    /// Absent when no enrichment was attempted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment_time_ms: Option<u64>,
    pub cache_hit: bool,
    pub version: String,
}

/// Narrative panes, classification, evidence and metadata for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResponse {
    /// `None` when the narrative generator failed or timed out.
    pub panes: Option<Vec<NarrativePane>>,
    pub classification: Classification,
    pub nuggets: Vec<EvidenceNugget>,
    pub metadata: ResponseMetadata,
}

impl ClassificationResponse {
    /// The same response, marked as served from cache.
    pub fn as_cache_hit(&self) -> Self {
        let mut hit = self.clone();
        hit.metadata.cache_hit = true;
        hit
    }

    /// Whether narrative panes are present.
    pub fn has_narrative(&self) -> bool {
        self.panes.is_some()
    }
}
