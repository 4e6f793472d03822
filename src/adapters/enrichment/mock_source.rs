//! Mock evidence source for testing.
//!
//! Returns a fixed nugget or error after an optional delay, and records every
//! reference it was asked to fetch.
//!
//! # Example
//!
//! ```ignore
//! let source = MockEvidenceSource::succeeding(SourceKind::Website, Relevance::High)
//!     .with_delay(Duration::from_millis(50));
//!
//! let nugget = source.fetch("smith.example").await?;
//! assert_eq!(source.calls(), vec!["smith.example"]);
//! ```

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::evidence::{EvidenceNugget, Relevance, SourceKind};
use crate::ports::{EvidenceError, EvidenceSource};

#[derive(Debug, Clone)]
enum MockOutcome {
    Nugget(Relevance, String),
    Error(EvidenceError),
}

/// Configurable evidence source for tests.
#[derive(Debug, Clone)]
pub struct MockEvidenceSource {
    kind: SourceKind,
    outcome: MockOutcome,
    /// Simulated latency per fetch.
    delay: Duration,
    /// References requested, in call order.
    calls: Arc<Mutex<Vec<String>>>,
    /// Fetches that ran to completion (not cancelled).
    completed: Arc<AtomicUsize>,
}

impl MockEvidenceSource {
    /// A source that always yields a nugget of the given relevance.
    pub fn succeeding(kind: SourceKind, relevance: Relevance) -> Self {
        Self::with_outcome(
            kind,
            MockOutcome::Nugget(relevance, format!("mock {} evidence", kind)),
        )
    }

    /// A source that always fails with the given error.
    pub fn failing(kind: SourceKind, error: EvidenceError) -> Self {
        Self::with_outcome(kind, MockOutcome::Error(error))
    }

    fn with_outcome(kind: SourceKind, outcome: MockOutcome) -> Self {
        Self {
            kind,
            outcome,
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Overrides the nugget content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        if let MockOutcome::Nugget(_, existing) = &mut self.outcome {
            *existing = content.into();
        }
        self
    }

    /// Sets a simulated delay before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// References fetched so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Fetches that finished rather than being dropped mid-flight.
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EvidenceSource for MockEvidenceSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self, reference: &str) -> Result<EvidenceNugget, EvidenceError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(reference.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        match &self.outcome {
            MockOutcome::Nugget(relevance, content) => {
                Ok(EvidenceNugget::new(self.kind, *relevance, content.clone()))
            }
            MockOutcome::Error(error) => Err(error.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn succeeding_source_returns_nugget_and_tracks_calls() {
        let source = MockEvidenceSource::succeeding(SourceKind::Listing, Relevance::Medium)
            .with_content("Listing \"Smith\"");

        let nugget = source.fetch("place-1").await.unwrap();

        assert_eq!(nugget.source_kind, SourceKind::Listing);
        assert_eq!(nugget.relevance, Relevance::Medium);
        assert_eq!(nugget.content, "Listing \"Smith\"");
        assert_eq!(source.calls(), vec!["place-1".to_string()]);
        assert_eq!(source.completed_count(), 1);
    }

    #[tokio::test]
    async fn failing_source_returns_error() {
        let source = MockEvidenceSource::failing(SourceKind::Social, EvidenceError::Timeout);
        assert_eq!(source.fetch("@smith").await, Err(EvidenceError::Timeout));
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn dropped_fetch_never_completes() {
        let source = MockEvidenceSource::succeeding(SourceKind::Website, Relevance::Low)
            .with_delay(Duration::from_secs(5));

        let result =
            tokio::time::timeout(Duration::from_millis(20), source.fetch("slow.example")).await;

        assert!(result.is_err());
        assert_eq!(source.call_count(), 1);
        assert_eq!(source.completed_count(), 0);
    }
}
