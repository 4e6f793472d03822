//! Mock narrative generator for testing.
//!
//! Returns fixed panes or an error after an optional delay, and counts calls.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::classification::NarrativePane;
use crate::ports::{NarrativeError, NarrativeGenerator, NarrativeRequest};

/// Configurable narrative generator for tests.
#[derive(Debug, Clone)]
pub struct MockNarrativeGenerator {
    result: Result<Vec<NarrativePane>, NarrativeError>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl Default for MockNarrativeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNarrativeGenerator {
    /// Answers with a single summary pane.
    pub fn new() -> Self {
        Self::with_panes(vec![NarrativePane::new("summary", "Summary", "Mock narrative.")])
    }

    pub fn with_panes(panes: Vec<NarrativePane>) -> Self {
        Self {
            result: Ok(panes),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always fails with the given error.
    pub fn failing(error: NarrativeError) -> Self {
        Self {
            result: Err(error),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NarrativeGenerator for MockNarrativeGenerator {
    async fn generate_panes(
        &self,
        _request: NarrativeRequest<'_>,
    ) -> Result<Vec<NarrativePane>, NarrativeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.result.clone()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
