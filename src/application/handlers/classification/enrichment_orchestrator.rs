//! EnrichmentOrchestrator - time-boxed, parallel evidence gathering.
//!
//! Every supplied reference is fetched concurrently by the source registered
//! for its kind. One shared deadline bounds the whole call: whatever has
//! arrived by then is returned and the remaining fetches are dropped, which
//! cancels them. Individual failures are logged and discarded; enrichment
//! never fails.

use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

use crate::domain::evidence::{EvidenceNugget, EvidenceStrength, SourceKind};
use crate::domain::intake::EvidenceReferences;
use crate::ports::EvidenceSource;

/// Default wall-clock budget for one enrichment call.
pub const DEFAULT_ENRICHMENT_DEADLINE: Duration = Duration::from_secs(5);

/// What an enrichment call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentOutcome {
    /// Collected nuggets, ordered by source kind.
    pub nuggets: Vec<EvidenceNugget>,
    /// Wall-clock time spent.
    pub duration: Duration,
    /// Whether the deadline cut off pending fetches.
    pub timed_out: bool,
    /// Number of fetches started.
    pub attempted: usize,
}

impl EnrichmentOutcome {
    /// Nothing attempted, nothing found.
    pub fn empty() -> Self {
        Self {
            nuggets: Vec::new(),
            duration: Duration::ZERO,
            timed_out: false,
            attempted: 0,
        }
    }

    pub fn evidence_strength(&self) -> EvidenceStrength {
        EvidenceStrength::from_nuggets(&self.nuggets)
    }
}

/// Fans reference lookups out to evidence sources under a single deadline.
pub struct EnrichmentOrchestrator {
    sources: BTreeMap<SourceKind, Arc<dyn EvidenceSource>>,
    deadline: Duration,
}

impl Default for EnrichmentOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_ENRICHMENT_DEADLINE)
    }
}

impl EnrichmentOrchestrator {
    /// An orchestrator with no sources registered.
    pub fn new(deadline: Duration) -> Self {
        Self {
            sources: BTreeMap::new(),
            deadline,
        }
    }

    /// Registers a source for its kind, replacing any previous one.
    pub fn with_source(mut self, source: Arc<dyn EvidenceSource>) -> Self {
        self.sources.insert(source.kind(), source);
        self
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn has_source(&self, kind: SourceKind) -> bool {
        self.sources.contains_key(&kind)
    }

    /// Kinds with a registered source.
    pub fn source_kinds(&self) -> Vec<SourceKind> {
        self.sources.keys().copied().collect()
    }

    /// Gathers evidence for the supplied references.
    pub async fn enrich(&self, references: &EvidenceReferences) -> EnrichmentOutcome {
        let jobs: Vec<_> = references
            .supplied()
            .into_iter()
            .filter_map(|(kind, reference)| match self.sources.get(&kind) {
                Some(source) => Some((kind, Arc::clone(source), reference.to_string())),
                None => {
                    tracing::debug!(source = %kind, "No evidence source registered, skipping");
                    None
                }
            })
            .collect();

        if jobs.is_empty() {
            return EnrichmentOutcome::empty();
        }

        let attempted = jobs.len();
        let started = Instant::now();
        let deadline = started + self.deadline;

        let mut pending: FuturesUnordered<_> = jobs
            .into_iter()
            .map(|(kind, source, reference)| async move {
                let result = source.fetch(&reference).await;
                (kind, result)
            })
            .collect();

        let mut nuggets = Vec::with_capacity(attempted);
        let mut timed_out = false;

        loop {
            match timeout_at(deadline, pending.next()).await {
                Ok(Some((kind, Ok(nugget)))) => {
                    tracing::debug!(
                        source = %kind,
                        relevance = ?nugget.relevance,
                        "Evidence received"
                    );
                    nuggets.push(nugget);
                }
                Ok(Some((kind, Err(error)))) => {
                    tracing::warn!(source = %kind, error = %error, "Evidence source failed");
                }
                Ok(None) => break,
                Err(_) => {
                    timed_out = true;
                    tracing::warn!(
                        pending = pending.len(),
                        deadline_ms = self.deadline.as_millis() as u64,
                        "Enrichment deadline reached, dropping pending sources"
                    );
                    break;
                }
            }
        }
        drop(pending);

        nuggets.sort_by_key(|nugget| nugget.source_kind);
        let duration = started.elapsed();

        tracing::info!(
            attempted,
            collected = nuggets.len(),
            timed_out,
            duration_ms = duration.as_millis() as u64,
            "Enrichment completed"
        );

        EnrichmentOutcome {
            nuggets,
            duration,
            timed_out,
            attempted,
        }
    }
}
