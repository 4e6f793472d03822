//! ClassifyBusinessHandler - Command handler for classifying a business.
//!
//! Flow: cache lookup → scorer pass 1 (selections only) → enrichment →
//! scorer pass 2 (only if evidence arrived) → narrative → cache write.
//!
//! The handler never fails. Enrichment and narrative problems degrade the
//! response (fewer nuggets, no panes) instead of surfacing as errors.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::classification::{
    ClassificationResponse, NarrativePane, ResponseMetadata, ScoringInput, SignalScorer,
    CLASSIFIER_VERSION,
};
use crate::domain::intake::{EvidenceReferences, RequestFingerprint, Selections};
use crate::ports::{NarrativeGenerator, NarrativeRequest, ResponseCache};

use super::enrichment_orchestrator::EnrichmentOrchestrator;

/// Default budget for narrative generation.
pub const DEFAULT_NARRATIVE_TIMEOUT: Duration = Duration::from_secs(20);

/// Command to classify a business from its intake answers.
#[derive(Debug, Clone)]
pub struct ClassifyBusinessCommand {
    pub selections: Selections,
    pub references: EvidenceReferences,
    /// Presentation hint for the narrative; not part of the cache key.
    pub business_label: Option<String>,
}

impl ClassifyBusinessCommand {
    pub fn new(selections: Selections) -> Self {
        Self {
            selections,
            references: EvidenceReferences::none(),
            business_label: None,
        }
    }

    pub fn with_references(mut self, references: EvidenceReferences) -> Self {
        self.references = references;
        self
    }

    pub fn with_business_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        let trimmed = label.trim();
        self.business_label = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn fingerprint(&self) -> RequestFingerprint {
        RequestFingerprint::compute(&self.selections, &self.references)
    }
}

/// Result of a classification: always a full response.
pub type ClassifyBusinessResult = ClassificationResponse;

/// Handler for classification requests.
pub struct ClassifyBusinessHandler {
    scorer: SignalScorer,
    enrichment: Arc<EnrichmentOrchestrator>,
    narrative: Arc<dyn NarrativeGenerator>,
    cache: Arc<dyn ResponseCache>,
    narrative_timeout: Duration,
}

impl ClassifyBusinessHandler {
    pub fn new(
        enrichment: Arc<EnrichmentOrchestrator>,
        narrative: Arc<dyn NarrativeGenerator>,
        cache: Arc<dyn ResponseCache>,
    ) -> Self {
        Self {
            scorer: SignalScorer::new(),
            enrichment,
            narrative,
            cache,
            narrative_timeout: DEFAULT_NARRATIVE_TIMEOUT,
        }
    }

    pub fn with_scorer(mut self, scorer: SignalScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_narrative_timeout(mut self, timeout: Duration) -> Self {
        self.narrative_timeout = timeout;
        self
    }

    pub async fn handle(&self, cmd: ClassifyBusinessCommand) -> ClassifyBusinessResult {
        let started = Instant::now();
        let fingerprint = cmd.fingerprint();

        if let Some(cached) = self.cache.get(&fingerprint) {
            tracing::info!(fingerprint = %fingerprint, "Classification served from cache");
            return cached.as_cache_hit();
        }

        let references_supplied = !cmd.references.is_empty();
        let input =
            ScoringInput::new(&cmd.selections).with_references_supplied(references_supplied);

        let scoring_started = Instant::now();
        let mut classification = self.scorer.score(&input);
        let mut scoring_time = scoring_started.elapsed();

        let mut nuggets = Vec::new();
        let mut enrichment_time_ms = None;

        if references_supplied {
            let outcome = self.enrichment.enrich(&cmd.references).await;
            if outcome.attempted > 0 {
                enrichment_time_ms = Some(millis(outcome.duration));
            }

            if !outcome.nuggets.is_empty() {
                let rescoring_started = Instant::now();
                classification = self
                    .scorer
                    .score(&input.with_evidence(outcome.evidence_strength()));
                scoring_time += rescoring_started.elapsed();
            }
            nuggets = outcome.nuggets;
        }

        let panes = self
            .generate_narrative(NarrativeRequest {
                classification: &classification,
                nuggets: &nuggets,
                business_label: cmd.business_label.as_deref(),
            })
            .await;

        let response = ClassificationResponse {
            panes,
            classification,
            nuggets,
            metadata: ResponseMetadata {
                total_execution_time_ms: millis(started.elapsed()),
                scoring_time_ms: millis(scoring_time),
                enrichment_time_ms,
                cache_hit: false,
                version: CLASSIFIER_VERSION.to_string(),
            },
        };

        tracing::info!(
            fingerprint = %fingerprint,
            stage = %response.classification.stage,
            archetype = %response.classification.top_archetype,
            confidence = response.classification.confidence.value(),
            nuggets = response.nuggets.len(),
            total_ms = response.metadata.total_execution_time_ms,
            "Business classified"
        );

        if response.has_narrative() {
            self.cache.set(fingerprint, response.clone());
        } else {
            tracing::debug!(fingerprint = %fingerprint, "Response without narrative not cached");
        }

        response
    }

    async fn generate_narrative(
        &self,
        request: NarrativeRequest<'_>,
    ) -> Option<Vec<NarrativePane>> {
        let generator = self.narrative.name();

        match tokio::time::timeout(self.narrative_timeout, self.narrative.generate_panes(request))
            .await
        {
            Ok(Ok(panes)) => Some(panes),
            Ok(Err(error)) => {
                tracing::warn!(generator, error = %error, "Narrative generation failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    generator,
                    timeout_ms = millis(self.narrative_timeout),
                    "Narrative generation timed out"
                );
                None
            }
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
