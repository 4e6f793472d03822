//! Scorer input and output types.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::archetype::{Archetype, MaturityStage};
use crate::domain::evidence::EvidenceStrength;
use crate::domain::foundation::Percentage;
use crate::domain::intake::Selections;

/// Edge conditions surfaced alongside a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationFlag {
    /// The only presence answer was `none`.
    NoDigitalPresence,
    /// The weight table produced no signal; probabilities fell back to uniform.
    LowSignal,
    /// Top two archetypes are within the ambiguity epsilon.
    AmbiguousArchetype,
    /// References were supplied but no evidence came back.
    EnrichmentEmpty,
}

impl ClassificationFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationFlag::NoDigitalPresence => "no-digital-presence",
            ClassificationFlag::LowSignal => "low-signal",
            ClassificationFlag::AmbiguousArchetype => "ambiguous-archetype",
            ClassificationFlag::EnrichmentEmpty => "enrichment-empty",
        }
    }
}

impl fmt::Display for ClassificationFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the scorer needs for one pass.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub selections: &'a Selections,
    pub evidence_strength: EvidenceStrength,
    /// Whether the request carried any reference identifiers.
    pub references_supplied: bool,
}

impl<'a> ScoringInput<'a> {
    /// Selections only, no evidence.
    pub fn new(selections: &'a Selections) -> Self {
        Self {
            selections,
            evidence_strength: EvidenceStrength::NONE,
            references_supplied: false,
        }
    }

    pub fn with_evidence(mut self, evidence_strength: EvidenceStrength) -> Self {
        self.evidence_strength = evidence_strength;
        self
    }

    pub fn with_references_supplied(mut self, supplied: bool) -> Self {
        self.references_supplied = supplied;
        self
    }
}

/// Output of the signal scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub stage: MaturityStage,
    pub top_archetype: Archetype,
    pub runner_up_archetype: Archetype,
    /// Probability per archetype; sums to 1.
    pub archetype_probabilities: BTreeMap<Archetype, f64>,
    pub confidence: Percentage,
    pub flags: BTreeSet<ClassificationFlag>,
    pub evidence_strength: EvidenceStrength,
}

impl Classification {
    /// Probability assigned to an archetype (0 if absent).
    pub fn probability(&self, archetype: Archetype) -> f64 {
        self.archetype_probabilities
            .get(&archetype)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn has_flag(&self, flag: ClassificationFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Archetypes by descending probability, ties in priority order.
    pub fn ranked_archetypes(&self) -> Vec<(Archetype, f64)> {
        let mut ranked: Vec<_> = self
            .archetype_probabilities
            .iter()
            .map(|(archetype, p)| (*archetype, *p))
            .collect();
        ranked.sort_by(|(a, pa), (b, pb)| pb.total_cmp(pa).then(a.cmp(b)));
        ranked
    }
}
