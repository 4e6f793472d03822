//! Signal Scorer - deterministic rule engine over intake answers.
//!
//! Pure and stateless: the scorer holds a reference to an immutable weight
//! table and nothing else, so a single instance can be shared freely across
//! concurrent requests.

use std::collections::{BTreeMap, BTreeSet};

use super::archetype::{Archetype, MaturityStage, ARCHETYPE_COUNT, STAGE_COUNT};
use super::scoring::{Classification, ClassificationFlag, ScoringInput};
use super::weights::{Contribution, WeightTable, DEFAULT_WEIGHTS};
use crate::domain::foundation::Percentage;

/// Version tag of the scoring rules, reported in response metadata.
pub const CLASSIFIER_VERSION: &str = "signal-scorer/1.0";

/// Confidence points added at full evidence strength.
pub const EVIDENCE_WEIGHT: f64 = 20.0;

/// Top-two probability gap under which the split counts as ambiguous.
pub const AMBIGUITY_EPSILON: f64 = 0.02;

const BASE_CONFIDENCE_FLOOR: f64 = 30.0;
const MARGIN_POINTS: f64 = 40.0;
/// Margin at which the margin component saturates.
const MARGIN_SATURATION: f64 = 0.5;
const DISTINCTIVE_POINTS: f64 = 15.0;
/// presence, team, scheduling, invoicing, calls, feeling.
const SCORED_FIELDS: f64 = 6.0;

/// Turns selections and evidence strength into a [`Classification`].
#[derive(Debug, Clone, Copy)]
pub struct SignalScorer {
    table: &'static WeightTable,
}

impl Default for SignalScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
struct Accumulators {
    archetypes: [f64; ARCHETYPE_COUNT],
    stages: [f64; STAGE_COUNT],
}

impl Accumulators {
    fn add(&mut self, contribution: &Contribution) {
        for (acc, weight) in self.archetypes.iter_mut().zip(contribution.archetypes) {
            *acc += f64::from(weight);
        }
        for (acc, weight) in self.stages.iter_mut().zip(contribution.stages) {
            *acc += f64::from(weight);
        }
    }
}

impl SignalScorer {
    /// Scorer backed by the production weight table.
    pub fn new() -> Self {
        Self::with_table(&DEFAULT_WEIGHTS)
    }

    pub fn with_table(table: &'static WeightTable) -> Self {
        Self { table }
    }

    /// Scores one input. Never fails for well-formed selections.
    pub fn score(&self, input: &ScoringInput<'_>) -> Classification {
        let selections = input.selections;
        let table = self.table;
        let mut acc = Accumulators::default();
        let mut flags = BTreeSet::new();
        let mut distinctive = 0usize;

        let mut presence_distinctive = false;
        for channel in selections.presence_channels() {
            let contribution = table.presence(*channel);
            acc.add(contribution);
            presence_distinctive |= table.is_distinctive(contribution);
        }
        if presence_distinctive {
            distinctive += 1;
        }
        if selections.lacks_digital_presence() {
            acc.add(&table.no_presence_bonus);
            flags.insert(ClassificationFlag::NoDigitalPresence);
        }

        for contribution in [
            table.team_shape(selections.team_shape()),
            table.scheduling(selections.scheduling()),
            table.invoicing(selections.invoicing()),
            table.call_handling(selections.call_handling()),
            table.business_feeling(selections.business_feeling()),
        ] {
            acc.add(contribution);
            if table.is_distinctive(contribution) {
                distinctive += 1;
            }
        }

        let probabilities = normalize(&acc.archetypes).unwrap_or_else(|| {
            flags.insert(ClassificationFlag::LowSignal);
            [1.0 / ARCHETYPE_COUNT as f64; ARCHETYPE_COUNT]
        });

        let ranked = rank(&probabilities);
        let (top, runner_up) = (ranked[0], ranked[1]);
        let margin = probabilities[top] - probabilities[runner_up];
        if margin < AMBIGUITY_EPSILON {
            flags.insert(ClassificationFlag::AmbiguousArchetype);
        }

        if acc.stages.iter().all(|w| *w <= 0.0) {
            flags.insert(ClassificationFlag::LowSignal);
        }
        let stage = MaturityStage::ALL[argmax(&acc.stages)];

        let margin_score = (margin / MARGIN_SATURATION).clamp(0.0, 1.0);
        let distinctive_share = distinctive as f64 / SCORED_FIELDS;
        let base = BASE_CONFIDENCE_FLOOR
            + MARGIN_POINTS * margin_score
            + DISTINCTIVE_POINTS * distinctive_share;
        let evidence = input.evidence_strength;
        let confidence =
            Percentage::from_points((base + evidence.value() * EVIDENCE_WEIGHT).min(100.0));

        if input.references_supplied && evidence.is_none() {
            flags.insert(ClassificationFlag::EnrichmentEmpty);
        }

        Classification {
            stage,
            top_archetype: Archetype::ALL[top],
            runner_up_archetype: Archetype::ALL[runner_up],
            archetype_probabilities: Archetype::ALL
                .iter()
                .copied()
                .zip(probabilities)
                .collect::<BTreeMap<_, _>>(),
            confidence,
            flags,
            evidence_strength: evidence,
        }
    }
}

/// Divides by the sum; `None` when there is nothing to normalize.
fn normalize(weights: &[f64; ARCHETYPE_COUNT]) -> Option<[f64; ARCHETYPE_COUNT]> {
    let sum: f64 = weights.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return None;
    }
    Some((*weights).map(|w| w / sum))
}

/// Indices by descending value; ties keep the lower index first.
fn rank(values: &[f64; ARCHETYPE_COUNT]) -> [usize; ARCHETYPE_COUNT] {
    let mut order: [usize; ARCHETYPE_COUNT] = std::array::from_fn(|i| i);
    order.sort_by(|a, b| values[*b].total_cmp(&values[*a]).then(a.cmp(b)));
    order
}

/// First index holding the maximum.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = index;
        }
    }
    best
}
