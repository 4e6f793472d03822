//! Hand-authored weight table driving the signal scorer.
//!
//! Each (field, answer) pair maps to a non-negative contribution vector over
//! the archetypes (in `Archetype::ALL` order) and the maturity stages (in
//! `MaturityStage::ALL` order). Weights are small integers so the table stays
//! auditable; the scorer sums them as `f64`.

use super::archetype::{ARCHETYPE_COUNT, STAGE_COUNT};
use crate::domain::intake::{
    BusinessFeeling, CallHandling, Invoicing, PresenceChannel, Scheduling, TeamShape,
};

/// Contribution of one answer to the archetype and stage accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    /// Firefighter, Improviser, Patchworker, Operator, Orchestrator.
    pub archetypes: [u8; ARCHETYPE_COUNT],
    /// Analog, Emerging, Connected, Optimized.
    pub stages: [u8; STAGE_COUNT],
}

impl Contribution {
    /// A contribution that adds nothing.
    pub const ZERO: Self = Self {
        archetypes: [0; ARCHETYPE_COUNT],
        stages: [0; STAGE_COUNT],
    };

    const fn new(archetypes: [u8; ARCHETYPE_COUNT], stages: [u8; STAGE_COUNT]) -> Self {
        Self { archetypes, stages }
    }

    /// Strongest single archetype weight in this contribution.
    pub fn peak_archetype_weight(&self) -> u8 {
        self.archetypes.iter().copied().max().unwrap_or(0)
    }
}

/// Full (field, answer) → contribution table.
///
/// Arrays are indexed by the answer enum's declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    pub presence: [Contribution; 4],
    pub team_shape: [Contribution; 4],
    pub scheduling: [Contribution; 5],
    pub invoicing: [Contribution; 4],
    pub call_handling: [Contribution; 5],
    pub business_feeling: [Contribution; 5],
    /// Extra increment applied when the only presence answer is `none`.
    pub no_presence_bonus: Contribution,
    /// An answer is distinctive when its peak archetype weight reaches this.
    pub distinctive_threshold: u8,
}

impl WeightTable {
    /// A table with every weight at zero. Scoring against it exercises the
    /// uniform fallback.
    pub const fn zeroed() -> Self {
        Self {
            presence: [Contribution::ZERO; 4],
            team_shape: [Contribution::ZERO; 4],
            scheduling: [Contribution::ZERO; 5],
            invoicing: [Contribution::ZERO; 4],
            call_handling: [Contribution::ZERO; 5],
            business_feeling: [Contribution::ZERO; 5],
            no_presence_bonus: Contribution::ZERO,
            distinctive_threshold: 1,
        }
    }

    pub fn presence(&self, channel: PresenceChannel) -> &Contribution {
        &self.presence[channel as usize]
    }

    pub fn team_shape(&self, value: TeamShape) -> &Contribution {
        &self.team_shape[value as usize]
    }

    pub fn scheduling(&self, value: Scheduling) -> &Contribution {
        &self.scheduling[value as usize]
    }

    pub fn invoicing(&self, value: Invoicing) -> &Contribution {
        &self.invoicing[value as usize]
    }

    pub fn call_handling(&self, value: CallHandling) -> &Contribution {
        &self.call_handling[value as usize]
    }

    pub fn business_feeling(&self, value: BusinessFeeling) -> &Contribution {
        &self.business_feeling[value as usize]
    }

    pub fn is_distinctive(&self, contribution: &Contribution) -> bool {
        contribution.peak_archetype_weight() >= self.distinctive_threshold
    }
}

/// The production weight table.
pub static DEFAULT_WEIGHTS: WeightTable = WeightTable {
    presence: [
        // website
        Contribution::new([0, 1, 2, 2, 1], [0, 1, 2, 1]),
        // listing
        Contribution::new([0, 1, 2, 1, 1], [0, 2, 1, 0]),
        // social
        Contribution::new([1, 2, 2, 1, 0], [0, 2, 1, 0]),
        // none
        Contribution::new([2, 3, 0, 0, 0], [3, 1, 0, 0]),
    ],
    team_shape: [
        // solo
        Contribution::new([3, 2, 1, 0, 0], [1, 1, 0, 0]),
        // small_team
        Contribution::new([1, 1, 2, 2, 1], [0, 1, 1, 0]),
        // growing_team
        Contribution::new([1, 0, 2, 2, 2], [0, 0, 2, 1]),
        // established
        Contribution::new([0, 0, 1, 3, 3], [0, 0, 1, 2]),
    ],
    scheduling: [
        // phone
        Contribution::new([3, 2, 0, 0, 0], [2, 1, 0, 0]),
        // paper
        Contribution::new([2, 3, 0, 0, 0], [3, 0, 0, 0]),
        // shared_calendar
        Contribution::new([0, 0, 2, 3, 1], [0, 1, 2, 0]),
        // online_booking
        Contribution::new([0, 0, 1, 2, 4], [0, 0, 1, 3]),
        // not_applicable
        Contribution::new([0, 1, 1, 1, 1], [0, 1, 1, 0]),
    ],
    invoicing: [
        // paper
        Contribution::new([2, 3, 0, 0, 0], [3, 0, 0, 0]),
        // spreadsheet
        Contribution::new([1, 1, 3, 1, 0], [0, 2, 1, 0]),
        // accounting_software
        Contribution::new([0, 0, 1, 3, 2], [0, 0, 2, 1]),
        // automated
        Contribution::new([0, 0, 0, 2, 4], [0, 0, 1, 3]),
    ],
    call_handling: [
        // voicemail
        Contribution::new([4, 2, 0, 0, 0], [2, 1, 0, 0]),
        // owner_answers
        Contribution::new([3, 1, 1, 0, 0], [1, 1, 0, 0]),
        // staff
        Contribution::new([0, 0, 1, 3, 2], [0, 1, 2, 0]),
        // answering_service
        Contribution::new([0, 1, 2, 2, 1], [0, 1, 2, 0]),
        // automated
        Contribution::new([0, 0, 1, 1, 4], [0, 0, 1, 3]),
    ],
    business_feeling: [
        // overwhelmed
        Contribution::new([4, 1, 1, 0, 0], [1, 1, 0, 0]),
        // stuck
        Contribution::new([1, 3, 2, 0, 0], [1, 1, 0, 0]),
        // steady
        Contribution::new([0, 1, 1, 3, 1], [0, 1, 1, 0]),
        // growing
        Contribution::new([1, 0, 1, 2, 3], [0, 0, 1, 1]),
        // thriving
        Contribution::new([0, 0, 0, 2, 4], [0, 0, 1, 2]),
    ],
    no_presence_bonus: Contribution::new([2, 1, 0, 0, 0], [2, 0, 0, 0]),
    distinctive_threshold: 3,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn all_contributions(table: &WeightTable) -> Vec<&Contribution> {
        table
            .presence
            .iter()
            .chain(table.team_shape.iter())
            .chain(table.scheduling.iter())
            .chain(table.invoicing.iter())
            .chain(table.call_handling.iter())
            .chain(table.business_feeling.iter())
            .collect()
    }

    #[test]
    fn table_dimensions_match_vocabularies() {
        assert_eq!(DEFAULT_WEIGHTS.presence.len(), PresenceChannel::ALL.len());
        assert_eq!(DEFAULT_WEIGHTS.team_shape.len(), TeamShape::ALL.len());
        assert_eq!(DEFAULT_WEIGHTS.scheduling.len(), Scheduling::ALL.len());
        assert_eq!(DEFAULT_WEIGHTS.invoicing.len(), Invoicing::ALL.len());
        assert_eq!(DEFAULT_WEIGHTS.call_handling.len(), CallHandling::ALL.len());
        assert_eq!(DEFAULT_WEIGHTS.business_feeling.len(), BusinessFeeling::ALL.len());
    }

    #[test]
    fn every_answer_contributes_to_some_archetype_and_stage() {
        for contribution in all_contributions(&DEFAULT_WEIGHTS) {
            assert!(contribution.archetypes.iter().any(|w| *w > 0));
            assert!(contribution.stages.iter().any(|w| *w > 0));
        }
    }

    #[test]
    fn lookups_index_by_declaration_order() {
        assert_eq!(
            DEFAULT_WEIGHTS.presence(PresenceChannel::NoPresence),
            &DEFAULT_WEIGHTS.presence[3]
        );
        assert_eq!(
            DEFAULT_WEIGHTS.scheduling(Scheduling::OnlineBooking),
            &DEFAULT_WEIGHTS.scheduling[3]
        );
    }

    #[test]
    fn distinctiveness_uses_peak_weight() {
        assert!(DEFAULT_WEIGHTS.is_distinctive(DEFAULT_WEIGHTS.call_handling(CallHandling::Voicemail)));
        assert!(!DEFAULT_WEIGHTS.is_distinctive(DEFAULT_WEIGHTS.presence(PresenceChannel::Website)));
    }

    #[test]
    fn zeroed_table_has_no_weight() {
        let table = WeightTable::zeroed();
        assert!(all_contributions(&table)
            .iter()
            .all(|c| c.peak_archetype_weight() == 0));
    }
}
