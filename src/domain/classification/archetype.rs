//! Business archetypes and maturity stages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Business-maturity persona the classifier can assign.
///
/// Declaration order is the fixed tie-break priority: when two archetypes
/// score identically, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Owner absorbs everything; the day is spent reacting.
    Firefighter,
    /// Gets by on memory and goodwill, with few repeatable habits.
    Improviser,
    /// Has some tools, but they do not talk to each other.
    Patchworker,
    /// Runs on dependable routines and a shared toolset.
    Operator,
    /// Automated, delegated, and ready to scale.
    Orchestrator,
}

/// Number of archetypes.
pub const ARCHETYPE_COUNT: usize = 5;

impl Archetype {
    /// All archetypes in tie-break priority order.
    pub const ALL: [Archetype; ARCHETYPE_COUNT] = [
        Archetype::Firefighter,
        Archetype::Improviser,
        Archetype::Patchworker,
        Archetype::Operator,
        Archetype::Orchestrator,
    ];

    /// Position in the tie-break priority order (0 = highest priority).
    pub fn priority(&self) -> usize {
        *self as usize
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Archetype::Firefighter => "The Firefighter",
            Archetype::Improviser => "The Improviser",
            Archetype::Patchworker => "The Patchworker",
            Archetype::Operator => "The Operator",
            Archetype::Orchestrator => "The Orchestrator",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Coarse digital-maturity bucket, independent of archetype.
///
/// Declaration order runs least to most mature and is also the tie-break
/// order, so ties resolve toward the more conservative stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityStage {
    Analog,
    Emerging,
    Connected,
    Optimized,
}

/// Number of maturity stages.
pub const STAGE_COUNT: usize = 4;

impl MaturityStage {
    /// All stages, least mature first.
    pub const ALL: [MaturityStage; STAGE_COUNT] = [
        MaturityStage::Analog,
        MaturityStage::Emerging,
        MaturityStage::Connected,
        MaturityStage::Optimized,
    ];

    /// 1-based level for display.
    pub fn level(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MaturityStage::Analog => "Analog",
            MaturityStage::Emerging => "Emerging",
            MaturityStage::Connected => "Connected",
            MaturityStage::Optimized => "Optimized",
        }
    }
}

impl fmt::Display for MaturityStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
