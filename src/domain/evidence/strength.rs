//! Scalar summary of gathered evidence.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::EvidenceNugget;

/// How much corroborating external evidence was gathered, in `[0, 1]`.
///
/// Derived as a capped sum of per-nugget contributions so that agreement
/// across several sources counts for more than a single strong hit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceStrength(f64);

impl EvidenceStrength {
    /// No evidence.
    pub const NONE: Self = Self(0.0);

    /// Maximum evidence.
    pub const FULL: Self = Self(1.0);

    /// Creates a strength, clamping into `[0, 1]`. NaN becomes zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::NONE;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Sums nugget contributions, capped at 1.0.
    pub fn from_nuggets(nuggets: &[EvidenceNugget]) -> Self {
        let total: f64 = nuggets.iter().map(|n| n.relevance.contribution()).sum();
        Self::new(total)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0 <= 0.0
    }
}

impl fmt::Display for EvidenceStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
