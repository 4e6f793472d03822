//! Evidence nuggets gathered from external sources.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of external source a piece of evidence came from.
///
/// Declaration order doubles as the presentation order of nuggets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Website,
    Listing,
    Social,
}

impl SourceKind {
    /// All source kinds in presentation order.
    pub fn all() -> &'static [SourceKind] {
        &[SourceKind::Website, SourceKind::Listing, SourceKind::Social]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Website => "website",
            SourceKind::Listing => "listing",
            SourceKind::Social => "social",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How strongly a nugget corroborates the intake answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

impl Relevance {
    /// Contribution of one nugget of this relevance to evidence strength.
    pub fn contribution(&self) -> f64 {
        match self {
            Relevance::High => 0.5,
            Relevance::Medium => 0.3,
            Relevance::Low => 0.1,
        }
    }
}

/// A small piece of externally sourced corroborating information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceNugget {
    pub source_kind: SourceKind,
    pub relevance: Relevance,
    pub content: String,
}

impl EvidenceNugget {
    pub fn new(source_kind: SourceKind, relevance: Relevance, content: impl Into<String>) -> Self {
        Self {
            source_kind,
            relevance,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contributions_follow_relevance() {
        assert!((Relevance::High.contribution() - 0.5).abs() < f64::EPSILON);
        assert!((Relevance::Medium.contribution() - 0.3).abs() < f64::EPSILON);
        assert!((Relevance::Low.contribution() - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn source_kinds_sort_in_presentation_order() {
        let mut kinds = vec![SourceKind::Social, SourceKind::Website, SourceKind::Listing];
        kinds.sort();
        assert_eq!(kinds, SourceKind::all());
    }

    #[test]
    fn nugget_serializes_camel_case() {
        let nugget = EvidenceNugget::new(SourceKind::Listing, Relevance::High, "4.8 stars");
        let json = serde_json::to_value(&nugget).unwrap();
        assert_eq!(json["sourceKind"], "listing");
        assert_eq!(json["relevance"], "high");
        assert_eq!(json["content"], "4.8 stars");
    }
}
