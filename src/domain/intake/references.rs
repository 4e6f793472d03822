//! Optional external reference identifiers supplied with an intake.

use serde::Serialize;

use crate::domain::evidence::SourceKind;

/// Up to three identifiers pointing at the business's own online presence.
///
/// Values are trimmed on construction; blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceReferences {
    website: Option<String>,
    listing: Option<String>,
    social: Option<String>,
}

impl EvidenceReferences {
    pub fn new(
        website: Option<String>,
        listing: Option<String>,
        social: Option<String>,
    ) -> Self {
        Self {
            website: normalize(website),
            listing: normalize(listing),
            social: normalize(social),
        }
    }

    /// No references at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn listing(&self) -> Option<&str> {
        self.listing.as_deref()
    }

    pub fn social(&self) -> Option<&str> {
        self.social.as_deref()
    }

    /// Returns the reference for a given source kind.
    pub fn get(&self, kind: SourceKind) -> Option<&str> {
        match kind {
            SourceKind::Website => self.website(),
            SourceKind::Listing => self.listing(),
            SourceKind::Social => self.social(),
        }
    }

    /// Supplied references paired with their kind, in presentation order.
    pub fn supplied(&self) -> Vec<(SourceKind, &str)> {
        SourceKind::all()
            .iter()
            .filter_map(|kind| self.get(*kind).map(|reference| (*kind, reference)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.website.is_none() && self.listing.is_none() && self.social.is_none()
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_references_count_as_absent() {
        let refs = EvidenceReferences::new(Some("   ".into()), None, Some("".into()));
        assert!(refs.is_empty());
        assert!(refs.supplied().is_empty());
    }

    #[test]
    fn references_are_trimmed() {
        let refs = EvidenceReferences::new(Some("  example.com ".into()), None, None);
        assert_eq!(refs.website(), Some("example.com"));
    }

    #[test]
    fn supplied_lists_kinds_in_order() {
        let refs = EvidenceReferences::new(
            Some("example.com".into()),
            None,
            Some("@example".into()),
        );
        assert_eq!(
            refs.supplied(),
            vec![(SourceKind::Website, "example.com"), (SourceKind::Social, "@example")]
        );
        assert_eq!(refs.get(SourceKind::Listing), None);
    }
}
