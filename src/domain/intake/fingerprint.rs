//! Request fingerprint used as the response cache key.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use super::{EvidenceReferences, Selections};
use crate::domain::evidence::SourceKind;

/// Deterministic hash of a request's meaningful inputs.
///
/// Two requests with the same selections (in any presence-channel order) and
/// the same reference identifiers always share a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestFingerprint(String);

impl RequestFingerprint {
    /// Computes the SHA-256 fingerprint of selections plus references.
    pub fn compute(selections: &Selections, references: &EvidenceReferences) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(selections.canonical_form().as_bytes());

        // Length-prefixed so that no reference value can forge a separator.
        for kind in SourceKind::all() {
            let reference = references.get(*kind).unwrap_or("");
            hasher.update(format!("|{}:{}:", kind, reference.len()).as_bytes());
            hasher.update(reference.as_bytes());
        }

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Wraps an existing key, e.g. one read back from the cache.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
