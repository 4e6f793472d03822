//! Intake module - the multiple-choice questionnaire and its request identity.
//!
//! # Components
//!
//! - `values` - Closed vocabularies for each intake question
//! - `Selections` - Validated, immutable answer set
//! - `EvidenceReferences` - Optional website / listing / social identifiers
//! - `RequestFingerprint` - Cache key derived from selections and references

mod fingerprint;
mod references;
mod selections;
mod values;

pub use fingerprint::RequestFingerprint;
pub use references::EvidenceReferences;
pub use selections::{SelectionAnswers, Selections};
pub use values::{BusinessFeeling, CallHandling, Invoicing, PresenceChannel, Scheduling, TeamShape};
