//! Evidence module - externally sourced corroboration.
//!
//! Nuggets are produced by the enrichment orchestrator and reduced into a
//! single [`EvidenceStrength`] that the scorer blends into confidence.

mod nugget;
mod strength;

pub use nugget::{EvidenceNugget, Relevance, SourceKind};
pub use strength::EvidenceStrength;
