//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EvidenceSource` - Website / listing / social evidence lookups
//! - `NarrativeGenerator` - Classification → human-readable panes
//! - `ResponseCache` - Bounded, time-expiring response memo

mod evidence_source;
mod narrative_generator;
mod response_cache;

pub use evidence_source::{EvidenceError, EvidenceSource};
pub use narrative_generator::{NarrativeError, NarrativeGenerator, NarrativeRequest};
pub use response_cache::{CacheStats, ResponseCache};
