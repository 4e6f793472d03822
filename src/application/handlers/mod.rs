//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod classification;

pub use classification::{
    ClassifyBusinessCommand, ClassifyBusinessHandler, ClassifyBusinessResult, ClearCacheCommand,
    ClearCacheHandler, ClearCacheResult, EnrichmentOrchestrator, EnrichmentOutcome,
    GetCacheStatsHandler, GetCacheStatsQuery, GetCacheStatsResult, DEFAULT_ENRICHMENT_DEADLINE,
    DEFAULT_NARRATIVE_TIMEOUT,
};
