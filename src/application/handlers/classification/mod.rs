//! Classification command and query handlers.

mod classify_business;
mod clear_cache;
mod enrichment_orchestrator;
mod get_cache_stats;

pub use classify_business::{
    ClassifyBusinessCommand, ClassifyBusinessHandler, ClassifyBusinessResult,
    DEFAULT_NARRATIVE_TIMEOUT,
};
pub use clear_cache::{ClearCacheCommand, ClearCacheHandler, ClearCacheResult};
pub use enrichment_orchestrator::{
    EnrichmentOrchestrator, EnrichmentOutcome, DEFAULT_ENRICHMENT_DEADLINE,
};
pub use get_cache_stats::{GetCacheStatsHandler, GetCacheStatsQuery, GetCacheStatsResult};
