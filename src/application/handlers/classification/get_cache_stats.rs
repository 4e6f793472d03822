//! GetCacheStatsHandler - Query handler for cache occupancy.

use std::sync::Arc;

use crate::ports::{CacheStats, ResponseCache};

/// Query for current cache statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetCacheStatsQuery;

pub type GetCacheStatsResult = CacheStats;

pub struct GetCacheStatsHandler {
    cache: Arc<dyn ResponseCache>,
}

impl GetCacheStatsHandler {
    pub fn new(cache: Arc<dyn ResponseCache>) -> Self {
        Self { cache }
    }

    pub fn handle(&self, _query: GetCacheStatsQuery) -> GetCacheStatsResult {
        self.cache.stats()
    }
}
