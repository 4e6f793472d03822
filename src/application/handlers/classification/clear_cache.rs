//! ClearCacheHandler - administrative wipe of the response cache.

use std::sync::Arc;

use crate::ports::ResponseCache;

/// Command to drop every cached response.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearCacheCommand;

/// How many entries were removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearCacheResult {
    pub cleared: usize,
}

/// Handler for cache clears. Always succeeds.
pub struct ClearCacheHandler {
    cache: Arc<dyn ResponseCache>,
}

impl ClearCacheHandler {
    pub fn new(cache: Arc<dyn ResponseCache>) -> Self {
        Self { cache }
    }

    pub fn handle(&self, _cmd: ClearCacheCommand) -> ClearCacheResult {
        let cleared = self.cache.clear();
        tracing::info!(cleared, "Response cache cleared");
        ClearCacheResult { cleared }
    }
}
