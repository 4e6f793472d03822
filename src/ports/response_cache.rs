//! Response cache port - memoizes full classification responses.
//!
//! Implementations must be safe under concurrent reads and writes. Operations
//! are synchronous: the cache lives in memory and never suspends a request.

use serde::Serialize;

use crate::domain::classification::ClassificationResponse;
use crate::domain::intake::RequestFingerprint;

/// Port for the bounded, time-expiring response memo.
pub trait ResponseCache: Send + Sync {
    /// Returns the cached response, or `None` if absent or expired.
    fn get(&self, key: &RequestFingerprint) -> Option<ClassificationResponse>;

    /// Stores a response, replacing any previous entry for the key.
    fn set(&self, key: RequestFingerprint, response: ClassificationResponse);

    /// Removes every entry, returning how many were dropped.
    fn clear(&self) -> usize;

    /// Number of stored entries (expired entries may still be counted).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current occupancy and limits.
    fn stats(&self) -> CacheStats;
}

/// Snapshot of cache occupancy and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entries: usize,
    pub max_entries: usize,
    pub ttl_secs: u64,
}
