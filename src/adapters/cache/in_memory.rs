//! In-memory response cache.
//!
//! A mutex-guarded map plus an insertion-order queue. Entries expire after a
//! fixed TTL and the oldest insertion is evicted once capacity is reached.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use chrono::Duration;

use crate::domain::classification::ClassificationResponse;
use crate::domain::foundation::Timestamp;
use crate::domain::intake::RequestFingerprint;
use crate::ports::{CacheStats, ResponseCache};

/// Default number of entries retained.
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Default time-to-live (24 hours).
pub const DEFAULT_TTL_SECS: u64 = 24 * 60 * 60;

/// Limits applied by the in-memory cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub max_entries: usize,
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    response: ClassificationResponse,
    created_at: Timestamp,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<RequestFingerprint, CacheEntry>,
    /// Keys from oldest to newest insertion.
    order: VecDeque<RequestFingerprint>,
}

impl CacheState {
    fn remove(&mut self, key: &RequestFingerprint) {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }

    fn prune_expired_head(&mut self, ttl: Duration, now: &Timestamp) {
        while let Some(oldest) = self.order.front() {
            let expired = self
                .entries
                .get(oldest)
                .map_or(true, |entry| entry.created_at.has_expired(ttl, now));
            if !expired {
                break;
            }
            if let Some(key) = self.order.pop_front() {
                self.entries.remove(&key);
            }
        }
    }
}

/// Bounded, time-expiring response memo.
///
/// Safe to share across request tasks behind an `Arc`. A poisoned lock is
/// recovered rather than propagated: the state is always left consistent
/// between operations.
#[derive(Debug)]
pub struct InMemoryResponseCache {
    settings: CacheSettings,
    state: Mutex<CacheState>,
}

impl InMemoryResponseCache {
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            settings,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(CacheSettings::default())
    }

    fn ttl(&self) -> Duration {
        let secs = i64::try_from(self.settings.ttl_secs).unwrap_or(i64::MAX);
        Duration::seconds(secs.min(i64::MAX / 1000))
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn get_at(&self, key: &RequestFingerprint, now: &Timestamp) -> Option<ClassificationResponse> {
        let ttl = self.ttl();
        let mut state = self.lock();

        let expired = match state.entries.get(key) {
            None => return None,
            Some(entry) => entry.created_at.has_expired(ttl, now),
        };

        if expired {
            state.remove(key);
            tracing::debug!(fingerprint = %key, "Cache entry expired");
            return None;
        }

        state.entries.get(key).map(|entry| entry.response.clone())
    }

    fn set_at(&self, key: RequestFingerprint, response: ClassificationResponse, now: Timestamp) {
        if self.settings.max_entries == 0 {
            return;
        }

        let ttl = self.ttl();
        let mut state = self.lock();
        state.prune_expired_head(ttl, &now);

        if state.entries.contains_key(&key) {
            // Overwrite: re-queued as the newest insertion.
            state.order.retain(|k| k != &key);
        } else if state.entries.len() >= self.settings.max_entries {
            if let Some(oldest) = state.order.pop_front() {
                state.entries.remove(&oldest);
                tracing::debug!(fingerprint = %oldest, "Evicted oldest cache entry");
            }
        }

        state.order.push_back(key.clone());
        state.entries.insert(
            key,
            CacheEntry {
                response,
                created_at: now,
            },
        );
    }
}

impl Default for InMemoryResponseCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ResponseCache for InMemoryResponseCache {
    fn get(&self, key: &RequestFingerprint) -> Option<ClassificationResponse> {
        self.get_at(key, &Timestamp::now())
    }

    fn set(&self, key: RequestFingerprint, response: ClassificationResponse) {
        self.set_at(key, response, Timestamp::now());
    }

    fn clear(&self) -> usize {
        let mut state = self.lock();
        let cleared = state.entries.len();
        state.entries.clear();
        state.order.clear();
        cleared
    }

    fn len(&self) -> usize {
        self.lock().entries.len()
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            max_entries: self.settings.max_entries,
            ttl_secs: self.settings.ttl_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::{ResponseMetadata, ScoringInput, SignalScorer};
    use crate::domain::intake::{
        BusinessFeeling, CallHandling, Invoicing, PresenceChannel, Scheduling, Selections,
        TeamShape,
    };
    use std::sync::Arc;

    fn sample_response(label: &str) -> ClassificationResponse {
        let selections = Selections::new(
            [PresenceChannel::Website],
            TeamShape::SmallTeam,
            Scheduling::SharedCalendar,
            Invoicing::Spreadsheet,
            CallHandling::OwnerAnswers,
            BusinessFeeling::Steady,
        )
        .unwrap();
        let classification = SignalScorer::new().score(&ScoringInput::new(&selections));

        ClassificationResponse {
            panes: None,
            classification,
            nuggets: vec![],
            metadata: ResponseMetadata {
                total_execution_time_ms: 1,
                scoring_time_ms: 0,
                enrichment_time_ms: None,
                cache_hit: false,
                version: label.to_string(),
            },
        }
    }

    fn key(n: usize) -> RequestFingerprint {
        RequestFingerprint::from_raw(format!("key-{}", n))
    }

    fn small_cache(max_entries: usize) -> InMemoryResponseCache {
        InMemoryResponseCache::new(CacheSettings {
            max_entries,
            ttl_secs: 60,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Basic operations
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn get_returns_none_for_missing_key() {
        let cache = InMemoryResponseCache::with_defaults();
        assert!(cache.get(&key(1)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn set_then_get_returns_stored_response() {
        let cache = InMemoryResponseCache::with_defaults();
        let response = sample_response("a");

        cache.set(key(1), response.clone());

        assert_eq!(cache.get(&key(1)), Some(response));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn overwrite_replaces_response() {
        let cache = InMemoryResponseCache::with_defaults();
        cache.set(key(1), sample_response("first"));
        cache.set(key(1), sample_response("second"));

        let stored = cache.get(&key(1)).unwrap();
        assert_eq!(stored.metadata.version, "second");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_removes_everything_and_reports_count() {
        let cache = InMemoryResponseCache::with_defaults();
        for n in 0..5 {
            cache.set(key(n), sample_response("x"));
        }

        assert_eq!(cache.clear(), 5);
        assert!(cache.is_empty());
        assert!(cache.get(&key(0)).is_none());
        assert_eq!(cache.clear(), 0);
    }

    #[test]
    fn stats_reflect_settings_and_occupancy() {
        let cache = small_cache(3);
        cache.set(key(1), sample_response("x"));

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.max_entries, 3);
        assert_eq!(stats.ttl_secs, 60);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Capacity
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn inserting_past_capacity_evicts_oldest() {
        let cache = InMemoryResponseCache::with_defaults();
        for n in 0..=DEFAULT_MAX_ENTRIES {
            cache.set(key(n), sample_response("x"));
        }

        assert_eq!(cache.len(), DEFAULT_MAX_ENTRIES);
        assert!(cache.get(&key(0)).is_none());
        assert!(cache.get(&key(1)).is_some());
        assert!(cache.get(&key(DEFAULT_MAX_ENTRIES)).is_some());
    }

    #[test]
    fn overwrite_at_capacity_does_not_evict() {
        let cache = small_cache(2);
        cache.set(key(1), sample_response("x"));
        cache.set(key(2), sample_response("x"));
        cache.set(key(1), sample_response("y"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key(2)).is_some());
    }

    #[test]
    fn overwrite_counts_as_fresh_insertion() {
        let cache = small_cache(2);
        cache.set(key(1), sample_response("x"));
        cache.set(key(2), sample_response("x"));
        cache.set(key(1), sample_response("y"));
        cache.set(key(3), sample_response("x"));

        assert!(cache.get(&key(2)).is_none());
        assert!(cache.get(&key(1)).is_some());
        assert!(cache.get(&key(3)).is_some());
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let cache = small_cache(0);
        cache.set(key(1), sample_response("x"));
        assert!(cache.is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Expiry
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn entry_is_absent_after_ttl_and_physically_removed() {
        let cache = small_cache(10);
        let start = Timestamp::from_unix_secs(1_700_000_000);
        cache.set_at(key(1), sample_response("x"), start);

        assert!(cache.get_at(&key(1), &start.plus_secs(59)).is_some());
        assert!(cache.get_at(&key(1), &start.plus_secs(60)).is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn set_prunes_expired_entries_at_head() {
        let cache = small_cache(10);
        let start = Timestamp::from_unix_secs(1_700_000_000);
        cache.set_at(key(1), sample_response("x"), start);
        cache.set_at(key(2), sample_response("x"), start.plus_secs(30));

        cache.set_at(key(3), sample_response("x"), start.plus_secs(70));

        assert_eq!(cache.len(), 2);
        assert!(cache.get_at(&key(1), &start.plus_secs(70)).is_none());
        assert!(cache.get_at(&key(2), &start.plus_secs(70)).is_some());
    }

    #[test]
    fn default_ttl_is_one_day() {
        let cache = InMemoryResponseCache::with_defaults();
        let start = Timestamp::from_unix_secs(1_700_000_000);
        cache.set_at(key(1), sample_response("x"), start);

        assert!(cache.get_at(&key(1), &start.plus_secs(DEFAULT_TTL_SECS - 1)).is_some());
        assert!(cache.get_at(&key(1), &start.plus_secs(DEFAULT_TTL_SECS)).is_none());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Concurrency
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn concurrent_writers_respect_capacity() {
        let cache = Arc::new(small_cache(16));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for n in 0..50 {
                        cache.set(key(t * 1000 + n), sample_response("x"));
                        let _ = cache.get(&key(t * 1000 + n));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 16);
    }
}
