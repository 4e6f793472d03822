//! Response cache adapters.

mod in_memory;

pub use in_memory::{CacheSettings, InMemoryResponseCache, DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS};
