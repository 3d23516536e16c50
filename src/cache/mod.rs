//! Process-local existence cache.
//!
//! Records that a post or comment is known to exist, and holds per-post
//! comment lists, for a fixed time-to-live. Only positive results are ever
//! stored. Capacity is unbounded: keys are short and the TTL bounds growth,
//! with [`run_cache_sweeper`] reclaiming expired entries in the background.

mod clock;
mod keys;
mod sweeper;
mod ttl_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use keys::CacheKey;
pub use sweeper::run_cache_sweeper;
pub use ttl_cache::TtlCache;

use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

pub trait ExistenceCache: Send + Sync {
    /// True when an unexpired entry exists. Agrees with [`ExistenceCache::get`].
    fn has(&self, key: &CacheKey) -> bool;

    fn get(&self, key: &CacheKey) -> Option<Value>;

    fn set(&self, key: CacheKey, value: Value, ttl: Duration);

    /// Returns whether an entry was removed.
    fn delete(&self, key: &CacheKey) -> bool;
}
