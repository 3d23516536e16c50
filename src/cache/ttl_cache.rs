use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use serde_json::Value;

use super::{CacheKey, Clock, ExistenceCache, SystemClock};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Concurrent TTL map. Expired entries are dropped lazily when read and in
/// bulk by [`TtlCache::purge_expired`].
pub struct TtlCache {
    entries: DashMap<String, CacheEntry>,
    clock: Arc<dyn Clock>,
}

impl TtlCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Number of physically retained entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[tracing::instrument(name = "Purging expired cache entries", skip(self))]
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let live = entry.is_live(now);
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }

    fn live_value(&self, key: &CacheKey) -> Option<Value> {
        let key = key.to_string();
        let now = self.clock.now();

        if let Some(entry) = self.entries.get(&key) {
            if entry.is_live(now) {
                return Some(entry.value.clone());
            }
        }

        self.entries.remove_if(&key, |_, entry| !entry.is_live(now));
        None
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl ExistenceCache for TtlCache {
    fn has(&self, key: &CacheKey) -> bool {
        self.live_value(key).is_some()
    }

    fn get(&self, key: &CacheKey) -> Option<Value> {
        self.live_value(key)
    }

    fn set(&self, key: CacheKey, value: Value, ttl: Duration) {
        let now = self.clock.now();
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        let expires_at = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.entries
            .insert(key.to_string(), CacheEntry { value, expires_at });
    }

    fn delete(&self, key: &CacheKey) -> bool {
        self.entries.remove(&key.to_string()).is_some()
    }
}
