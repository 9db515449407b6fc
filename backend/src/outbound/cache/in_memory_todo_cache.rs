//! Process-local [`TodoCache`] adapter backed by `DashMap`.
//!
//! Used when no Redis URL is configured. An expired entry is dropped on the
//! next read of its key, and every [`SWEEP_INTERVAL`] writes a full sweep
//! removes whatever else has expired, so keys that are never read again do
//! not accumulate.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::ports::{TodoCache, TodoCacheError, TodoCacheKey};

#[derive(Debug, Clone)]
struct CachedEntry {
    data: String,
    cached_at: Instant,
    ttl: Duration,
}

impl CachedEntry {
    fn new(data: String, ttl: Duration) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.cached_at.elapsed() >= self.ttl
    }
}

/// Number of writes between full sweeps of expired entries.
pub const SWEEP_INTERVAL: usize = 256;

/// In-process cache; clones share the same map.
#[derive(Debug, Clone)]
pub struct InMemoryTodoCache {
    entries: Arc<DashMap<String, CachedEntry>>,
    writes: Arc<AtomicUsize>,
    sweep_interval: usize,
}

impl Default for InMemoryTodoCache {
    fn default() -> Self {
        Self::with_sweep_interval(SWEEP_INTERVAL)
    }
}

impl InMemoryTodoCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache that sweeps expired entries every `interval`
    /// writes. An interval of zero is treated as one.
    #[must_use]
    pub fn with_sweep_interval(interval: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            writes: Arc::new(AtomicUsize::new(0)),
            sweep_interval: interval.max(1),
        }
    }

    fn purge_expired(&self) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed, "expired cache entries swept");
        }
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl TodoCache for InMemoryTodoCache {
    async fn get(&self, key: &TodoCacheKey) -> Result<Option<String>, TodoCacheError> {
        let live = self
            .entries
            .get(key.as_str())
            .map(|entry| (!entry.is_expired()).then(|| entry.data.clone()));
        match live {
            Some(Some(data)) => Ok(Some(data)),
            Some(None) => {
                self.entries
                    .remove_if(key.as_str(), |_, entry| entry.is_expired());
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &TodoCacheKey,
        payload: &str,
        ttl: Duration,
    ) -> Result<(), TodoCacheError> {
        self.entries.insert(
            key.as_str().to_owned(),
            CachedEntry::new(payload.to_owned(), ttl),
        );
        let written = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if written % self.sweep_interval == 0 {
            self.purge_expired();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TodoId;
    use rstest::{fixture, rstest};

    #[fixture]
    fn key() -> TodoCacheKey {
        TodoCacheKey::item(TodoId::new(7).expect("valid id"))
    }

    #[rstest]
    #[tokio::test]
    async fn returns_stored_payload(key: TodoCacheKey) {
        let cache = InMemoryTodoCache::new();
        cache
            .set(&key, "{\"id\":7}", Duration::from_secs(60))
            .await
            .expect("set succeeds");

        let value = cache.get(&key).await.expect("get succeeds");
        assert_eq!(value.as_deref(), Some("{\"id\":7}"));
    }

    #[rstest]
    #[tokio::test]
    async fn set_replaces_previous_value(key: TodoCacheKey) {
        let cache = InMemoryTodoCache::new();
        let ttl = Duration::from_secs(60);
        cache.set(&key, "old", ttl).await.expect("first set");
        cache.set(&key, "new", ttl).await.expect("second set");

        assert_eq!(cache.get(&key).await.expect("get").as_deref(), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn expired_entries_miss_and_are_evicted(key: TodoCacheKey) {
        let cache = InMemoryTodoCache::new();
        cache
            .set(&key, "stale", Duration::ZERO)
            .await
            .expect("set succeeds");

        assert!(cache.get(&key).await.expect("get succeeds").is_none());
        assert!(cache.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_key_misses(key: TodoCacheKey) {
        let cache = InMemoryTodoCache::new();
        assert!(cache.get(&key).await.expect("get succeeds").is_none());
    }

    #[tokio::test]
    async fn writes_sweep_entries_that_are_never_read_again() {
        let cache = InMemoryTodoCache::with_sweep_interval(8);
        for id in 1..8 {
            let key = TodoCacheKey::item(TodoId::new(id).expect("valid id"));
            cache
                .set(&key, "short-lived", Duration::from_millis(1))
                .await
                .expect("set succeeds");
        }
        assert_eq!(cache.len(), 7);
        tokio::time::sleep(Duration::from_millis(20)).await;

        let keep = TodoCacheKey::item(TodoId::new(100).expect("valid id"));
        cache
            .set(&keep, "fresh", Duration::from_secs(60))
            .await
            .expect("set succeeds");

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&keep).await.expect("get").as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn sweep_keeps_live_entries() {
        let cache = InMemoryTodoCache::with_sweep_interval(2);
        let ttl = Duration::from_secs(60);
        for id in 1..=4 {
            let key = TodoCacheKey::item(TodoId::new(id).expect("valid id"));
            cache.set(&key, "live", ttl).await.expect("set succeeds");
        }
        assert_eq!(cache.len(), 4);
    }

    #[tokio::test]
    async fn default_cache_bounds_growth_at_the_sweep_interval() {
        let cache = InMemoryTodoCache::new();
        for id in 1..=i64::try_from(SWEEP_INTERVAL).expect("interval fits i64") {
            let key = TodoCacheKey::item(TodoId::new(id).expect("valid id"));
            cache
                .set(&key, "stale", Duration::ZERO)
                .await
                .expect("set succeeds");
        }
        assert!(cache.is_empty());
    }
}
