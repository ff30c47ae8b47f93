//! In-memory query cache with prefix invalidation.
//!
//! Read endpoints store their serialized result under a [`CacheKey`]; writes
//! invalidate every key under a prefix, so `invalidate(["users"])` drops all
//! cached user searches at once. Invalidation is idempotent and safe to call
//! for keys that were never stored.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Default time-to-live for cached entries.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Default upper bound on the number of cached entries.
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 1_000;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Hierarchical cache key, e.g. `users/jane`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(Vec<String>);

impl CacheKey {
    /// A single-segment key.
    pub fn root(segment: &str) -> Self {
        Self(vec![segment.to_string()])
    }

    /// Extend this key by one segment.
    pub fn with(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    /// True when `prefix` is equal to, or a leading part of, this key.
    pub fn starts_with(&self, prefix: &CacheKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Well-known cache keys used by the read endpoints.
pub mod keys {
    use super::CacheKey;

    pub fn articles() -> CacheKey {
        CacheKey::root("articles")
    }

    pub fn stats() -> CacheKey {
        CacheKey::root("stats")
    }

    pub fn users() -> CacheKey {
        CacheKey::root("users")
    }

    pub fn user_search(term: &str) -> CacheKey {
        users().with(term)
    }

    pub fn ads() -> CacheKey {
        CacheKey::root("ads")
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Shared query cache. Wrap in `Arc` to share between handlers.
///
/// Entries expire `ttl` after they were stored and the store never holds
/// more than its capacity; both are enforced by [`moka`], which also evicts
/// expired entries during its housekeeping.
pub struct QueryCache {
    entries: Cache<CacheKey, serde_json::Value>,
    ttl: Duration,
}

impl QueryCache {
    /// Create a cache whose entries expire after `ttl` and which holds at
    /// most `max_capacity` entries. A zero TTL disables caching.
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl.max(Duration::from_millis(1)))
            .build();
        Self { entries, ttl }
    }

    /// Read a fresh entry. Missing, expired, or undecodable entries yield `None`.
    pub async fn read<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let value = self.entries.get(key).await?;
        serde_json::from_value(value).ok()
    }

    /// Store a value under `key`, replacing any previous entry.
    pub async fn store<T: Serialize>(&self, key: CacheKey, value: &T) {
        if self.ttl.is_zero() {
            return;
        }
        let Ok(value) = serde_json::to_value(value) else {
            return;
        };
        self.entries.insert(key, value).await;
    }

    /// Drop every entry whose key starts with `prefix`. Returns how many were removed.
    pub async fn invalidate(&self, prefix: &CacheKey) -> usize {
        let matching: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| CacheKey::clone(&key))
            .collect();

        let mut removed = 0;
        for key in matching {
            if self.entries.remove(&key).await.is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Invalidate several prefixes in one go.
    pub async fn invalidate_all(&self, prefixes: &[CacheKey]) -> usize {
        let mut removed = 0;
        for prefix in prefixes {
            removed += self.invalidate(prefix).await;
        }
        removed
    }

    /// Return the cached value for `key`, or run `load` and cache its result.
    ///
    /// Errors from `load` are returned as-is and nothing is cached.
    pub async fn get_or_load<T, E, F, Fut>(&self, key: CacheKey, load: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.read::<T>(&key).await {
            return Ok(hit);
        }
        let value = load().await?;
        self.store(key, &value).await;
        Ok(value)
    }

    /// Number of entries held after pending evictions have run.
    pub async fn len(&self) -> usize {
        self.entries.run_pending_tasks().await;
        usize::try_from(self.entries.entry_count()).unwrap_or(usize::MAX)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            DEFAULT_CACHE_MAX_ENTRIES,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matching() {
        let search = keys::user_search("jane");
        assert!(search.starts_with(&keys::users()));
        assert!(search.starts_with(&search));
        assert!(!keys::users().starts_with(&search));
        assert!(!keys::articles().starts_with(&keys::users()));
        assert_eq!(search.to_string(), "users/jane");
    }

    #[tokio::test]
    async fn store_then_read() {
        let cache = QueryCache::default();
        cache.store(keys::articles(), &vec![1, 2, 3]).await;
        let hit: Option<Vec<i32>> = cache.read(&keys::articles()).await;
        assert_eq!(hit, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn invalidate_removes_whole_prefix() {
        let cache = QueryCache::default();
        cache.store(keys::user_search("ann"), &1).await;
        cache.store(keys::user_search("bob"), &2).await;
        cache.store(keys::stats(), &3).await;

        assert_eq!(cache.invalidate(&keys::users()).await, 2);
        assert_eq!(cache.len().await, 1);
        assert!(cache.read::<i32>(&keys::user_search("ann")).await.is_none());
        assert_eq!(cache.read::<i32>(&keys::stats()).await, Some(3));
    }

    #[tokio::test]
    async fn invalidate_is_idempotent() {
        let cache = QueryCache::default();
        cache.store(keys::ads(), &"x").await;
        assert_eq!(cache.invalidate(&keys::ads()).await, 1);
        assert_eq!(cache.invalidate(&keys::ads()).await, 0);
        assert_eq!(cache.invalidate(&keys::articles()).await, 0);
    }

    #[tokio::test]
    async fn zero_ttl_disables_caching() {
        let cache = QueryCache::new(Duration::ZERO, DEFAULT_CACHE_MAX_ENTRIES);
        cache.store(keys::stats(), &1).await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn expired_searches_are_evicted() {
        let cache = QueryCache::new(Duration::from_millis(20), DEFAULT_CACHE_MAX_ENTRIES);
        for i in 0..200 {
            let loaded: Result<usize, ()> = cache
                .get_or_load(keys::user_search(&format!("query{i}")), || async move { Ok(i) })
                .await;
            assert_eq!(loaded, Ok(i));
        }

        tokio::time::sleep(Duration::from_millis(60)).await;
        cache.store(keys::user_search("latest"), &1).await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.read::<usize>(&keys::user_search("query0")).await.is_none());
    }

    #[tokio::test]
    async fn capacity_bounds_distinct_keys() {
        let cache = QueryCache::new(Duration::from_secs(60), 50);
        for i in 0..500 {
            cache.store(keys::user_search(&format!("term{i}")), &i).await;
        }
        assert!(cache.len().await <= 50);
    }

    #[tokio::test]
    async fn get_or_load_runs_loader_once() {
        let cache = QueryCache::default();
        let first: Result<i32, ()> = cache.get_or_load(keys::stats(), || async { Ok(7) }).await;
        assert_eq!(first, Ok(7));

        // A hit returns the cached value, not the new loader's.
        let second: Result<i32, ()> = cache.get_or_load(keys::stats(), || async { Ok(99) }).await;
        assert_eq!(second, Ok(7));
    }

    #[tokio::test]
    async fn loader_errors_are_not_cached() {
        let cache = QueryCache::default();
        let failed: Result<i32, &str> =
            cache.get_or_load(keys::ads(), || async { Err("boom") }).await;
        assert_eq!(failed, Err("boom"));
        assert!(cache.is_empty().await);
    }
}
