//! TTL-bounded cache for the station listing response.
//!
//! The directory itself is immutable, so only the serialized listing
//! is cached, keyed by route path with a short TTL. Live departures
//! are deliberately never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

/// Configuration for the listing cache.
#[derive(Debug, Clone)]
pub struct ListingCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries. The listing route uses a
    /// single key, so this stays tiny.
    pub max_capacity: u64,
}

impl Default for ListingCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_capacity: 8,
        }
    }
}

/// Read-through response cache: on miss, compute and store; on hit
/// within the TTL, return the stored value.
pub struct ListingCache {
    entries: MokaCache<String, Arc<serde_json::Value>>,
}

impl ListingCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &ListingCacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    /// Cache-aside lookup: return the value stored under `key`, or run
    /// `compute` and store its result. Concurrent callers for the same
    /// key share a single computation.
    pub async fn get_or_compute<F>(&self, key: &str, compute: F) -> Arc<serde_json::Value>
    where
        F: FnOnce() -> serde_json::Value,
    {
        self.entries
            .get_with(key.to_string(), async move { Arc::new(compute()) })
            .await
    }

    /// Number of live entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Drop all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn computes_on_miss_and_serves_from_cache() {
        let cache = ListingCache::new(&ListingCacheConfig::default());

        let first = cache
            .get_or_compute("/station/", || json!({"Neumarkt": 2}))
            .await;
        assert_eq!(*first, json!({"Neumarkt": 2}));

        // Second call must not recompute.
        let second = cache
            .get_or_compute("/station/", || panic!("should be served from cache"))
            .await;
        assert_eq!(*second, json!({"Neumarkt": 2}));
    }

    #[tokio::test]
    async fn expired_entry_is_recomputed() {
        let config = ListingCacheConfig {
            ttl: Duration::from_millis(10),
            max_capacity: 8,
        };
        let cache = ListingCache::new(&config);

        cache.get_or_compute("/station/", || json!(1)).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let fresh = cache.get_or_compute("/station/", || json!(2)).await;
        assert_eq!(*fresh, json!(2));
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let cache = ListingCache::new(&ListingCacheConfig::default());
        let a = cache.get_or_compute("/a", || json!("a")).await;
        let b = cache.get_or_compute("/b", || json!("b")).await;
        assert_ne!(*a, *b);
    }
}
