//! Id-keyed record cache, one region per vehicle kind
//!
//! Reads populate the cache, saves write through to it and deletes evict
//! from it. Concurrent requests on the same id are not serialized, so a read
//! racing a delete may briefly observe a stale record. Reads fill the cache
//! through [`RegionCache::put_if_current`], which refuses an entry loaded
//! before the latest eviction.

use crate::models::{CacheConfig, CacheStats, CachedEntry};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::RwLock;
use tracing::debug;

/// Cache region holding records of one kind
pub struct RegionCache<T> {
    region: &'static str,
    entries: RwLock<HashMap<i64, CachedEntry<T>>>,
    config: CacheConfig,
    stats: Mutex<CacheStats>,
    /// Bumped on every eviction
    generation: AtomicU64,
}

impl<T: Clone + Send + Sync> RegionCache<T> {
    pub fn new(region: &'static str, config: CacheConfig) -> Self {
        Self {
            region,
            entries: RwLock::new(HashMap::new()),
            config,
            stats: Mutex::new(CacheStats::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Region name, e.g. `cars`
    pub fn region(&self) -> &'static str {
        self.region
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Look up a live entry
    pub async fn get(&self, id: i64) -> Option<T> {
        if !self.config.enabled {
            return None;
        }

        {
            let entries = self.entries.read().await;
            match entries.get(&id) {
                Some(cached) if !cached.is_expired() => {
                    self.stats_mut().hits += 1;
                    return Some(cached.data.clone());
                }
                Some(_) => {}
                None => {
                    self.stats_mut().misses += 1;
                    return None;
                }
            }
        }

        // Expired: drop it so the next read goes to storage
        let mut entries = self.entries.write().await;
        if entries.get(&id).is_some_and(|cached| cached.is_expired()) {
            entries.remove(&id);
        }
        let mut stats = self.stats_mut();
        stats.misses += 1;
        stats.size = entries.len();
        None
    }

    /// Store or replace the entry for `id`
    pub async fn put(&self, id: i64, data: T) {
        if !self.config.enabled {
            return;
        }

        let mut entries = self.entries.write().await;
        self.insert(&mut entries, id, data);
    }

    /// Current eviction generation; capture it before reading from storage
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Store the entry only if nothing was evicted since `generation`
    ///
    /// Returns whether the entry was stored.
    pub async fn put_if_current(&self, id: i64, data: T, generation: u64) -> bool {
        if !self.config.enabled {
            return false;
        }

        let mut entries = self.entries.write().await;
        if self.generation() != generation {
            debug!(region = self.region, id, "Skipped caching record loaded before an eviction");
            return false;
        }
        self.insert(&mut entries, id, data);
        true
    }

    fn insert(&self, entries: &mut HashMap<i64, CachedEntry<T>>, id: i64, data: T) {
        let mut evicted = 0;
        if let Some(max) = self.config.max_entries {
            while !entries.contains_key(&id) && !entries.is_empty() && entries.len() >= max {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, cached)| cached.cached_at)
                    .map(|(key, _)| *key);
                match oldest {
                    Some(key) => {
                        entries.remove(&key);
                        evicted += 1;
                    }
                    None => break,
                }
            }
        }
        entries.insert(id, CachedEntry::new(data, self.config.default_ttl));

        let mut stats = self.stats_mut();
        stats.evictions += evicted;
        stats.size = entries.len();
        debug!(region = self.region, id, "Cached record");
    }

    /// Remove the entry for `id`; returns whether one was present
    pub async fn evict(&self, id: i64) -> bool {
        let mut entries = self.entries.write().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        let removed = entries.remove(&id).is_some();

        let mut stats = self.stats_mut();
        if removed {
            stats.evictions += 1;
        }
        stats.size = entries.len();
        debug!(region = self.region, id, removed, "Evicted record");
        removed
    }

    /// Drop every entry in the region
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
        self.stats_mut().size = 0;
    }

    pub fn stats(&self) -> CacheStats {
        self.stats_mut().clone()
    }

    fn stats_mut(&self) -> MutexGuard<'_, CacheStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache = RegionCache::new("cars", CacheConfig::default());

        assert_eq!(cache.get(1).await, None::<String>);
        cache.put(1, "corolla".to_string()).await;
        assert_eq!(cache.get(1).await, Some("corolla".to_string()));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn test_evict_removes_entry() {
        let cache = RegionCache::new("trucks", CacheConfig::default());
        cache.put(7, 7u32).await;

        assert!(cache.evict(7).await);
        assert!(!cache.evict(7).await);
        assert_eq!(cache.get(7).await, None);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[tokio::test]
    async fn test_put_if_current_refuses_entry_loaded_before_eviction() {
        let cache = RegionCache::new("cars", CacheConfig::default());
        let before = cache.generation();

        cache.evict(4).await;
        assert!(!cache.put_if_current(4, 4u32, before).await);
        assert_eq!(cache.get(4).await, None);

        assert!(cache.put_if_current(4, 4u32, cache.generation()).await);
        assert_eq!(cache.get(4).await, Some(4));
    }

    #[tokio::test]
    async fn test_disabled_cache_stores_nothing() {
        let cache = RegionCache::new("cars", CacheConfig::disabled());
        cache.put(1, 1u32).await;

        assert_eq!(cache.get(1).await, None);
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = RegionCache::new("cars", CacheConfig::default().with_ttl(Duration::ZERO));
        cache.put(1, 1u32).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert_eq!(cache.get(1).await, None);
        assert_eq!(cache.stats().size, 0);
    }

    #[tokio::test]
    async fn test_capacity_drops_oldest() {
        let cache = RegionCache::new("motorcycles", CacheConfig::default().with_max_entries(2));
        cache.put(1, 1u32).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.put(2, 2u32).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.put(3, 3u32).await;

        assert_eq!(cache.get(1).await, None);
        assert_eq!(cache.get(2).await, Some(2));
        assert_eq!(cache.get(3).await, Some(3));
        assert_eq!(cache.stats().size, 2);
    }

    #[tokio::test]
    async fn test_replacing_entry_does_not_evict() {
        let cache = RegionCache::new("cars", CacheConfig::default().with_max_entries(1));
        cache.put(1, 1u32).await;
        cache.put(1, 10u32).await;

        assert_eq!(cache.get(1).await, Some(10));
        assert_eq!(cache.stats().evictions, 0);
    }
}
