//! In-process cache layer for record services.
//!
//! # Responsibility
//! - Provide namespaced single-entry slots plus one reserved collection slot
//!   per resource kind.
//! - Keep eviction explicit: no TTL, entries live until evicted or
//!   overwritten.
//!
//! # Invariants
//! - One cache instance serves exactly one resource namespace, so clearing
//!   the namespace is clearing the instance.
//! - Cached values are derived, disposable copies; dropping any entry and
//!   repopulating from the store is always safe.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache contract consumed by the record services.
///
/// Kept as a trait seam so test suites can substitute instrumented
/// implementations and audit eviction behavior.
pub trait ResourceCache<K, V> {
    /// Fetches the single-entry slot for `key`.
    fn get(&self, key: &K) -> Option<V>;

    /// Overwrites the single-entry slot for `key`.
    fn put(&self, key: K, value: V);

    /// Drops the single-entry slot for `key`, if present.
    fn evict(&self, key: &K);

    /// Fetches the reserved collection slot.
    fn get_collection(&self) -> Option<Vec<V>>;

    /// Overwrites the reserved collection slot.
    fn put_collection(&self, values: Vec<V>);

    /// Drops the reserved collection slot.
    fn evict_collection(&self);

    /// Drops every entry in this namespace, collection slot included.
    fn evict_all(&self);
}

/// Counters for cache effectiveness, readable without locking the data.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
}

impl CacheStats {
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }
}

/// In-memory cache backing one resource namespace.
pub struct MemoryCache<K, V> {
    entries: RwLock<HashMap<K, V>>,
    collection: RwLock<Option<Vec<V>>>,
    stats: CacheStats,
}

impl<K, V> MemoryCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            collection: RwLock::new(None),
            stats: CacheStats::default(),
        }
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of live single-entry slots, collection slot excluded.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty() && self.collection.read().is_none()
    }
}

impl<K, V> Default for MemoryCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ResourceCache<K, V> for MemoryCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn get(&self, key: &K) -> Option<V> {
        let found = self.entries.read().get(key).cloned();
        match found {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    fn put(&self, key: K, value: V) {
        self.entries.write().insert(key, value);
        self.stats.record_insert();
    }

    fn evict(&self, key: &K) {
        self.entries.write().remove(key);
    }

    fn get_collection(&self) -> Option<Vec<V>> {
        let found = self.collection.read().clone();
        match found {
            Some(values) => {
                self.stats.record_hit();
                Some(values)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    fn put_collection(&self, values: Vec<V>) {
        *self.collection.write() = Some(values);
        self.stats.record_insert();
    }

    fn evict_collection(&self) {
        *self.collection.write() = None;
    }

    fn evict_all(&self) {
        self.entries.write().clear();
        *self.collection.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryCache, ResourceCache};

    #[test]
    fn get_put_evict_single_slots() {
        let cache: MemoryCache<String, i64> = MemoryCache::new();
        assert_eq!(cache.get(&"a".to_string()), None);

        cache.put("a".to_string(), 1);
        assert_eq!(cache.get(&"a".to_string()), Some(1));

        cache.put("a".to_string(), 2);
        assert_eq!(cache.get(&"a".to_string()), Some(2));

        cache.evict(&"a".to_string());
        assert_eq!(cache.get(&"a".to_string()), None);
    }

    #[test]
    fn collection_slot_is_independent_of_entries() {
        let cache: MemoryCache<String, i64> = MemoryCache::new();
        cache.put("a".to_string(), 1);
        assert_eq!(cache.get_collection(), None);

        cache.put_collection(vec![1, 2, 3]);
        assert_eq!(cache.get_collection(), Some(vec![1, 2, 3]));

        cache.evict_collection();
        assert_eq!(cache.get_collection(), None);
        assert_eq!(cache.get(&"a".to_string()), Some(1));
    }

    #[test]
    fn evict_all_clears_both_kinds_of_slots() {
        let cache: MemoryCache<i64, String> = MemoryCache::new();
        cache.put(1, "one".to_string());
        cache.put_collection(vec!["one".to_string()]);

        cache.evict_all();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get_collection(), None);
    }

    #[test]
    fn stats_track_hits_and_misses() {
        let cache: MemoryCache<i64, i64> = MemoryCache::new();
        cache.get(&1);
        cache.put(1, 10);
        cache.get(&1);

        assert_eq!(cache.stats().misses(), 1);
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().inserts(), 1);
    }
}
