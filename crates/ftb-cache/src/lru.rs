//! Bounded least-recently-used memoization.
//!
//! Each entry carries a monotonically increasing access tick; a `BTreeMap`
//! from tick to key gives the eviction order. Lookups and inserts are
//! O(log n) in the number of entries, which at the default capacity of 999
//! is well below the cost of re-reading a table from disk.
//!
//! # Thread safety
//!
//! Not thread-safe. Reads take `&mut self` because they refresh recency;
//! each owner keeps its own instance.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::hash::Hash;

use ahash::AHashMap;

/// Default entry bound, matching the metadata accessors' memo size.
pub const DEFAULT_CAPACITY: usize = 999;

#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    tick: u64,
}

/// Fixed-capacity map that evicts the least recently used entry when full.
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    capacity: usize,
    tick: u64,
    entries: AHashMap<K, Slot<V>>,
    order: BTreeMap<u64, K>,
    hits: u64,
    misses: u64,
}

impl<K: Eq + Hash + Clone, V> LruCache<K, V> {
    /// Create an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of zero memoizes nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tick: 0,
            entries: AHashMap::with_capacity(capacity.min(1024)),
            order: BTreeMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up `key`, marking it most recently used on a hit.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let tick = self.next_tick();
        let Some(slot) = self.entries.get_mut(key) else {
            self.misses += 1;
            return None;
        };
        self.hits += 1;
        let previous = std::mem::replace(&mut slot.tick, tick);
        if let Some(k) = self.order.remove(&previous) {
            self.order.insert(tick, k);
        }
        Some(&slot.value)
    }

    /// Whether `key` is cached, without touching recency or counters.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Insert or replace `key`, evicting the least recently used entry if full.
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        let tick = self.next_tick();
        if let Some(slot) = self.entries.get_mut(&key) {
            let previous = std::mem::replace(&mut slot.tick, tick);
            slot.value = value;
            self.order.remove(&previous);
            self.order.insert(tick, key);
            return;
        }
        if self.entries.len() >= self.capacity
            && let Some((_, oldest)) = self.order.pop_first()
        {
            self.entries.remove(&oldest);
        }
        self.order.insert(tick, key.clone());
        self.entries.insert(key, Slot { value, tick });
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that fell through to the caller.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

impl<K: Eq + Hash + Clone, V> Default for LruCache<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_and_miss_counters() {
        let mut cache: LruCache<String, u32> = LruCache::new(4);
        assert!(cache.get("a").is_none());
        cache.insert("a".into(), 1);
        assert_eq!(cache.get("a"), Some(&1));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache: LruCache<String, u32> = LruCache::new(2);
        cache.insert("a".into(), 1);
        cache.insert("b".into(), 2);
        // Touch "a" so "b" becomes the oldest.
        assert_eq!(cache.get("a"), Some(&1));
        cache.insert("c".into(), 3);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn replace_refreshes_recency() {
        let mut cache: LruCache<&str, u32> = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 10);
        cache.insert("c", 3);
        assert_eq!(cache.get("a"), Some(&10));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache: LruCache<&str, u32> = LruCache::new(0);
        cache.insert("a", 1);
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn clear_keeps_counters() {
        let mut cache: LruCache<&str, u32> = LruCache::new(4);
        cache.insert("a", 1);
        assert!(cache.get("a").is_some());
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn bounded_under_churn() {
        let mut cache: LruCache<u32, u32> = LruCache::new(DEFAULT_CAPACITY);
        for i in 0..5_000 {
            cache.insert(i, i);
        }
        assert_eq!(cache.len(), DEFAULT_CAPACITY);
        assert!(cache.contains(&4_999));
        assert!(!cache.contains(&0));
    }
}
