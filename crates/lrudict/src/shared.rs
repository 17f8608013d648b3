//! SharedLruDict: a cloneable, lock-serialized handle over [`LruDict`]
//!
//! The core dictionary mutates its list on every `get`, so every operation
//! that touches recency takes the write lock. Values are cloned out rather
//! than borrowed.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::bound::Capacity;
use crate::config::DictConfig;
use crate::dict::LruDict;
use crate::stats::CacheStats;

/// Thread-shareable LRU dictionary with access statistics
pub struct SharedLruDict<K, V> {
    /// Serialized core dictionary
    dict: Arc<RwLock<LruDict<K, V>>>,

    /// Access statistics
    stats: Arc<CacheStats>,
}

impl<K, V> Clone for SharedLruDict<K, V> {
    fn clone(&self) -> Self {
        Self {
            dict: Arc::clone(&self.dict),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<K, V> SharedLruDict<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create an empty shared dictionary with the given capacity
    pub fn new(capacity: impl Into<Capacity>) -> Self {
        Self::from_dict(LruDict::new(capacity))
    }

    /// Create an empty shared dictionary from configuration
    pub fn from_config(config: &DictConfig) -> Self {
        Self::from_dict(LruDict::from_config(config))
    }

    /// Wrap an existing dictionary
    pub fn from_dict(dict: LruDict<K, V>) -> Self {
        Self {
            dict: Arc::new(RwLock::new(dict)),
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Insert `value` under `key` as the most recently used entry.
    ///
    /// See [`LruDict::set`]; a write the dictionary had no room for is
    /// counted in [`CacheStats::dropped`].
    pub fn set(&self, key: K, value: V) -> &Self {
        let mut dict = self.dict.write();
        let before = dict.evictions();

        dict.set(key.clone(), value);

        if dict.contains_key(&key) {
            self.stats.record_insert();
        } else {
            self.stats.record_dropped();
        }
        self.stats.record_evictions(dict.evictions() - before);
        self
    }

    /// Get a clone of a value and mark it most recently used
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut dict = self.dict.write();
        match dict.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Get a clone of a value without touching recency
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dict.read().peek(key).cloned()
    }

    /// Delete an entry; returns whether one was removed
    pub fn del<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dict.write().del(key)
    }

    /// Delete an entry and hand back its value
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dict.write().remove(key)
    }

    /// Check for a key without touching recency
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dict.read().contains_key(key)
    }

    /// Snapshot of keys, least recently used first
    pub fn keys(&self) -> Vec<K> {
        self.dict.read().keys()
    }

    /// Snapshot of values, least recently used first
    pub fn vals(&self) -> Vec<V> {
        self.dict.read().vals()
    }

    /// Snapshot of `(key, value)` pairs taken under a single lock
    pub fn entries(&self) -> Vec<(K, V)> {
        self.dict
            .read()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Current capacity
    pub fn capacity(&self) -> Capacity {
        self.dict.read().capacity()
    }

    /// Replace the capacity, evicting entries that no longer fit
    pub fn set_capacity(&self, capacity: impl Into<Capacity>) {
        let mut dict = self.dict.write();
        let before = dict.evictions();
        dict.set_capacity(capacity);
        self.stats.record_evictions(dict.evictions() - before);
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.dict.read().len()
    }

    /// Check if the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.dict.read().is_empty()
    }

    /// Trim to at most `len` entries; see [`LruDict::set_len`]
    pub fn set_len(&self, len: usize) {
        let mut dict = self.dict.write();
        let before = dict.evictions();
        dict.set_len(len);
        self.stats.record_evictions(dict.evictions() - before);
    }

    /// Get access statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Remove all entries and reset statistics
    pub fn clear(&self) {
        let mut dict = self.dict.write();
        let dropped = dict.len();
        dict.clear();
        self.stats.reset();
        debug!(dropped, "shared dictionary cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_basic() {
        let dict = SharedLruDict::new(10);
        dict.set("foo", 42).set("bar", 43);

        assert_eq!(dict.get("foo"), Some(42));
        assert_eq!(dict.keys(), vec!["bar", "foo"]);
        assert_eq!(dict.vals(), vec![43, 42]);
        assert_eq!(dict.entries(), vec![("bar", 43), ("foo", 42)]);
        assert_eq!(dict.stats().hits(), 1);
        assert_eq!(dict.stats().misses(), 0);
        assert_eq!(dict.stats().inserts(), 2);
    }

    #[test]
    fn test_shared_hit_miss() {
        let dict = SharedLruDict::new(10);
        dict.set("foo", 1);

        dict.get("foo");
        dict.get("nope");
        dict.peek("foo");

        assert_eq!(dict.stats().hits(), 1);
        assert_eq!(dict.stats().misses(), 1);
        assert_eq!(dict.stats().hit_ratio(), 0.5);
    }

    #[test]
    fn test_shared_eviction_stats() {
        let dict = SharedLruDict::new(2);
        dict.set(0, "data 0").set(1, "data 1");
        assert_eq!(dict.len(), 2);

        dict.set(2, "data 2");
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get(&0), None);
        assert_eq!(dict.get(&1), Some("data 1"));
        assert_eq!(dict.stats().evictions(), 1);

        dict.set_len(0);
        assert!(dict.is_empty());
        assert_eq!(dict.stats().evictions(), 3);
    }

    #[test]
    fn test_shared_zero_capacity() {
        let dict = SharedLruDict::new(0);
        dict.set("foo", 42);

        assert_eq!(dict.len(), 0);
        assert!(!dict.contains_key("foo"));
        assert_eq!(dict.stats().dropped(), 1);
        assert_eq!(dict.stats().inserts(), 0);
    }

    #[test]
    fn test_shared_dropped_follows_dict() {
        let dict = SharedLruDict::new(1);
        dict.set("foo", 1);
        dict.set_capacity(0);
        dict.set("foo", 2).set("bar", 3);
        assert_eq!(dict.stats().inserts(), 1);
        assert_eq!(dict.stats().dropped(), 2);
        assert_eq!(dict.stats().evictions(), 1);

        dict.set_capacity(Capacity::Unbounded);
        dict.set("foo", 4);
        assert_eq!(dict.stats().inserts(), 2);
        assert_eq!(dict.stats().dropped(), 2);
    }

    #[test]
    fn test_shared_set_len_huge() {
        let dict = SharedLruDict::new(Capacity::Unbounded);
        dict.set("foo", 1).set("bar", 2);
        dict.set_len(usize::MAX);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.stats().evictions(), 0);
    }

    #[test]
    fn test_shared_capacity_change() {
        let dict = SharedLruDict::new(Capacity::Unbounded);
        dict.set("foo", 1).set("bar", 2).set("zot", 3);

        dict.set_capacity(1);
        assert_eq!(dict.capacity(), Capacity::Bounded(1));
        assert_eq!(dict.keys(), vec!["zot"]);
        assert_eq!(dict.stats().evictions(), 2);
    }

    #[test]
    fn test_shared_delete() {
        let dict = SharedLruDict::new(10);
        dict.set("foo".to_string(), vec![1]);
        dict.set("bar".to_string(), vec![2]);

        assert!(dict.del("foo"));
        assert!(!dict.del("foo"));
        assert_eq!(dict.remove("bar"), Some(vec![2]));
        assert!(dict.is_empty());
    }

    #[test]
    fn test_shared_clear() {
        let dict = SharedLruDict::from_config(&DictConfig::new(10));
        dict.set("a", 0).set("b", 1);
        dict.get("a");

        dict.clear();

        assert!(dict.is_empty());
        assert_eq!(dict.stats().hits(), 0);
        assert_eq!(dict.capacity(), Capacity::Bounded(10));
    }

    #[test]
    fn test_shared_across_threads() {
        let dict = SharedLruDict::new(50);

        std::thread::scope(|scope| {
            for t in 0..4u32 {
                let dict = dict.clone();
                scope.spawn(move || {
                    for i in 0..100u32 {
                        dict.set(t * 1000 + i, i);
                        dict.get(&(t * 1000 + i));
                    }
                });
            }
        });

        assert_eq!(dict.len(), 50);
        assert_eq!(dict.stats().inserts(), 400);
        assert_eq!(dict.stats().evictions(), 350);
        assert_eq!(dict.stats().hits() + dict.stats().misses(), 400);
    }
}
