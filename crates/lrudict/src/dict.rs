//! LRU dictionary
//!
//! A key → handle table over an arena-backed recency list. Every mutation is built from
//! three list primitives: unlink, push and crop (evict from the tail until a
//! length limit holds).

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use tracing::{debug, error, trace};

use crate::bound::Capacity;
use crate::config::DictConfig;
use crate::list::{Iter, RecencyList};

/// Upper limit on slots reserved up front from a bounded capacity
const PREALLOC_LIMIT: usize = 4096;

/// Bounded key/value dictionary ordered by recency.
///
/// `keys()`, `vals()` and `iter()` run from least to most recently used.
/// `get` counts as a use and `peek` does not.
pub struct LruDict<K, V> {
    map: HashMap<K, usize, RandomState>,
    list: RecencyList<K, V>,
    capacity: Capacity,
    evictions: u64,
}

impl<K, V> LruDict<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty dictionary with the given capacity
    ///
    /// # Arguments
    /// * `capacity` - entry limit; `Capacity::Unbounded` (or `None`) never evicts
    pub fn new(capacity: impl Into<Capacity>) -> Self {
        let capacity = capacity.into();
        let reserve = capacity.limit().unwrap_or(0).min(PREALLOC_LIMIT);

        Self {
            map: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
            list: RecencyList::with_capacity(reserve),
            capacity,
            evictions: 0,
        }
    }

    /// Create an empty dictionary that never evicts
    pub fn unbounded() -> Self {
        Self::new(Capacity::Unbounded)
    }

    /// Create an empty dictionary from configuration
    pub fn from_config(config: &DictConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Insert `value` under `key` as the most recently used entry.
    ///
    /// An existing entry for `key` is discarded first. Least recently used
    /// entries are evicted to make room. At capacity 0 the write is dropped
    /// and the key stays absent.
    pub fn set(&mut self, key: K, value: V) -> &mut Self {
        if let Some(idx) = self.map.remove(&key) {
            self.list.remove(idx);
        }

        if self.make_room() {
            let idx = self.list.push_new(key.clone(), value);
            self.map.insert(key, idx);
        } else {
            trace!("no room at capacity 0, write dropped");
        }

        self
    }

    /// Get a value and mark it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.list.unlink(self.map.get(key).copied())?;
        self.list.push(idx);
        self.list.node(idx).map(|node| &node.value)
    }

    /// Get a value without touching recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.list.node(idx).map(|node| &node.value)
    }

    /// Delete an entry; returns whether one was removed
    pub fn del<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Delete an entry and hand back its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.map.remove(key)?;
        self.list.remove(idx).map(|node| node.value)
    }

    /// Check for a key without touching recency
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Position of `key` counted from the least recently used end.
    ///
    /// Walks the list, so this is O(position); meant for diagnostics.
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.list.index(*self.map.get(key)?)
    }

    /// Snapshot of keys, least recently used first
    pub fn keys(&self) -> Vec<K> {
        self.list.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Snapshot of values, least recently used first
    pub fn vals(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.list.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Iterate `(key, value)` pairs, least recently used first
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.list.iter()
    }

    /// Current capacity
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Replace the capacity, evicting least recently used entries that no
    /// longer fit
    pub fn set_capacity(&mut self, capacity: impl Into<Capacity>) {
        let capacity = capacity.into();
        if let Some(limit) = capacity.limit() {
            self.crop(limit);
        }
        debug!(%capacity, len = self.len(), "capacity changed");
        self.capacity = capacity;
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.list.len() == 0
    }

    /// Trim to at most `len` entries, least recently used first.
    ///
    /// The capacity is left as is, so later inserts can grow the dictionary
    /// again. Signed or loose inputs go through [`len_from_signed`] or
    /// [`clamp_len`](crate::clamp_len) first.
    ///
    /// [`len_from_signed`]: crate::len_from_signed
    pub fn set_len(&mut self, len: usize) {
        self.crop(len);
        debug!(target = len, len = self.len(), "length trimmed");
    }

    /// Entries dropped by cropping since creation
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Remove all entries; the capacity is kept
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    fn make_room(&mut self) -> bool {
        match self.capacity {
            Capacity::Unbounded => true,
            Capacity::Bounded(0) => {
                self.crop(0);
                false
            }
            Capacity::Bounded(n) => self.crop(n - 1),
        }
    }

    /// Evict from the tail until at most `limit` entries remain
    fn crop(&mut self, limit: usize) -> bool {
        while self.list.len() > limit {
            let Some(node) = self.list.tail().and_then(|idx| self.list.remove(idx)) else {
                error!(
                    len = self.list.len(),
                    limit, "recency list lost its tail while cropping"
                );
                return false;
            };
            self.map.remove(&node.key);
            self.evictions += 1;
            trace!(remaining = self.list.len(), "evicted least recently used entry");
        }
        true
    }
}

impl<K, V> Default for LruDict<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<K, V> Extend<(K, V)> for LruDict<K, V>
where
    K: Hash + Eq + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V> fmt::Debug for LruDict<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.list.iter()).finish()
    }
}
