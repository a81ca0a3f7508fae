//! LRU Store Module
//!
//! Main cache engine: a hash index from key to arena handle, paired with the
//! recency list that decides eviction order.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::cache::entry::Handle;
use crate::cache::lru::{Iter, RecencyList};
use crate::cache::CacheStats;
use crate::error::{CacheError, Result};

/// Upper bound on up-front allocation; larger stores grow on demand.
const PREALLOC_LIMIT: usize = 1024;

// == LRU Store ==
/// Bounded key/value store with strict least-recently-used eviction.
///
/// `put` and a successful `get` move the entry to the most recently used
/// position. When a new key arrives at capacity, the least recently used
/// entry is dropped first. Every operation except traversal is O(1).
///
/// The store does no locking of its own; wrap it in a mutex or `RwLock` to
/// share it across threads.
#[derive(Debug)]
pub struct LruStore<K, V> {
    /// Key to arena handle
    index: HashMap<K, Handle>,
    /// Entries, most recently used first
    order: RecencyList<K, V>,
    /// Usage counters
    stats: CacheStats,
    /// Maximum number of entries, fixed at construction
    capacity: usize,
}

impl<K, V> LruStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// # Errors
    /// [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        let prealloc = capacity.min(PREALLOC_LIMIT);
        Ok(Self {
            index: HashMap::with_capacity(prealloc),
            order: RecencyList::with_capacity(prealloc),
            stats: CacheStats::new(capacity),
            capacity,
        })
    }

    // == Put ==
    /// Stores `value` under `key` and marks the key most recently used.
    ///
    /// Replacing the value of an existing key never evicts. Inserting a new
    /// key into a full store first evicts the least recently used entry.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&handle) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(handle) {
                entry.value = value;
            }
            self.order.move_to_front(handle);
            self.stats.record_update();
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let handle = self.order.push_front(key.clone(), value);
        self.index.insert(key, handle);
        self.stats.record_insert();
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss returns `None` and leaves the recency order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.get(key).copied();
        self.stats.record_lookup(handle.is_some());

        let handle = handle?;
        self.order.move_to_front(handle);
        self.order.get(handle).map(|entry| &entry.value)
    }

    /// Returns the value for `key` without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        self.order.get(handle).map(|entry| &entry.value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Delete ==
    /// Removes `key`, returning its value. Absent keys are a no-op.
    pub fn del<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.remove(key)?;
        self.order
            .remove(handle)
            .map(|entry| entry.into_parts().1)
    }

    // == Reset ==
    /// Drops every entry and zeroes the counters. Capacity is kept.
    pub fn reset(&mut self) {
        let dropped = self.index.len();
        self.index.clear();
        self.order.clear();
        self.stats = CacheStats::new(self.capacity);
        debug!(dropped, "store reset");
    }

    // == Size ==
    /// Number of live entries.
    pub fn size(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Ordered Traversal ==
    /// Keys from most to least recently used.
    ///
    /// The iterator borrows the store, so the order cannot change while it
    /// is alive. Call again after mutating to see the new order.
    pub fn ordered_keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.order.iter().map(|(key, _)| key)
    }

    /// `(key, value)` pairs from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.order.iter()
    }

    /// The entry that the next capacity-exceeding insert would evict.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.back().map(|entry| (&entry.key, &entry.value))
    }

    // == Stats ==
    /// Snapshot of the usage counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.index.len(),
            ..self.stats.clone()
        }
    }

    fn evict_lru(&mut self) {
        if let Some(entry) = self.order.pop_back() {
            self.index.remove(&entry.key);
            self.stats.record_eviction();
            debug!(
                size = self.index.len(),
                capacity = self.capacity,
                "evicted least recently used entry"
            );
        }
    }

    /// Checks the index and the recency list describe the same entries.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self)
    where
        K: std::fmt::Debug,
    {
        self.order.assert_consistent();
        assert_eq!(self.index.len(), self.order.len(), "index and list sizes");
        assert!(self.index.len() <= self.capacity, "size exceeds capacity");
        for (key, &handle) in &self.index {
            let entry = self.order.get(handle).expect("index points at a free slot");
            assert!(entry.key == *key, "index key {key:?} maps to entry {:?}", entry.key);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LruStore<K, V>
where
    K: Hash + Eq + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
