//! Cache Statistics Module
//!
//! Counters describing how the store has been used since construction or
//! the last reset.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time usage counters for an [`LruStore`](crate::cache::LruStore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found their key
    pub hits: u64,
    /// Lookups that did not
    pub misses: u64,
    /// Puts that created a new entry
    pub insertions: u64,
    /// Puts that replaced the value of an existing entry
    pub updates: u64,
    /// Entries dropped to make room for a new key
    pub evictions: u64,
    /// Live entries at snapshot time
    pub entries: usize,
    /// Fixed capacity of the store
    pub capacity: usize,
}

impl CacheStats {
    /// Zeroed counters for a store of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// hits / (hits + misses), or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }

    pub(crate) fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub(crate) fn record_insert(&mut self) {
        self.insertions += 1;
    }

    pub(crate) fn record_update(&mut self) {
        self.updates += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
