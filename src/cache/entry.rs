//! Cache Entry Module
//!
//! Defines the slot type stored in the recency list arena.

// == Handle ==
/// Stable index of an entry inside the recency list arena.
///
/// Handles stay valid until the entry is removed; the slot may then be
/// reused by a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle(usize);

impl Handle {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

// == Entry ==
/// One stored key/value pair plus its links in the recency list.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    /// The key this entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Neighbour closer to the most recently used end
    pub prev: Option<Handle>,
    /// Neighbour closer to the least recently used end
    pub next: Option<Handle>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates a detached entry.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    /// Consumes the entry, returning its key and value.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}
