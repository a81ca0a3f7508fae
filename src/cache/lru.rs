//! Recency List Module
//!
//! Doubly-linked list of entries ordered by access time, stored in an arena
//! of slots addressed by [`Handle`]s instead of interlinked pointers.

use std::iter::FusedIterator;

use crate::cache::entry::{Entry, Handle};

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// - Front (head) = most recently used
/// - Back (tail) = least recently used
///
/// Every operation except iteration and `clear` is O(1). Freed slots are
/// recycled through a free list so the arena never grows past the peak
/// number of live entries.
#[derive(Debug)]
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free: Vec<usize>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Lookup ==
    pub fn get(&self, handle: Handle) -> Option<&Entry<K, V>> {
        self.slots.get(handle.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(handle.index()).and_then(Option::as_mut)
    }

    /// Returns the least recently used entry without touching it.
    pub fn back(&self) -> Option<&Entry<K, V>> {
        self.tail.and_then(|handle| self.get(handle))
    }

    /// Returns the most recently used entry without touching it.
    #[cfg(test)]
    pub fn front(&self) -> Option<&Entry<K, V>> {
        self.head.and_then(|handle| self.get(handle))
    }

    // == Push Front ==
    /// Stores a new entry at the most recently used end.
    pub fn push_front(&mut self, key: K, value: V) -> Handle {
        let entry = Some(Entry::new(key, value));
        let handle = match self.free.pop() {
            Some(index) => {
                self.slots[index] = entry;
                Handle::new(index)
            }
            None => {
                self.slots.push(entry);
                Handle::new(self.slots.len() - 1)
            }
        };

        self.link_front(handle);
        self.len += 1;
        handle
    }

    // == Touch ==
    /// Marks an entry as most recently used.
    pub fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) {
            return;
        }
        self.unlink(handle);
        self.link_front(handle);
    }

    // == Remove ==
    /// Detaches an entry and releases its slot.
    pub fn remove(&mut self, handle: Handle) -> Option<Entry<K, V>> {
        self.get(handle)?;
        self.unlink(handle);

        let entry = self.slots[handle.index()].take()?;
        self.free.push(handle.index());
        self.len -= 1;
        Some(entry)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    pub fn pop_back(&mut self) -> Option<Entry<K, V>> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iteration ==
    /// Walks the list from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn link_front(&mut self, handle: Handle) {
        let old_head = self.head;
        if let Some(entry) = self.get_mut(handle) {
            entry.prev = None;
            entry.next = old_head;
        }

        match old_head {
            Some(old) => {
                if let Some(entry) = self.get_mut(old) {
                    entry.prev = Some(handle);
                }
            }
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }

    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = match self.get_mut(handle) {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(entry) = self.get_mut(p) {
                    entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(entry) = self.get_mut(n) {
                    entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Walks the links in both directions and checks they agree with `len`.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut forward = Vec::new();
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            assert!(forward.len() < self.len, "forward walk exceeds len (cycle?)");
            forward.push(handle);
            cursor = self.get(handle).expect("dangling next link").next;
        }
        assert_eq!(forward.len(), self.len, "forward walk length");

        let mut backward = Vec::new();
        let mut cursor = self.tail;
        while let Some(handle) = cursor {
            assert!(backward.len() < self.len, "backward walk exceeds len (cycle?)");
            backward.push(handle);
            cursor = self.get(handle).expect("dangling prev link").prev;
        }
        backward.reverse();
        assert_eq!(forward, backward, "forward and backward walks disagree");

        let live = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(live, self.len, "live slots");
        assert_eq!(live + self.free.len(), self.slots.len(), "free list accounting");
    }
}

// == Iterator ==
/// Borrowing iterator over `(key, value)` pairs, most recently used first.
///
/// Holding one keeps the store borrowed, so it cannot observe a half-applied
/// mutation.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.list.get(self.cursor?)?;
        self.cursor = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}
