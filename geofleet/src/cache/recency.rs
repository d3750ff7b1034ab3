//! Fixed-capacity cache with least-recently-used eviction.
//!
//! Entries live in an arena of slots threaded into a doubly linked
//! recency list (front = most recently used, back = least), with a
//! key-to-slot table on the side, so `put`, `get`, and `remove` are all
//! O(1). The list length always equals the table size, and never exceeds
//! the capacity once `put` returns.

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;

/// Errors from cache construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A capacity of zero would make every insert evict itself.
    #[error("cache capacity must be greater than zero")]
    ZeroCapacity,
}

/// Sentinel slot index marking the end of the recency list.
const NIL: usize = usize::MAX;

#[derive(Debug, Clone)]
struct Slot<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

/// Fixed-capacity cache that evicts the least recently used entry.
///
/// `put` and `get` refresh an entry's recency; `contains`, `peek_oldest`,
/// and `keys` observe without refreshing.
#[derive(Debug, Clone)]
pub struct RecencyCache<K, V> {
    capacity: usize,
    slots: Vec<Slot<K, V>>,
    lookup: HashMap<K, usize>,
    /// Most recently used slot, or `NIL` when empty.
    head: usize,
    /// Least recently used slot, or `NIL` when empty.
    tail: usize,
}

impl<K: Eq + Hash + Clone, V> RecencyCache<K, V> {
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            slots: Vec::new(),
            lookup: HashMap::new(),
            head: NIL,
            tail: NIL,
        })
    }

    /// Inserts or updates an entry, marking it most recently used.
    ///
    /// Returns true when inserting a new key pushed the cache over
    /// capacity and evicted the least recently used entry. Updating an
    /// existing key never evicts.
    pub fn put(&mut self, key: K, value: V) -> bool {
        if let Some(&slot) = self.lookup.get(&key) {
            self.slots[slot].value = value;
            self.detach(slot);
            self.attach_front(slot);
            return false;
        }

        let slot = self.allocate(key.clone(), value);
        self.lookup.insert(key, slot);
        self.attach_front(slot);

        if self.lookup.len() > self.capacity {
            let _ = self.remove_oldest();
            return true;
        }
        false
    }

    /// Returns the value for `key`, marking it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let slot = *self.lookup.get(key)?;
        self.detach(slot);
        self.attach_front(slot);
        Some(&self.slots[slot].value)
    }

    /// Membership test; recency order is left untouched.
    pub fn contains(&self, key: &K) -> bool {
        self.lookup.contains_key(key)
    }

    /// Removes `key` if present. Returns whether an entry was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.lookup.remove(key) {
            Some(slot) => {
                self.detach(slot);
                self.release(slot);
                true
            }
            None => false,
        }
    }

    /// Returns the least recently used entry without refreshing it.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        if self.tail == NIL {
            return None;
        }
        let slot = &self.slots[self.tail];
        Some((&slot.key, &slot.value))
    }

    /// Removes and returns the least recently used entry.
    pub fn remove_oldest(&mut self) -> Option<(K, V)> {
        if self.tail == NIL {
            return None;
        }
        let slot = self.tail;
        self.lookup.remove(&self.slots[slot].key);
        self.detach(slot);
        Some(self.release(slot))
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn purge(&mut self) {
        self.slots.clear();
        self.lookup.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Returns the keys ordered most recently used first.
    pub fn keys(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.lookup.len());
        let mut cursor = self.head;
        while cursor != NIL {
            keys.push(self.slots[cursor].key.clone());
            cursor = self.slots[cursor].next;
        }
        keys
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Maximum number of entries, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // ─────────────────────────────────────────────────────────────────────
    // Recency list plumbing
    // ─────────────────────────────────────────────────────────────────────

    /// Stores a new slot in the arena and returns its index.
    fn allocate(&mut self, key: K, value: V) -> usize {
        self.slots.push(Slot {
            key,
            value,
            prev: NIL,
            next: NIL,
        });
        self.slots.len() - 1
    }

    /// Unlinks `slot` from the recency list, leaving it parked.
    fn detach(&mut self, slot: usize) {
        let prev = self.slots[slot].prev;
        let next = self.slots[slot].next;
        if prev == NIL {
            self.head = next;
        } else {
            self.slots[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.slots[next].prev = prev;
        }
        self.slots[slot].prev = NIL;
        self.slots[slot].next = NIL;
    }

    /// Links a parked `slot` in at the most-recently-used end.
    fn attach_front(&mut self, slot: usize) {
        self.slots[slot].prev = NIL;
        self.slots[slot].next = self.head;
        if self.head == NIL {
            self.tail = slot;
        } else {
            self.slots[self.head].prev = slot;
        }
        self.head = slot;
    }

    /// Frees a detached `slot` and returns its entry.
    ///
    /// The arena stays dense: the last slot is swapped into the hole, and
    /// its lookup entry and list links are rethreaded to the new index.
    fn release(&mut self, slot: usize) -> (K, V) {
        let removed = self.slots.swap_remove(slot);
        if slot < self.slots.len() {
            let moved_key = self.slots[slot].key.clone();
            self.lookup.insert(moved_key, slot);
            let prev = self.slots[slot].prev;
            let next = self.slots[slot].next;
            if prev == NIL {
                self.head = slot;
            } else {
                self.slots[prev].next = slot;
            }
            if next == NIL {
                self.tail = slot;
            } else {
                self.slots[next].prev = slot;
            }
        }
        (removed.key, removed.value)
    }
}
