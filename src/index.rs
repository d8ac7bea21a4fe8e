//! Key index: the associative collaborator mapping keys to list slots.
//!
//! The cache controller never depends on a concrete map type; it only needs
//! insert/lookup/delete by key, expressed here as the [`KeyIndex`] trait.
//! The index stores [`SlotId`] handles into the recency list and never owns
//! the entries themselves, so dropping an index can never free an entry out
//! from under the cache.
//!
//! [`FxKeyIndex`] is the shipped implementation, backed by `FxHashMap`
//! (the same hasher rustc uses; fast for short string keys).

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::ds::SlotId;

/// Index table size used when a caller passes a size hint of 0.
pub const DEFAULT_INDEX_CAPACITY: usize = 128;

/// Associative mapping from key to recency-list slot.
///
/// Implementations own their key copies but never the cached entries; all
/// values are [`SlotId`] handles resolved through the recency list.
pub trait KeyIndex {
    /// Creates an empty index sized for `hint` keys. A hint of 0 means
    /// "use [`DEFAULT_INDEX_CAPACITY`]".
    fn with_capacity_hint(hint: usize) -> Self
    where
        Self: Sized;

    /// Inserts or overwrites the mapping for `key`, returning the previous
    /// slot if one was registered.
    fn insert(&mut self, key: Arc<str>, slot: SlotId) -> Option<SlotId>;

    /// Returns the slot registered for `key`, or `None`.
    fn get(&self, key: &str) -> Option<SlotId>;

    /// Removes the mapping for `key` if present; absent keys are a no-op.
    fn remove(&mut self, key: &str) -> Option<SlotId>;

    /// Returns the number of registered keys.
    fn len(&self) -> usize;

    /// Returns `true` if no keys are registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every mapping, leaving the entries untouched.
    fn clear(&mut self);
}

/// `FxHashMap`-backed [`KeyIndex`].
///
/// Keys are `Arc<str>`, shared with the entry that carries the same key, so
/// the key text is allocated once per live entry.
#[derive(Debug, Default)]
pub struct FxKeyIndex {
    map: FxHashMap<Arc<str>, SlotId>,
}

impl KeyIndex for FxKeyIndex {
    fn with_capacity_hint(hint: usize) -> Self {
        let capacity = if hint == 0 {
            DEFAULT_INDEX_CAPACITY
        } else {
            hint
        };
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    fn insert(&mut self, key: Arc<str>, slot: SlotId) -> Option<SlotId> {
        self.map.insert(key, slot)
    }

    fn get(&self, key: &str) -> Option<SlotId> {
        self.map.get(key).copied()
    }

    fn remove(&mut self, key: &str) -> Option<SlotId> {
        self.map.remove(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}
