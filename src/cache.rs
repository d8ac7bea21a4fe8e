//! # LRU Resource Cache Controller
//!
//! Fixed-capacity cache coordinating two structures that must never
//! desynchronize: a key index (key → slot handle) and a recency list
//! (MRU → LRU order). Every mutation touches both under a single capacity
//! invariant.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────────┐
//!   │                       ResourceCache<I>                             │
//!   │                                                                    │
//!   │   ┌──────────────────────────────────────────────────────────┐    │
//!   │   │  KeyIndex (key -> SlotId)                                │    │
//!   │   │                                                          │    │
//!   │   │  ┌───────────┬────────────────────────────────────┐      │    │
//!   │   │  │    Key    │  SlotId                            │      │    │
//!   │   │  ├───────────┼────────────────────────────────────┤      │    │
//!   │   │  │ /index    │  ──────────────────────────────┐   │      │    │
//!   │   │  │ /logo.png │  ────────────────────────┐     │   │      │    │
//!   │   │  └───────────┴──────────────────────────┼─────┼───┘      │    │
//!   │   └─────────────────────────────────────────┼─────┼──────────┘    │
//!   │                                             │     │               │
//!   │   ┌─────────────────────────────────────────┼─────┼──────────┐    │
//!   │   │  RecencyList<Arc<Resource>>             ▼     ▼          │    │
//!   │   │                                                          │    │
//!   │   │  head ──► ┌──────┐ ◄──────► ┌──────┐ ◄── tail            │    │
//!   │   │    (MRU)  │ Slot │          │ Slot │   (LRU)             │    │
//!   │   │           └──────┘          └──────┘                     │    │
//!   │   └──────────────────────────────────────────────────────────┘    │
//!   └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! | Component                | Description                                  |
//! |--------------------------|----------------------------------------------|
//! | `ResourceCache<I>`       | Single-threaded controller, the public surface |
//! | `KeyIndex` / `FxKeyIndex`| Key → `SlotId` collaborator ([`crate::index`]) |
//! | `RecencyList`            | Arena-backed MRU→LRU order ([`crate::ds`])   |
//! | `Resource`               | Owned entry: key, content type, payload      |
//!
//! ## Operation Flow
//!
//! ```text
//!   put(k, ct, body)                        get(k)
//!   ─────────────────                       ──────
//!   1. k already indexed?                   1. index lookup: miss -> None
//!      yes: swap entry in place,            2. move slot to list head (MRU)
//!           promote to head, return old     3. return &Arc<Resource>
//!   2. link new entry at head
//!   3. register k -> slot
//!   4. len > capacity?
//!      evict tail: unlink + unregister
//! ```
//!
//! All operations are O(1) excluding index hashing. Values are stored as
//! `Arc<Resource>`, so handles returned to callers stay valid after the
//! entry is evicted.
//!
//! ## Thread Safety
//!
//! `ResourceCache` is **not** thread-safe; no operation suspends or blocks,
//! and the list and index are mutated non-atomically with respect to each
//! other. Callers needing shared access wrap the whole controller in
//! `ConcurrentResourceCache` (feature `"concurrency"`), which serializes
//! every call behind one lock.

use std::sync::Arc;

use crate::ds::RecencyList;
use crate::entry::Resource;
use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
use crate::index::{FxKeyIndex, KeyIndex};
use crate::metrics::{CacheMetrics, Counters};

/// Fixed-capacity LRU cache over [`Resource`] entries.
///
/// # Example
///
/// ```
/// use rescache::ResourceCache;
///
/// let mut cache = ResourceCache::new(2);
/// cache.put("/a", "text/plain", b"alpha");
/// cache.put("/b", "text/plain", b"beta");
///
/// // Accessing "/a" promotes it, so "/b" is now least recently used.
/// cache.get("/a");
/// cache.put("/c", "text/plain", b"gamma");
///
/// assert!(cache.contains("/a"));
/// assert!(!cache.contains("/b")); // evicted
/// assert!(cache.contains("/c"));
/// ```
#[derive(Debug)]
pub struct ResourceCache<I = FxKeyIndex>
where
    I: KeyIndex,
{
    list: RecencyList<Arc<Resource>>,
    index: I,
    capacity: usize,
    metrics: Counters,
}

impl ResourceCache<FxKeyIndex> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 creates a cache that accepts no entries (every
    /// [`put`](Self::put) is a no-op). Use [`try_new`](Self::try_new) to
    /// reject a zero capacity instead.
    pub fn new(capacity: usize) -> Self {
        Self::with_index(capacity, FxKeyIndex::with_capacity_hint(capacity))
    }

    /// Creates a cache, rejecting `capacity == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use rescache::ResourceCache;
    ///
    /// assert!(ResourceCache::try_new(16).is_ok());
    /// assert!(ResourceCache::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be > 0"));
        }
        Ok(Self::new(capacity))
    }

    /// Creates a cache with an explicit index size hint, rejecting
    /// `capacity == 0`. A hint of 0 means
    /// [`DEFAULT_INDEX_CAPACITY`](crate::index::DEFAULT_INDEX_CAPACITY).
    pub fn try_with_index_hint(capacity: usize, hint: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be > 0"));
        }
        Ok(Self::with_index(
            capacity,
            FxKeyIndex::with_capacity_hint(hint),
        ))
    }
}

impl<I> ResourceCache<I>
where
    I: KeyIndex,
{
    /// Creates a cache from a caller-supplied index collaborator.
    pub fn with_index(capacity: usize, index: I) -> Self {
        Self {
            list: RecencyList::with_capacity(capacity),
            index,
            capacity,
            metrics: Counters::default(),
        }
    }

    /// Stores an entry, deep-copying `content_type` and `body`.
    ///
    /// The new entry becomes most recently used. If the key is already
    /// present the entry is overwritten in place (the slot keeps its
    /// capacity accounting) and the previous entry is returned. If the
    /// insert pushes the cache over capacity, the least-recently-used entry
    /// is evicted.
    ///
    /// # Example
    ///
    /// ```
    /// use rescache::ResourceCache;
    ///
    /// let mut cache = ResourceCache::new(4);
    /// assert!(cache.put("/a", "text/plain", b"one").is_none());
    ///
    /// let previous = cache.put("/a", "text/plain", b"two").unwrap();
    /// assert_eq!(previous.body(), b"one");
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn put(
        &mut self,
        key: impl Into<Arc<str>>,
        content_type: &str,
        body: &[u8],
    ) -> Option<Arc<Resource>> {
        let key: Arc<str> = key.into();

        // Existing key: swap the entry in place and promote.
        if let Some(slot) = self.index.get(&key) {
            self.metrics.updates += 1;
            let entry = Arc::new(Resource::new(key, content_type, body));
            let previous = self
                .list
                .get_mut(slot)
                .map(|value| std::mem::replace(value, entry));
            self.list.move_to_front(slot);

            #[cfg(debug_assertions)]
            self.debug_check();

            return previous;
        }

        // A zero-capacity cache accepts no entries.
        if self.capacity == 0 {
            return None;
        }

        self.metrics.inserts += 1;
        let entry = Arc::new(Resource::new(Arc::clone(&key), content_type, body));
        let slot = self.list.push_front(entry);
        self.index.insert(key, slot);

        if self.list.len() > self.capacity {
            self.evict_lru();
        }

        #[cfg(debug_assertions)]
        self.debug_check();

        None
    }

    /// Looks up an entry and promotes it to most recently used.
    ///
    /// A miss returns `None`; that is a normal outcome, not a fault. The
    /// returned borrow is released before any later `put` can evict the
    /// entry; callers that need a longer-lived handle clone the `Arc`.
    ///
    /// # Example
    ///
    /// ```
    /// use rescache::ResourceCache;
    ///
    /// let mut cache = ResourceCache::new(4);
    /// cache.put("/a", "text/html", b"<p>hi</p>");
    ///
    /// let entry = cache.get("/a").unwrap();
    /// assert_eq!(entry.content_type(), "text/html");
    /// assert_eq!(entry.content_length(), 9);
    ///
    /// assert!(cache.get("/missing").is_none());
    /// ```
    pub fn get(&mut self, key: &str) -> Option<&Arc<Resource>> {
        let slot = match self.index.get(key) {
            Some(slot) => slot,
            None => {
                self.metrics.misses += 1;
                return None;
            },
        };

        self.metrics.hits += 1;
        self.list.move_to_front(slot);
        self.list.get(slot)
    }

    /// Looks up an entry without affecting recency order.
    pub fn peek(&self, key: &str) -> Option<Arc<Resource>> {
        self.index
            .get(key)
            .and_then(|slot| self.list.get(slot))
            .cloned()
    }

    /// Returns `true` if `key` is cached, without affecting recency order.
    pub fn contains(&self, key: &str) -> bool {
        self.index.get(key).is_some()
    }

    /// Promotes `key` to most recently used without returning its entry.
    pub fn touch(&mut self, key: &str) -> bool {
        match self.index.get(key) {
            Some(slot) => self.list.move_to_front(slot),
            None => false,
        }
    }

    /// Removes the entry for `key`, unlinking it from both structures.
    pub fn remove(&mut self, key: &str) -> Option<Arc<Resource>> {
        let slot = self.index.remove(key)?;
        let entry = self.list.remove(slot);
        if entry.is_some() {
            self.metrics.removes += 1;
        }

        #[cfg(debug_assertions)]
        self.debug_check();

        entry
    }

    /// Removes and returns the least-recently-used entry.
    pub fn pop_lru(&mut self) -> Option<Arc<Resource>> {
        let entry = self.list.pop_back()?;
        self.index.remove(entry.key());

        #[cfg(debug_assertions)]
        self.debug_check();

        Some(entry)
    }

    /// Returns the least-recently-used entry without removing it.
    pub fn peek_lru(&self) -> Option<&Arc<Resource>> {
        self.list.back()
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every entry, releasing the index mappings and the entries.
    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    /// Iterates entries from most to least recently used, without affecting
    /// recency order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Resource>> {
        self.list.iter()
    }

    /// Returns a snapshot of the operation counters.
    pub fn metrics(&self) -> CacheMetrics {
        self.metrics.snapshot()
    }

    /// Unlink the tail from the list and drop its index record.
    fn evict_lru(&mut self) {
        if let Some(entry) = self.list.pop_back() {
            self.index.remove(entry.key());
            self.metrics.evictions += 1;
        }
    }

    /// Validates that the list and index agree entry-for-entry and that the
    /// capacity bound holds.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.debug_validate_invariants();

        if self.list.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "list holds {} entries but index holds {}",
                self.list.len(),
                self.index.len()
            )));
        }
        if self.list.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.list.len(),
                self.capacity
            )));
        }

        for (id, entry) in self.list.iter_entries() {
            match self.index.get(entry.key()) {
                Some(slot) if slot == id => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "key {:?} indexed to a different slot",
                        entry.key()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "key {:?} is listed but not indexed",
                        entry.key()
                    )));
                },
            }
        }

        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    fn debug_check(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("cache invariant violated: {err}");
        }
    }
}
