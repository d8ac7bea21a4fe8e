//! Thread-safe wrapper around [`ResourceCache`].
//!
//! The recency list and the key index must change together atomically, so
//! the whole controller sits behind a single `parking_lot::RwLock` rather
//! than any finer-grained locking. `get` takes the write lock because a hit
//! reorders the recency list; `peek` and the read-only accessors share the
//! read lock.
//!
//! Entries are handed out as owned `Arc<Resource>` clones, so a caller can
//! keep reading a payload after the lock is released, and even after the
//! entry has been evicted.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::cache::ResourceCache;
use crate::entry::Resource;
use crate::error::ConfigError;
use crate::index::{FxKeyIndex, KeyIndex};
use crate::metrics::CacheMetrics;

/// `ResourceCache` behind one `RwLock`; every operation is serialized.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use rescache::ConcurrentResourceCache;
///
/// let cache = Arc::new(ConcurrentResourceCache::new(64));
///
/// let writer = Arc::clone(&cache);
/// thread::spawn(move || {
///     writer.put("/a", "text/plain", b"alpha");
/// })
/// .join()
/// .unwrap();
///
/// let entry = cache.get("/a").unwrap();
/// assert_eq!(entry.body(), b"alpha");
/// ```
#[derive(Debug)]
pub struct ConcurrentResourceCache<I = FxKeyIndex>
where
    I: KeyIndex,
{
    inner: RwLock<ResourceCache<I>>,
}

impl ConcurrentResourceCache<FxKeyIndex> {
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(ResourceCache::new(capacity)),
        }
    }

    /// Creates a cache, rejecting `capacity == 0`.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: RwLock::new(ResourceCache::try_new(capacity)?),
        })
    }
}

impl<I> ConcurrentResourceCache<I>
where
    I: KeyIndex,
{
    /// Wraps a caller-built single-threaded cache.
    pub fn from_cache(cache: ResourceCache<I>) -> Self {
        Self {
            inner: RwLock::new(cache),
        }
    }

    /// Stores an entry; see [`ResourceCache::put`].
    pub fn put(
        &self,
        key: impl Into<Arc<str>>,
        content_type: &str,
        body: &[u8],
    ) -> Option<Arc<Resource>> {
        let mut cache = self.inner.write();
        cache.put(key, content_type, body)
    }

    /// Looks up an entry and promotes it to most recently used.
    ///
    /// Takes the write lock: a hit reorders the recency list.
    pub fn get(&self, key: &str) -> Option<Arc<Resource>> {
        let mut cache = self.inner.write();
        cache.get(key).cloned()
    }

    /// Looks up an entry without affecting recency order.
    pub fn peek(&self, key: &str) -> Option<Arc<Resource>> {
        let cache = self.inner.read();
        cache.peek(key)
    }

    /// Returns `true` if `key` is cached.
    pub fn contains(&self, key: &str) -> bool {
        let cache = self.inner.read();
        cache.contains(key)
    }

    /// Promotes `key` to most recently used.
    pub fn touch(&self, key: &str) -> bool {
        let mut cache = self.inner.write();
        cache.touch(key)
    }

    /// Removes the entry for `key`.
    pub fn remove(&self, key: &str) -> Option<Arc<Resource>> {
        let mut cache = self.inner.write();
        cache.remove(key)
    }

    /// Removes and returns the least-recently-used entry.
    pub fn pop_lru(&self) -> Option<Arc<Resource>> {
        let mut cache = self.inner.write();
        cache.pop_lru()
    }

    /// Returns the least-recently-used entry without removing it.
    pub fn peek_lru(&self) -> Option<Arc<Resource>> {
        let cache = self.inner.read();
        cache.peek_lru().cloned()
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        let cache = self.inner.read();
        cache.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        let cache = self.inner.read();
        cache.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        let cache = self.inner.read();
        cache.capacity()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut cache = self.inner.write();
        cache.clear();
    }

    /// Returns a snapshot of the operation counters.
    pub fn metrics(&self) -> CacheMetrics {
        let cache = self.inner.read();
        cache.metrics()
    }

    /// Validates cross-structure invariants; see `ResourceCache::check_invariants`.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), crate::error::InvariantError> {
        let cache = self.inner.read();
        cache.check_invariants()
    }
}
