//! Cached resource entries.
//!
//! A [`Resource`] is one cached item: the key it is stored under, an opaque
//! content-type tag, and an owned copy of the payload bytes. The cache deep
//! copies the content type and payload at creation, so an entry never borrows
//! caller-supplied memory.
//!
//! The key is an `Arc<str>` so the cache's key index can share the same
//! allocation instead of duplicating the key text per entry.

use std::sync::Arc;

/// One cached item: key, content-type tag, and owned payload bytes.
///
/// Entries are created by [`ResourceCache::put`](crate::cache::ResourceCache::put)
/// and handed out as `Arc<Resource>`, so a caller may keep a handle alive
/// after the entry has been evicted from the cache.
///
/// # Example
///
/// ```
/// use rescache::Resource;
///
/// let res = Resource::new("/index.html", "text/html", b"<html></html>");
/// assert_eq!(res.key(), "/index.html");
/// assert_eq!(res.content_type(), "text/html");
/// assert_eq!(res.content_length(), 13);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    key: Arc<str>,
    content_type: Box<str>,
    body: Box<[u8]>,
}

impl Resource {
    /// Creates an entry, copying `content_type` and `body` into owned buffers.
    pub fn new(key: impl Into<Arc<str>>, content_type: &str, body: &[u8]) -> Self {
        Self {
            key: key.into(),
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Returns the key this entry is stored under.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the content-type tag.
    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the payload bytes.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the payload size in bytes.
    #[inline]
    pub fn content_length(&self) -> usize {
        self.body.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_owns_copies_of_inputs() {
        let body = vec![1u8, 2, 3];
        let res = Resource::new("/a", "application/octet-stream", &body);
        drop(body);

        assert_eq!(res.key(), "/a");
        assert_eq!(res.content_type(), "application/octet-stream");
        assert_eq!(res.body(), &[1, 2, 3]);
        assert_eq!(res.content_length(), 3);
    }

    #[test]
    fn resource_accepts_empty_body() {
        let res = Resource::new("/empty", "text/plain", b"");
        assert_eq!(res.content_length(), 0);
        assert!(res.body().is_empty());
    }

    #[test]
    fn resource_key_allocation_is_shared() {
        let key: Arc<str> = Arc::from("/shared");
        let res = Resource::new(Arc::clone(&key), "text/plain", b"x");

        // The entry holds the same allocation, not a copy of the key text.
        assert_eq!(Arc::strong_count(&key), 2);
        drop(res);
        assert_eq!(Arc::strong_count(&key), 1);
    }
}
