pub use crate::cache::ResourceCache;
pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::entry::Resource;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::index::{FxKeyIndex, KeyIndex, DEFAULT_INDEX_CAPACITY};
pub use crate::metrics::CacheMetrics;

#[cfg(feature = "concurrency")]
pub use crate::sync::ConcurrentResourceCache;
