// Cache module for TTL-bounded response caching.
// Stores GitHub API results so repeat reads within a day skip the network.

pub mod entry;
pub mod paths;
pub mod store;

pub use entry::{CacheKey, CachedData, DEFAULT_TTL, ResponseCache};
pub use paths::cache_dir;
pub use store::{FileStore, KeyValueStore, MemoryStore, write_atomic};
