// Time-stamped cache entries over a key-value store.
// Handles TTL checks, eviction of stale or malformed entries, and the fixed key set.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::store::KeyValueStore;

/// Default TTL for every cached GitHub category: 24 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Wrapper for cached data with its capture time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The cached payload.
    pub data: T,
    /// Capture time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl<T> CachedData<T> {
    /// Create an entry stamped with the current time.
    pub fn new(data: T) -> Self {
        Self {
            data,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Valid iff `now - timestamp < ttl`.
    pub fn is_valid_at(&self, now_millis: i64, ttl: Duration) -> bool {
        let ttl_millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        now_millis.saturating_sub(self.timestamp) < ttl_millis
    }

    pub fn is_valid(&self, ttl: Duration) -> bool {
        self.is_valid_at(Utc::now().timestamp_millis(), ttl)
    }
}

/// The four cached data categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKey {
    Profile,
    Repos,
    Languages,
    Stats,
}

impl CacheKey {
    pub const ALL: [CacheKey; 4] = [
        CacheKey::Profile,
        CacheKey::Repos,
        CacheKey::Languages,
        CacheKey::Stats,
    ];

    fn prefix(&self) -> &'static str {
        match self {
            CacheKey::Profile => "github_user",
            CacheKey::Repos => "github_repos",
            CacheKey::Languages => "github_languages",
            CacheKey::Stats => "github_stats",
        }
    }

    /// Storage key for this category and account.
    pub fn for_account(&self, account: &str) -> String {
        format!("{}_{}", self.prefix(), account)
    }
}

/// TTL cache of JSON payloads.
///
/// Expired or unreadable entries are removed on read and reported as a miss.
/// Store failures never surface to callers: a failed read is a miss and a
/// failed write is logged.
pub struct ResponseCache<S> {
    store: S,
    ttl: Duration,
}

impl<S: KeyValueStore> ResponseCache<S> {
    pub fn new(store: S, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the cached payload under `key` if it is still valid.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "cache miss");
                return None;
            }
            Err(e) => {
                warn!(key, error = %e, "cache read failed");
                return None;
            }
        };

        match serde_json::from_str::<CachedData<T>>(&raw) {
            Ok(entry) if entry.is_valid(self.ttl) => {
                debug!(key, "cache hit");
                Some(entry.data)
            }
            Ok(_) => {
                debug!(key, "cache entry expired");
                self.evict(key);
                None
            }
            Err(e) => {
                warn!(key, error = %e, "discarding malformed cache entry");
                self.evict(key);
                None
            }
        }
    }

    /// Store `data` under `key` with a fresh timestamp.
    pub fn put<T: Serialize>(&self, key: &str, data: &T) {
        let entry = CachedData::new(data);
        let result = serde_json::to_string(&entry)
            .map_err(Into::into)
            .and_then(|json| self.store.set(key, &json));

        if let Err(e) = result {
            warn!(key, error = %e, "cache write failed");
        }
    }

    /// Remove `key` from the store.
    pub fn evict(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!(key, error = %e, "cache eviction failed");
        }
    }

    /// Timestamp of the raw entry under `key`, valid or not.
    #[cfg(test)]
    pub fn timestamp_of(&self, key: &str) -> Option<i64> {
        let raw = self.store.get(key).ok()??;
        serde_json::from_str::<CachedData<serde_json::Value>>(&raw)
            .ok()
            .map(|entry| entry.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::MemoryStore;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn test_data() -> TestData {
        TestData {
            name: "test".to_string(),
            value: 42,
        }
    }

    #[test]
    fn test_validity_boundary() {
        let entry = CachedData {
            data: (),
            timestamp: 1_000,
        };
        let ttl = Duration::from_millis(500);

        assert!(entry.is_valid_at(1_000, ttl));
        assert!(entry.is_valid_at(1_499, ttl));
        assert!(!entry.is_valid_at(1_500, ttl));
        assert!(!entry.is_valid_at(9_999, ttl));
    }

    #[test]
    fn test_cache_keys() {
        assert_eq!(CacheKey::Profile.for_account("me"), "github_user_me");
        assert_eq!(CacheKey::Repos.for_account("me"), "github_repos_me");
        assert_eq!(CacheKey::Languages.for_account("me"), "github_languages_me");
        assert_eq!(CacheKey::Stats.for_account("me"), "github_stats_me");
    }

    #[test]
    fn test_put_then_get() {
        let cache = ResponseCache::new(MemoryStore::new(), DEFAULT_TTL);
        cache.put("k", &test_data());

        let read: Option<TestData> = cache.get("k");
        assert_eq!(read, Some(test_data()));
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let cache = ResponseCache::new(MemoryStore::new(), DEFAULT_TTL);
        let stale = CachedData {
            data: test_data(),
            timestamp: Utc::now().timestamp_millis() - 25 * 60 * 60 * 1000,
        };
        cache
            .store()
            .set("k", &serde_json::to_string(&stale).unwrap())
            .unwrap();

        let read: Option<TestData> = cache.get("k");
        assert!(read.is_none());
        assert!(cache.store().get("k").unwrap().is_none());
    }

    #[test]
    fn test_malformed_entry_is_a_miss() {
        let cache = ResponseCache::new(MemoryStore::new(), DEFAULT_TTL);
        cache.store().set("k", "{\"data\": {\"na").unwrap();

        let read: Option<TestData> = cache.get("k");
        assert!(read.is_none());
        assert!(cache.store().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_a_miss() {
        let cache = ResponseCache::new(MemoryStore::new(), DEFAULT_TTL);
        cache.put("k", &vec![1, 2, 3]);

        let read: Option<TestData> = cache.get("k");
        assert!(read.is_none());
    }

    #[test]
    fn test_timestamp_of() {
        let cache = ResponseCache::new(MemoryStore::new(), DEFAULT_TTL);
        assert!(cache.timestamp_of("k").is_none());

        let before = Utc::now().timestamp_millis();
        cache.put("k", &test_data());
        assert!(cache.timestamp_of("k").unwrap() >= before);
    }
}
