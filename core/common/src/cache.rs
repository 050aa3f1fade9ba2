// core/common/src/cache.rs
// In-memory response cache with lazy, read-time expiry

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// Entries older than this are treated as absent.
pub const CACHE_TTL_SECONDS: i64 = 60 * 60;

/// Source of the current time. Injected so tests can move time forward.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Used by tests to age cache entries.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now = *now + by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

/// String-keyed cache with one TTL for every entry.
///
/// Stale entries are never returned but stay in the map until a later `set`
/// overwrites them. There is no capacity bound and no background sweep.
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::seconds(CACHE_TTL_SECONDS),
            clock,
        }
    }

    /// Returns the value stored under `key` if it is still fresh.
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        if self.clock.now() - entry.stored_at > self.ttl {
            tracing::debug!(cache_key = key, "Cache entry expired");
            return None;
        }

        Some(entry.value.clone())
    }

    /// Inserts or overwrites `key`, stamping it with the current time.
    pub async fn set(&self, key: String, value: V) {
        let stored_at = self.clock.now();
        let mut entries = self.entries.write().await;
        entries.insert(key, CacheEntry { value, stored_at });
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_fresh_value() {
        let cache: TtlCache<String> = TtlCache::new();
        cache.set("channel_abc".to_string(), "payload".to_string()).await;

        assert_eq!(cache.get("channel_abc").await, Some("payload".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache: TtlCache<String> = TtlCache::new();
        assert_eq!(cache.get("channel_missing").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl_but_stays_stored() {
        let clock = Arc::new(ManualClock::new());
        let cache: TtlCache<u32> = TtlCache::with_clock(clock.clone());

        cache.set("channel_abc".to_string(), 7).await;
        clock.advance(Duration::minutes(59));
        assert_eq!(cache.get("channel_abc").await, Some(7));

        clock.advance(Duration::minutes(2));
        assert_eq!(cache.get("channel_abc").await, None);
        // Lazy expiry: nothing was removed.
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_entry_at_exact_ttl_is_still_served() {
        let clock = Arc::new(ManualClock::new());
        let cache: TtlCache<u32> = TtlCache::with_clock(clock.clone());

        cache.set("k".to_string(), 1).await;
        clock.advance(Duration::seconds(CACHE_TTL_SECONDS));
        assert_eq!(cache.get("k").await, Some(1));

        clock.advance(Duration::seconds(1));
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn test_set_overwrites_stale_entry() {
        let clock = Arc::new(ManualClock::new());
        let cache: TtlCache<u32> = TtlCache::with_clock(clock.clone());

        cache.set("k".to_string(), 1).await;
        clock.advance(Duration::hours(2));
        assert_eq!(cache.get("k").await, None);

        cache.set("k".to_string(), 2).await;
        assert_eq!(cache.get("k").await, Some(2));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_readers_and_writer() {
        let cache: Arc<TtlCache<usize>> = Arc::new(TtlCache::new());
        cache.set("shared".to_string(), 0).await;

        let mut handles = Vec::new();
        for i in 0..16 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                if i % 4 == 0 {
                    cache.set(format!("key_{}", i), i).await;
                }
                cache.get("shared").await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), Some(0));
        }
        assert_eq!(cache.len().await, 5);
    }

    #[test]
    fn test_ttl_is_one_hour() {
        let cache: TtlCache<()> = TtlCache::new();
        assert_eq!(cache.ttl(), Duration::hours(1));
    }
}
