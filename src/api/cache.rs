use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::clock::Clock;

/// Single-slot TTL cache for the last fetched match list.
///
/// Concurrent refreshes may race; the last write wins. Entries are only
/// dropped by TTL expiry.
pub struct MatchListCache<T> {
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
    slot: RwLock<Option<CacheEntry<T>>>,
}

struct CacheEntry<T> {
    stored_at: DateTime<Utc>,
    items: Vec<T>,
}

impl<T: Clone> MatchListCache<T> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::zero()),
            clock,
            slot: RwLock::new(None),
        }
    }

    /// First fresh cached item matching `predicate`
    pub async fn find<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        let slot = self.slot.read().await;
        let entry = slot.as_ref().filter(|e| self.is_fresh(e))?;
        entry.items.iter().find(|item| predicate(item)).cloned()
    }

    pub async fn store(&self, items: Vec<T>) {
        debug!("Caching {} matches", items.len());
        let mut slot = self.slot.write().await;
        *slot = Some(CacheEntry {
            stored_at: self.clock.now(),
            items,
        });
    }

    fn is_fresh(&self, entry: &CacheEntry<T>) -> bool {
        self.clock.now().signed_duration_since(entry.stored_at) < self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::clock::ManualClock;
    use chrono::TimeZone;

    fn cache_with_clock() -> (MatchListCache<String>, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 12, 6, 8, 0, 0).unwrap());
        let cache = MatchListCache::new(Duration::from_secs(30), Arc::new(clock.clone()));
        (cache, clock)
    }

    #[tokio::test]
    async fn test_empty_cache_misses() {
        let (cache, _clock) = cache_with_clock();
        assert!(cache.find(|_| true).await.is_none());
    }

    #[tokio::test]
    async fn test_hit_within_ttl() {
        let (cache, clock) = cache_with_clock();
        cache.store(vec!["a".to_string(), "b".to_string()]).await;

        clock.advance(chrono::Duration::seconds(29));
        assert_eq!(cache.find(|s| s == "a").await.as_deref(), Some("a"));
        assert_eq!(cache.find(|s| s == "b").await.as_deref(), Some("b"));
        assert!(cache.find(|s| s == "z").await.is_none());
    }

    #[tokio::test]
    async fn test_expires_after_ttl() {
        let (cache, clock) = cache_with_clock();
        cache.store(vec!["a".to_string()]).await;

        clock.advance(chrono::Duration::seconds(30));
        assert!(cache.find(|_| true).await.is_none());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let (cache, _clock) = cache_with_clock();
        cache.store(vec!["first".to_string()]).await;
        cache.store(vec!["second".to_string()]).await;
        assert!(cache.find(|s| s == "first").await.is_none());
        assert_eq!(cache.find(|_| true).await.as_deref(), Some("second"));
    }
}
