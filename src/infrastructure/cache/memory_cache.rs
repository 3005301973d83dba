//! In-process cache implementation with per-entry expiry.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CacheEntry {
    url: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// Cache backed by a `HashMap` behind an async reader/writer lock.
///
/// Expired entries read as misses and are replaced by the next write.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, slug: &str) -> CacheResult<String> {
        let entries = self.entries.read().await;

        match entries.get(slug) {
            Some(entry) if entry.is_live(Instant::now()) => Ok(entry.url.clone()),
            _ => Err(CacheError::Miss),
        }
    }

    async fn set_url_if_absent(
        &self,
        slug: &str,
        url: &str,
        ttl: Option<Duration>,
    ) -> CacheResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        if entries.get(slug).is_some_and(|entry| entry.is_live(now)) {
            return Ok(false);
        }

        // A TTL too large to represent as an instant never expires.
        let expires_at = ttl
            .filter(|ttl| !ttl.is_zero())
            .and_then(|ttl| now.checked_add(ttl));
        entries.insert(
            slug.to_string(),
            CacheEntry {
                url: url.to_string(),
                expires_at,
            },
        );

        Ok(true)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_is_miss() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get_url("missing").await, Err(CacheError::Miss));
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new();

        let written = cache
            .set_url_if_absent("abc", "https://example.com", None)
            .await
            .unwrap();

        assert!(written);
        assert_eq!(cache.get_url("abc").await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_existing_value_wins() {
        let cache = MemoryCache::new();

        cache
            .set_url_if_absent("abc", "https://first.com", None)
            .await
            .unwrap();
        let written = cache
            .set_url_if_absent("abc", "https://second.com", None)
            .await
            .unwrap();

        assert!(!written);
        assert_eq!(cache.get_url("abc").await.unwrap(), "https://first.com");
    }

    #[tokio::test]
    async fn test_expired_entry_is_miss_and_replaceable() {
        let cache = MemoryCache::new();

        cache
            .set_url_if_absent("abc", "https://old.com", Some(Duration::from_millis(10)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(cache.get_url("abc").await, Err(CacheError::Miss));
        assert!(cache.is_empty().await);

        let written = cache
            .set_url_if_absent("abc", "https://new.com", None)
            .await
            .unwrap();
        assert!(written);
        assert_eq!(cache.get_url("abc").await.unwrap(), "https://new.com");
    }

    #[tokio::test]
    async fn test_huge_ttl_never_expires() {
        let cache = MemoryCache::new();

        let written = cache
            .set_url_if_absent(
                "abc",
                "https://example.com",
                Some(Duration::from_secs(u64::MAX)),
            )
            .await
            .unwrap();

        assert!(written);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get_url("abc").await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_zero_ttl_never_expires() {
        let cache = MemoryCache::new();

        cache
            .set_url_if_absent("abc", "https://example.com", Some(Duration::ZERO))
            .await
            .unwrap();

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get_url("abc").await.unwrap(), "https://example.com");
    }
}
