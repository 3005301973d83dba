//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Errors that can occur during cache operations.
///
/// [`CacheError::Miss`] is the normal "not cached yet" outcome and is not a
/// failure. The other variants indicate a degraded cache backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    Miss,
    ConnectionError(String),
    OperationError(String),
}

impl CacheError {
    /// Returns true for the expected "key not cached" outcome.
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss)
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Miss => write!(f, "Cache miss"),
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching slug to URL mappings.
///
/// The cache is never the source of truth. Links are immutable, so a cached
/// value can be trusted until it expires.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL cached for a slug.
    ///
    /// # Errors
    ///
    /// - [`CacheError::Miss`] if the slug is not cached
    /// - [`CacheError::ConnectionError`] / [`CacheError::OperationError`] if the
    ///   backend failed
    async fn get_url(&self, slug: &str) -> CacheResult<String>;

    /// Stores a mapping unless one already exists for the slug.
    ///
    /// An existing value is never overwritten. Returns `Ok(true)` when the value
    /// was written and `Ok(false)` when an existing entry won.
    ///
    /// # Arguments
    ///
    /// - `slug` - The cache key
    /// - `url` - The original URL
    /// - `ttl` - Time-to-live; `None` stores the entry without expiry
    async fn set_url_if_absent(
        &self,
        slug: &str,
        url: &str,
        ttl: Option<Duration>,
    ) -> CacheResult<bool>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health check endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
