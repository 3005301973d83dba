//! No-op cache implementation for disabled caching.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that stores nothing.
///
/// Every lookup is a miss and every write is accepted and discarded, so
/// resolution always falls through to the link store.
///
/// # Use Cases
///
/// - Deployments without Redis
/// - Fallback when the Redis connection fails at startup
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_url(&self, _slug: &str) -> CacheResult<String> {
        Err(CacheError::Miss)
    }

    async fn set_url_if_absent(
        &self,
        _slug: &str,
        _url: &str,
        _ttl: Option<Duration>,
    ) -> CacheResult<bool> {
        Ok(false)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
