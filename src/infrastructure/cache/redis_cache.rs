//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache implementation for fast slug lookups.
///
/// Uses `ConnectionManager` for connection reuse and transparent reconnects.
/// Backend failures are returned to the caller, which decides whether they
/// are fatal; a nil reply is reported as [`CacheError::Miss`].
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "slug:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, slug: &str) -> String {
        format!("{}{}", self.key_prefix, slug)
    }
}

fn map_redis_error(e: RedisError) -> CacheError {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() {
        CacheError::ConnectionError(e.to_string())
    } else {
        CacheError::OperationError(e.to_string())
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, slug: &str) -> CacheResult<String> {
        let key = self.build_key(slug);
        let mut conn = self.client.clone();

        match conn
            .get::<_, Option<String>>(&key)
            .await
            .map_err(map_redis_error)?
        {
            Some(url) => {
                debug!("Cache HIT: {} -> {}", slug, url);
                Ok(url)
            }
            None => {
                debug!("Cache MISS: {}", slug);
                Err(CacheError::Miss)
            }
        }
    }

    async fn set_url_if_absent(
        &self,
        slug: &str,
        url: &str,
        ttl: Option<Duration>,
    ) -> CacheResult<bool> {
        let key = self.build_key(slug);
        let mut conn = self.client.clone();

        let mut cmd = redis::cmd("SET");
        cmd.arg(&key).arg(url).arg("NX");
        if let Some(ttl_ms) = ttl
            .filter(|ttl| !ttl.is_zero())
            .and_then(|ttl| u64::try_from(ttl.as_millis()).ok())
        {
            cmd.arg("PX").arg(ttl_ms);
        }

        // SET NX replies OK when written and nil when the key already exists.
        let reply: Option<String> = cmd.query_async(&mut conn).await.map_err(map_redis_error)?;
        let written = reply.is_some();

        debug!(
            "Cache SETNX: {} -> {} (written: {}, TTL: {:?})",
            slug, url, written, ttl
        );

        Ok(written)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
