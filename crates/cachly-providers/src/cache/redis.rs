//! Redis backend
//!
//! Shared store for deployments with several processes. Every key this
//! backend writes carries a prefix, and `list_all`/`flush` only ever SCAN
//! that prefix, so a Redis database shared with other applications is never
//! wiped.
//!
//! ## Example
//!
//! ```ignore
//! use cachly_providers::cache::RedisBackend;
//!
//! let backend = RedisBackend::new("redis://localhost:6379", "myapp:")?;
//! ```

use crate::constants::{
    BACKEND_REDIS, REDIS_DEFAULT_KEY_PREFIX, REDIS_DEFAULT_URI, REDIS_SCAN_BATCH,
};
use async_trait::async_trait;
use cachly_domain::error::{Error, Result};
use cachly_domain::{CacheBackend, CacheId, Clock, SystemClock};
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use std::collections::HashMap;
use std::sync::Arc;

/// Redis backend
#[derive(Clone)]
pub struct RedisBackend {
    client: Client,
    key_prefix: String,
}

impl RedisBackend {
    /// Create a backend for `connection_string`, prefixing keys with `key_prefix`
    ///
    /// No connection is made until the first operation.
    pub fn new(connection_string: &str, key_prefix: impl Into<String>) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::backend_unavailable_with_source(
                BACKEND_REDIS,
                format!("Failed to create Redis client: {e}"),
                e,
            )
        })?;

        Ok(Self {
            client,
            key_prefix: key_prefix.into(),
        })
    }

    /// The prefix applied to every key
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    fn key(&self, id: &CacheId) -> String {
        format!("{}{}", self.key_prefix, id)
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| failed("connect", e))
    }

    /// Every key under this backend's prefix
    async fn scan_keys(&self, conn: &mut MultiplexedConnection) -> Result<Vec<String>> {
        let pattern = format!("{}*", self.key_prefix);
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(REDIS_SCAN_BATCH)
                .query_async(conn)
                .await
                .map_err(|e| failed("SCAN", e))?;
            keys.extend(batch);
            if next == 0 {
                return Ok(keys);
            }
            cursor = next;
        }
    }
}

fn failed(command: &str, e: redis::RedisError) -> Error {
    Error::backend_unavailable_with_source(
        BACKEND_REDIS,
        format!("Redis {command} failed: {e}"),
        e,
    )
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn set(&self, id: &CacheId, payload: &str, expires_at: i64) -> Result<bool> {
        let mut conn = self.connection().await?;
        let key = self.key(id);

        let ttl = expires_at - SystemClock.now_epoch_secs();
        let result: redis::RedisResult<()> = if expires_at > 0 && ttl > 0 {
            conn.set_ex(&key, payload, ttl.unsigned_abs()).await
        } else {
            conn.set(&key, payload).await
        };
        result.map_err(|e| failed("SET", e))?;
        Ok(true)
    }

    async fn exists(&self, id: &CacheId) -> Result<bool> {
        let mut conn = self.connection().await?;
        let count: i64 = conn
            .exists(self.key(id))
            .await
            .map_err(|e| failed("EXISTS", e))?;
        Ok(count > 0)
    }

    async fn get(&self, id: &CacheId) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        conn.get::<_, Option<String>>(self.key(id))
            .await
            .map_err(|e| failed("GET", e))
    }

    async fn delete(&self, id: &CacheId) -> Result<bool> {
        let mut conn = self.connection().await?;
        let count: i64 = conn
            .del(self.key(id))
            .await
            .map_err(|e| failed("DEL", e))?;
        Ok(count > 0)
    }

    async fn list_all(&self) -> Result<HashMap<String, String>> {
        let mut conn = self.connection().await?;
        let mut all = HashMap::new();
        for key in self.scan_keys(&mut conn).await? {
            let payload: Option<String> = conn.get(&key).await.map_err(|e| failed("GET", e))?;
            if let (Some(payload), Some(id)) = (payload, key.strip_prefix(&self.key_prefix)) {
                all.insert(id.to_string(), payload);
            }
        }
        Ok(all)
    }

    async fn flush(&self) -> Result<bool> {
        let mut conn = self.connection().await?;
        let keys = self.scan_keys(&mut conn).await?;
        if !keys.is_empty() {
            let _: i64 = redis::cmd("DEL")
                .arg(&keys)
                .query_async(&mut conn)
                .await
                .map_err(|e| failed("DEL", e))?;
        }
        Ok(true)
    }

    fn backend_name(&self) -> &str {
        BACKEND_REDIS
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("key_prefix", &self.key_prefix)
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use cachly_application::ports::registry::{BackendConfig, CACHE_BACKENDS, CacheBackendEntry};

/// Factory function for creating Redis backend instances.
fn redis_backend_factory(config: &BackendConfig) -> Result<Arc<dyn CacheBackend>> {
    let uri = config.uri.as_deref().unwrap_or(REDIS_DEFAULT_URI);
    let prefix = config
        .key_prefix
        .clone()
        .unwrap_or_else(|| REDIS_DEFAULT_KEY_PREFIX.to_string());
    Ok(Arc::new(RedisBackend::new(uri, prefix)?))
}

#[linkme::distributed_slice(CACHE_BACKENDS)]
static REDIS_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: BACKEND_REDIS,
    description: "Redis shared cache",
    factory: redis_backend_factory,
};
