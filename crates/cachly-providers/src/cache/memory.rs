//! Moka in-memory backend
//!
//! Concurrent in-process store built on Moka. Contents vanish with the
//! process and are not shared between processes.
//!
//! [`MokaBackend::new`] is unbounded. A bounded store evicts entries on its
//! own, which namespaces see as vanished data (and a vanished registry slot
//! forgets every key in the namespace).
//!
//! ## Example
//!
//! ```ignore
//! use cachly_providers::cache::MokaBackend;
//!
//! let backend = MokaBackend::with_capacity(50_000);
//! ```

use crate::constants::BACKEND_MOKA;
use async_trait::async_trait;
use cachly_domain::error::Result;
use cachly_domain::{CacheBackend, CacheId};
use moka::future::Cache;
use std::collections::HashMap;

/// Moka-based in-memory backend
#[derive(Clone)]
pub struct MokaBackend {
    cache: Cache<String, String>,
    max_capacity: Option<u64>,
}

impl Default for MokaBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaBackend {
    /// Create an unbounded backend
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
            max_capacity: None,
        }
    }

    /// Create a backend holding at most `max_capacity` entries
    ///
    /// Entries beyond the bound are evicted without notice.
    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder().max_capacity(max_capacity).build();
        Self {
            cache,
            max_capacity: Some(max_capacity),
        }
    }

    /// Maximum number of entries, `None` when unbounded
    pub fn max_capacity(&self) -> Option<u64> {
        self.max_capacity
    }
}

#[async_trait]
impl CacheBackend for MokaBackend {
    async fn set(&self, id: &CacheId, payload: &str, _expires_at: i64) -> Result<bool> {
        self.cache
            .insert(id.to_string(), payload.to_string())
            .await;
        Ok(true)
    }

    async fn exists(&self, id: &CacheId) -> Result<bool> {
        Ok(self.cache.contains_key(id.as_str()))
    }

    async fn get(&self, id: &CacheId) -> Result<Option<String>> {
        Ok(self.cache.get(id.as_str()).await)
    }

    async fn delete(&self, id: &CacheId) -> Result<bool> {
        Ok(self.cache.remove(id.as_str()).await.is_some())
    }

    async fn list_all(&self) -> Result<HashMap<String, String>> {
        Ok(self
            .cache
            .iter()
            .map(|(id, payload)| ((*id).clone(), payload))
            .collect())
    }

    async fn flush(&self) -> Result<bool> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(true)
    }

    fn backend_name(&self) -> &str {
        BACKEND_MOKA
    }
}

impl std::fmt::Debug for MokaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaBackend")
            .field("max_capacity", &self.max_capacity)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use cachly_application::ports::registry::{BackendConfig, CACHE_BACKENDS, CacheBackendEntry};

#[linkme::distributed_slice(CACHE_BACKENDS)]
static MOKA_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: BACKEND_MOKA,
    description: "Moka in-process memory cache",
    factory: |config: &BackendConfig| {
        let backend = match config.max_capacity {
            Some(max_capacity) => MokaBackend::with_capacity(max_capacity),
            None => MokaBackend::new(),
        };
        Ok(std::sync::Arc::new(backend))
    },
};
