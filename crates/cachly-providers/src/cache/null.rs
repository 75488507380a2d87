//! Null backend
//!
//! Accepts every write and stores nothing. Useful for disabling caching
//! without touching call sites: every read is a miss and every `once`
//! recomputes.

use crate::constants::BACKEND_NULL;
use async_trait::async_trait;
use cachly_domain::error::Result;
use cachly_domain::{CacheBackend, CacheId};
use std::collections::HashMap;

/// Backend that doesn't store anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl NullBackend {
    /// Create a new null backend
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheBackend for NullBackend {
    async fn set(&self, _id: &CacheId, _payload: &str, _expires_at: i64) -> Result<bool> {
        Ok(true)
    }

    async fn exists(&self, _id: &CacheId) -> Result<bool> {
        Ok(false)
    }

    async fn get(&self, _id: &CacheId) -> Result<Option<String>> {
        Ok(None)
    }

    async fn delete(&self, _id: &CacheId) -> Result<bool> {
        Ok(false)
    }

    async fn list_all(&self) -> Result<HashMap<String, String>> {
        Ok(HashMap::new())
    }

    async fn flush(&self) -> Result<bool> {
        Ok(true)
    }

    fn backend_name(&self) -> &str {
        BACKEND_NULL
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use cachly_application::ports::registry::{BackendConfig, CACHE_BACKENDS, CacheBackendEntry};

#[linkme::distributed_slice(CACHE_BACKENDS)]
static NULL_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: BACKEND_NULL,
    description: "Stores nothing; every read misses",
    factory: |_config: &BackendConfig| Ok(std::sync::Arc::new(NullBackend::new())),
};
