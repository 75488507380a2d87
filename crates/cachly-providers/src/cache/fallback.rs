//! Fallback backend
//!
//! Wraps a primary backend and a fallback. When the primary reports
//! [`Error::BackendUnavailable`], the same call is retried once on the
//! fallback. Other errors are returned as-is, and there is no chaining: a
//! failing fallback fails the call.
//!
//! The wrapper reports the primary's name, so cache ids stay the same
//! whichever store serves the call.

use async_trait::async_trait;
use cachly_domain::error::Result;
use cachly_domain::{CacheBackend, CacheId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Primary backend with a one-shot fallback
#[derive(Debug, Clone)]
pub struct FallbackBackend {
    primary: Arc<dyn CacheBackend>,
    fallback: Arc<dyn CacheBackend>,
}

impl FallbackBackend {
    /// Serve from `primary`, falling back to `fallback` when it is unavailable
    pub fn new(primary: Arc<dyn CacheBackend>, fallback: Arc<dyn CacheBackend>) -> Self {
        Self { primary, fallback }
    }

    /// The primary backend
    pub fn primary(&self) -> &Arc<dyn CacheBackend> {
        &self.primary
    }

    /// The fallback backend
    pub fn fallback(&self) -> &Arc<dyn CacheBackend> {
        &self.fallback
    }
}

/// Run `$call` on the primary; on `BackendUnavailable` log and run it on the fallback
macro_rules! with_fallback {
    ($self:ident, $op:literal, |$backend:ident| $call:expr) => {{
        let result = {
            let $backend = &$self.primary;
            $call.await
        };
        match result {
            Err(e) if e.is_backend_unavailable() => {
                warn!(
                    operation = $op,
                    primary = $self.primary.backend_name(),
                    fallback = $self.fallback.backend_name(),
                    error = %e,
                    "Primary cache backend unavailable, using fallback"
                );
                let $backend = &$self.fallback;
                $call.await
            }
            other => other,
        }
    }};
}

#[async_trait]
impl CacheBackend for FallbackBackend {
    async fn set(&self, id: &CacheId, payload: &str, expires_at: i64) -> Result<bool> {
        with_fallback!(self, "set", |backend| backend.set(id, payload, expires_at))
    }

    async fn exists(&self, id: &CacheId) -> Result<bool> {
        with_fallback!(self, "exists", |backend| backend.exists(id))
    }

    async fn get(&self, id: &CacheId) -> Result<Option<String>> {
        with_fallback!(self, "get", |backend| backend.get(id))
    }

    async fn delete(&self, id: &CacheId) -> Result<bool> {
        with_fallback!(self, "delete", |backend| backend.delete(id))
    }

    async fn list_all(&self) -> Result<HashMap<String, String>> {
        with_fallback!(self, "list_all", |backend| backend.list_all())
    }

    async fn flush(&self) -> Result<bool> {
        with_fallback!(self, "flush", |backend| backend.flush())
    }

    async fn collect_garbage(&self, now: i64) -> Result<usize> {
        with_fallback!(self, "collect_garbage", |backend| backend.collect_garbage(now))
    }

    fn backend_name(&self) -> &str {
        self.primary.backend_name()
    }
}
