//! Cache Backend Port
//!
//! Port for storage backends. A backend is a dumb string-to-string store:
//! it never interprets payloads beyond the optional expiry hint handed to
//! [`CacheBackend::set`], and it never sees user keys, only [`CacheId`]s.
//!
//! ## Implementations
//!
//! - **moka**: in-process memory
//! - **file**: one file per entry under a directory
//! - **redis**: shared store for multi-process deployments
//! - **null**: stores nothing

use crate::error::Result;
use crate::value_objects::{CacheId, EnvelopeHeader};
use async_trait::async_trait;
use std::collections::HashMap;

/// Cache Backend Port
///
/// Every method takes a [`CacheId`] produced by the namespace layer.
/// Failures to reach the underlying store are reported as
/// [`crate::Error::BackendUnavailable`].
///
/// # Example
///
/// ```ignore
/// use cachly_domain::{CacheBackend, CacheId};
///
/// let id = CacheId::for_item("memory", "docs", "greeting")?;
/// backend.set(&id, r#"{"value":"hi","expires_at":0}"#, 0).await?;
/// assert!(backend.exists(&id).await?);
/// ```
#[async_trait]
pub trait CacheBackend: Send + Sync + std::fmt::Debug {
    /// Store a payload
    ///
    /// `expires_at` is the absolute epoch the payload expires at (`0` for
    /// never). Backends may use it to evict early; correctness never depends
    /// on it.
    ///
    /// # Returns
    /// Whether the write was accepted
    async fn set(&self, id: &CacheId, payload: &str, expires_at: i64) -> Result<bool>;

    /// Whether the backend holds data for `id`, expired or not
    async fn exists(&self, id: &CacheId) -> Result<bool>;

    /// Fetch the raw payload for `id`
    async fn get(&self, id: &CacheId) -> Result<Option<String>>;

    /// Remove `id`
    ///
    /// # Returns
    /// True if something was removed
    async fn delete(&self, id: &CacheId) -> Result<bool>;

    /// Every stored payload keyed by cache id
    async fn list_all(&self) -> Result<HashMap<String, String>>;

    /// Remove every entry this backend owns
    async fn flush(&self) -> Result<bool>;

    /// Name used to partition cache ids (e.g., "memory", "redis", "null")
    fn backend_name(&self) -> &str;

    /// Delete every expired entry the backend holds
    ///
    /// The default walks [`CacheBackend::list_all`] and drops payloads whose
    /// envelope header says they are past due at `now`. Payloads that are not
    /// envelopes are left alone.
    ///
    /// # Returns
    /// Number of entries removed
    async fn collect_garbage(&self, now: i64) -> Result<usize> {
        let mut removed = 0;
        for (raw_id, payload) in self.list_all().await? {
            let Ok(header) = EnvelopeHeader::parse(&payload) else {
                continue;
            };
            if header.is_expired_at(now) && self.delete(&CacheId::from_raw(raw_id)).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
