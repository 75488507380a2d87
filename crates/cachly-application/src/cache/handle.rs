//! Per-key handle
//!
//! [`KeyHandle`] binds one key of a [`NamespaceCache`] so repeated calls do
//! not have to pass it again.
//!
//! ## Example
//!
//! ```ignore
//! let token = cache.key("session-token");
//! token.set(&"abc", Expires::after_secs(60)).await?;
//! let value: Option<String> = token.get().await?;
//! ```

use super::namespace::NamespaceCache;
use cachly_domain::error::Result;
use cachly_domain::{CacheId, Expires, ExpiryStatus};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// One key of a [`NamespaceCache`]
#[derive(Debug, Clone)]
pub struct KeyHandle<'a> {
    cache: &'a NamespaceCache,
    key: String,
}

impl NamespaceCache {
    /// Handle bound to `key`
    ///
    /// The key is validated on first use, not here.
    pub fn key(&self, key: impl Into<String>) -> KeyHandle<'_> {
        KeyHandle {
            cache: self,
            key: key.into(),
        }
    }
}

impl<'a> KeyHandle<'a> {
    /// The bound key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The cache this handle reads and writes
    pub fn cache(&self) -> &'a NamespaceCache {
        self.cache
    }

    /// Cache id of the bound key
    pub fn cache_id(&self) -> Result<CacheId> {
        self.cache.cache_id(&self.key)
    }

    /// See [`NamespaceCache::set`]
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        value: &T,
        expires: impl Into<Expires>,
    ) -> Result<CacheId> {
        self.cache.set(&self.key, value, expires).await
    }

    /// See [`NamespaceCache::get`]
    pub async fn get<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        self.cache.get(&self.key).await
    }

    /// See [`NamespaceCache::get_or`]
    pub async fn get_or<T: DeserializeOwned>(&self, default: T) -> Result<T> {
        self.cache.get_or(&self.key, default).await
    }

    pub async fn exists(&self) -> Result<bool> {
        self.cache.exists(&self.key).await
    }

    pub async fn is_expired(&self) -> Result<bool> {
        self.cache.is_expired(&self.key).await
    }

    pub async fn expires_at(&self) -> Result<ExpiryStatus> {
        self.cache.expires_at(&self.key).await
    }

    /// Track the key without writing a value
    pub async fn register(&self) -> Result<CacheId> {
        self.cache.register_key(&self.key).await
    }

    pub async fn delete(&self) -> Result<bool> {
        self.cache.delete(&self.key).await
    }
}
