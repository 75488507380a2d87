//! Cache id derivation
//!
//! A [`CacheId`] is the physical storage key handed to a backend. It is a
//! SHA-256 digest over a kind tag, the backend name, the namespace and the
//! user key, so identical keys in different namespaces or backends never
//! share a slot.

use crate::constants::{
    CACHE_ID_COMPONENT_SEPARATOR, CACHE_ID_KIND_ITEM, CACHE_ID_KIND_REGISTRY,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Deterministic, non-empty storage key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheId(String);

impl CacheId {
    /// Derive the id of a user item (or collection handle)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] when `key` is empty.
    pub fn for_item(backend: &str, namespace: &str, key: &str) -> Result<Self> {
        if key.is_empty() {
            return Err(Error::invalid_key("Cache key cannot be empty"));
        }
        Ok(Self::digest(CACHE_ID_KIND_ITEM, backend, namespace, key))
    }

    /// Derive the id of a namespace's registry slot
    pub fn for_registry(backend: &str, namespace: &str, suffix: &str) -> Self {
        Self::digest(CACHE_ID_KIND_REGISTRY, backend, namespace, suffix)
    }

    /// Wrap an id read back from a backend listing
    pub fn from_raw<S: Into<String>>(raw: S) -> Self {
        Self(raw.into())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn digest(kind: &str, backend: &str, namespace: &str, key: &str) -> Self {
        let mut hasher = Sha256::new();
        for (i, part) in [kind, backend, namespace, key].iter().enumerate() {
            if i > 0 {
                let mut buf = [0u8; 4];
                hasher.update(CACHE_ID_COMPONENT_SEPARATOR.encode_utf8(&mut buf).as_bytes());
            }
            hasher.update(part.as_bytes());
        }
        Self(hex::encode(hasher.finalize()))
    }
}

impl fmt::Display for CacheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
