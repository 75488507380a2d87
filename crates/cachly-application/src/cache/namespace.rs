//! Namespace cache
//!
//! [`NamespaceCache`] is the handle application code works with. It hashes
//! user keys into cache ids, wraps values in envelopes, and keeps the
//! namespace's [`KeyRegistry`] in step with every write and delete.
//!
//! ## Expiry policy
//!
//! Reads never delete. An expired entry is a miss for `get`, `exists` and the
//! enumeration methods, but it stays in the backend (and in the registry)
//! until `delete`, `delete_by_pattern`, `prune_expired`, `flush` or backend
//! garbage collection removes it.

use super::codec::EnvelopeCodec;
use super::registry::KeyRegistry;
use cachly_domain::constants::{COLLECTION_REGISTRY_SUFFIX, KEY_REGISTRY_SUFFIX};
use cachly_domain::error::{Error, Result};
use cachly_domain::{CacheBackend, CacheId, Clock, Expires, ExpiryStatus, SystemClock};
use dashmap::DashMap;
use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Construction options shared by a cache and every collection below it
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// Name hashed into cache ids; defaults to the backend's own name
    pub backend_name: Option<String>,
    /// Time source for expiry
    pub clock: Arc<dyn Clock>,
    /// Reject writes to keys that were not registered with `register_key`
    pub strict_keys: bool,
    /// Buffer registry writes until `commit`
    pub deferred_registry: bool,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            backend_name: None,
            clock: Arc::new(SystemClock),
            strict_keys: false,
            deferred_registry: false,
        }
    }
}

impl CacheOptions {
    /// Override the name hashed into cache ids
    pub fn with_backend_name(mut self, name: impl Into<String>) -> Self {
        self.backend_name = Some(name.into());
        self
    }

    /// Use a different time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Require `register_key` before `set`
    pub fn with_strict_keys(mut self, strict: bool) -> Self {
        self.strict_keys = strict;
        self
    }

    /// Buffer registry writes until `commit`
    pub fn with_deferred_registry(mut self, deferred: bool) -> Self {
        self.deferred_registry = deferred;
        self
    }
}

/// A cache scoped to one namespace on one backend
#[derive(Debug)]
pub struct NamespaceCache {
    pub(super) namespace: String,
    pub(super) backend_name: String,
    pub(super) backend: Arc<dyn CacheBackend>,
    pub(super) keys: KeyRegistry,
    pub(super) collection_keys: KeyRegistry,
    pub(super) collections: DashMap<String, Arc<NamespaceCache>>,
    pub(super) options: CacheOptions,
}

impl NamespaceCache {
    /// Cache over `backend` with default options
    pub fn new(namespace: impl Into<String>, backend: Arc<dyn CacheBackend>) -> Result<Self> {
        Self::with_options(namespace, backend, CacheOptions::default())
    }

    /// Cache over `backend` with explicit options
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `namespace` is empty.
    pub fn with_options(
        namespace: impl Into<String>,
        backend: Arc<dyn CacheBackend>,
        options: CacheOptions,
    ) -> Result<Self> {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(Error::invalid_argument("Namespace cannot be empty"));
        }
        let backend_name = options
            .backend_name
            .clone()
            .unwrap_or_else(|| backend.backend_name().to_string());

        let registry = |suffix: &str| {
            let slot = CacheId::for_registry(&backend_name, &namespace, suffix);
            if options.deferred_registry {
                KeyRegistry::deferred(Arc::clone(&backend), slot)
            } else {
                KeyRegistry::new(Arc::clone(&backend), slot)
            }
        };
        let keys = registry(KEY_REGISTRY_SUFFIX);
        let collection_keys = registry(COLLECTION_REGISTRY_SUFFIX);

        Ok(Self {
            namespace,
            backend_name,
            backend,
            keys,
            collection_keys,
            collections: DashMap::new(),
            options,
        })
    }

    /// The namespace this cache is scoped to
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The backend name hashed into cache ids
    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// The shared backend
    pub fn backend(&self) -> &Arc<dyn CacheBackend> {
        &self.backend
    }

    /// Options this cache was built with
    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// The registry of item keys
    pub fn registry(&self) -> &KeyRegistry {
        &self.keys
    }

    pub(super) fn now(&self) -> i64 {
        self.options.clock.now_epoch_secs()
    }

    /// Cache id for `key` in this namespace
    pub fn cache_id(&self, key: &str) -> Result<CacheId> {
        CacheId::for_item(&self.backend_name, &self.namespace, key)
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Store `value` under `key`
    ///
    /// `expires` is resolved against the cache clock before anything is
    /// written, so relative expiries count from this call. An absolute
    /// expiry in the past stores the entry already expired.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidKey`] for an empty key
    /// - [`Error::UnregisteredKey`] in strict mode when `key` was never registered
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        expires: impl Into<Expires>,
    ) -> Result<CacheId> {
        let cid = self.cache_id(key)?;
        if self.options.strict_keys && !self.keys.contains(&cid).await? {
            return Err(Error::unregistered_key(key));
        }
        self.store(&cid, key, value, expires.into()).await?;
        Ok(cid)
    }

    /// Track `key` without writing a value; required before `set` in strict mode
    pub async fn register_key(&self, key: &str) -> Result<CacheId> {
        let cid = self.cache_id(key)?;
        self.keys.register(&cid, key).await?;
        Ok(cid)
    }

    pub(super) async fn store<T: Serialize + ?Sized>(
        &self,
        cid: &CacheId,
        key: &str,
        value: &T,
        expires: Expires,
    ) -> Result<()> {
        let expires_at = expires.resolve(self.now());
        let payload = EnvelopeCodec::encode(value, expires_at)?;
        self.backend.set(cid, &payload, expires_at).await?;
        self.keys.register(cid, key).await?;
        debug!(namespace = %self.namespace, key, expires_at, "Cache entry stored");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Value stored under `key`, or `None` when absent or expired
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] when a live entry does not hold a `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let cid = self.cache_id(key)?;
        self.read_live(&cid, key).await
    }

    /// Value stored under `key`, or `default` when absent or expired
    pub async fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.get(key).await?.unwrap_or(default))
    }

    /// Live values for each of `keys`; misses are left out
    pub async fn get_many<T, I, S>(&self, keys: I) -> Result<BTreeMap<String, T>>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut found = BTreeMap::new();
        for key in keys {
            let key = key.as_ref();
            if let Some(value) = self.get(key).await? {
                found.insert(key.to_string(), value);
            }
        }
        Ok(found)
    }

    /// Whether `key` holds a live value
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let cid = self.cache_id(key)?;
        Ok(matches!(
            self.status_of(&cid).await?,
            ExpiryStatus::Never | ExpiryStatus::At(_)
        ))
    }

    /// Whether `key` should be considered expired
    ///
    /// True for keys this namespace does not track, for tracked keys whose
    /// data is gone or unreadable, and for entries past their expiry.
    pub async fn is_expired(&self, key: &str) -> Result<bool> {
        let cid = self.cache_id(key)?;
        if !self.keys.contains(&cid).await? {
            return Ok(true);
        }
        Ok(matches!(
            self.status_of(&cid).await?,
            ExpiryStatus::Missing | ExpiryStatus::Expired
        ))
    }

    /// Expiration state of `key`
    pub async fn expires_at(&self, key: &str) -> Result<ExpiryStatus> {
        let cid = self.cache_id(key)?;
        self.status_of(&cid).await
    }

    pub(super) async fn status_of(&self, cid: &CacheId) -> Result<ExpiryStatus> {
        let Some(payload) = self.backend.get(cid).await? else {
            return Ok(ExpiryStatus::Missing);
        };
        Ok(match EnvelopeCodec::header(&payload) {
            Ok(header) => ExpiryStatus::from_stored(header.expires_at, self.now()),
            Err(_) => ExpiryStatus::Expired,
        })
    }

    pub(super) async fn read_live<T: DeserializeOwned>(
        &self,
        cid: &CacheId,
        key: &str,
    ) -> Result<Option<T>> {
        let Some(payload) = self.backend.get(cid).await? else {
            trace!(namespace = %self.namespace, key, "Cache miss");
            return Ok(None);
        };
        let value = EnvelopeCodec::decode_live(&payload, self.now())?;
        if value.is_none() {
            trace!(namespace = %self.namespace, key, "Cache entry expired");
        }
        Ok(value)
    }

    // ------------------------------------------------------------------
    // Deletes
    // ------------------------------------------------------------------

    /// Remove `key` from the backend and the registry
    ///
    /// # Returns
    /// True if either held anything; deleting an absent key is not an error
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let cid = self.cache_id(key)?;
        let had_data = self.backend.delete(&cid).await?;
        let was_tracked = self.keys.remove(&cid).await?;
        if had_data || was_tracked {
            debug!(namespace = %self.namespace, key, "Cache entry deleted");
        }
        Ok(had_data || was_tracked)
    }

    /// Delete every tracked key matching the regular expression `pattern`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `pattern` does not compile.
    pub async fn delete_by_pattern(&self, pattern: &str) -> Result<usize> {
        let regex = compile_pattern(pattern)?;
        self.delete_matching(&regex).await
    }

    /// Delete every tracked key matched by `regex`
    ///
    /// # Returns
    /// Number of keys removed
    pub async fn delete_matching(&self, regex: &Regex) -> Result<usize> {
        let mut doomed = Vec::new();
        for (raw, key) in self.keys.list().await? {
            if regex.is_match(&key) {
                let cid = CacheId::from_raw(raw);
                self.backend.delete(&cid).await?;
                doomed.push(cid);
            }
        }
        let removed = self.keys.remove_many(&doomed).await?;
        debug!(
            namespace = %self.namespace,
            pattern = regex.as_str(),
            removed,
            "Deleted by pattern"
        );
        Ok(removed)
    }

    /// Delete every live entry accepted by `predicate`
    ///
    /// Expired entries are not offered to `predicate`.
    ///
    /// # Returns
    /// Number of keys removed
    pub async fn delete_where<T, F>(&self, mut predicate: F) -> Result<usize>
    where
        T: DeserializeOwned,
        F: FnMut(&str, &T) -> bool,
    {
        let mut doomed = Vec::new();
        for (raw, key) in self.keys.list().await? {
            let cid = CacheId::from_raw(raw);
            let Some(value) = self.read_live::<T>(&cid, &key).await? else {
                continue;
            };
            if predicate(&key, &value) {
                self.backend.delete(&cid).await?;
                doomed.push(cid);
            }
        }
        let removed = self.keys.remove_many(&doomed).await?;
        debug!(namespace = %self.namespace, removed, "Deleted by predicate");
        Ok(removed)
    }

    /// Delete every tracked entry that is expired or whose data is gone
    ///
    /// # Returns
    /// Number of keys removed
    pub async fn prune_expired(&self) -> Result<usize> {
        let mut doomed = Vec::new();
        for raw in self.keys.list().await?.into_keys() {
            let cid = CacheId::from_raw(raw);
            match self.status_of(&cid).await? {
                ExpiryStatus::Expired => {
                    self.backend.delete(&cid).await?;
                    doomed.push(cid);
                }
                ExpiryStatus::Missing => doomed.push(cid),
                ExpiryStatus::Never | ExpiryStatus::At(_) => {}
            }
        }
        let removed = self.keys.remove_many(&doomed).await?;
        debug!(namespace = %self.namespace, removed, "Pruned expired entries");
        Ok(removed)
    }

    /// Delete every tracked entry and clear the registry
    ///
    /// Collections are separate namespaces and are left untouched.
    ///
    /// # Returns
    /// Number of keys that were tracked
    pub async fn flush(&self) -> Result<usize> {
        let tracked = self.keys.list().await?;
        for raw in tracked.keys() {
            self.backend.delete(&CacheId::from_raw(raw.as_str())).await?;
        }
        self.keys.clear().await?;
        debug!(namespace = %self.namespace, removed = tracked.len(), "Namespace flushed");
        Ok(tracked.len())
    }

    // ------------------------------------------------------------------
    // Enumeration
    // ------------------------------------------------------------------

    /// Every live key → value pair this namespace tracks
    ///
    /// Entries whose data is gone or expired are skipped.
    pub async fn get_all<T: DeserializeOwned>(&self) -> Result<BTreeMap<String, T>> {
        let mut live = BTreeMap::new();
        for (raw, key) in self.keys.list().await? {
            let cid = CacheId::from_raw(raw);
            if let Some(value) = self.read_live(&cid, &key).await? {
                live.insert(key, value);
            }
        }
        Ok(live)
    }

    /// Live pairs whose key matches the regular expression `pattern`
    pub async fn filter_by_pattern<T: DeserializeOwned>(
        &self,
        pattern: &str,
    ) -> Result<BTreeMap<String, T>> {
        let regex = compile_pattern(pattern)?;
        let mut live = BTreeMap::new();
        for (raw, key) in self.keys.list().await? {
            if !regex.is_match(&key) {
                continue;
            }
            if let Some(value) = self.read_live(&CacheId::from_raw(raw), &key).await? {
                live.insert(key, value);
            }
        }
        Ok(live)
    }

    /// Call `f` with every live pair
    pub async fn each<T, F>(&self, mut f: F) -> Result<()>
    where
        T: DeserializeOwned,
        F: FnMut(&str, T),
    {
        for (key, value) in self.get_all::<T>().await? {
            f(&key, value);
        }
        Ok(())
    }

    /// Live pairs accepted by `predicate`
    pub async fn filter<T, F>(&self, mut predicate: F) -> Result<BTreeMap<String, T>>
    where
        T: DeserializeOwned,
        F: FnMut(&str, &T) -> bool,
    {
        let mut all = self.get_all::<T>().await?;
        all.retain(|key, value| predicate(key, value));
        Ok(all)
    }

    /// Live pairs with each value transformed by `transform`
    pub async fn map<T, U, F>(&self, mut transform: F) -> Result<BTreeMap<String, U>>
    where
        T: DeserializeOwned,
        F: FnMut(&str, T) -> U,
    {
        Ok(self
            .get_all::<T>()
            .await?
            .into_iter()
            .map(|(key, value)| {
                let mapped = transform(&key, value);
                (key, mapped)
            })
            .collect())
    }

    /// Every key the registry tracks, live or not
    pub async fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.keys.list().await?.into_values().collect();
        keys.sort();
        Ok(keys)
    }

    /// The raw registry: cache id → user key
    pub async fn id_key_pairs(&self) -> Result<BTreeMap<String, String>> {
        self.keys.list().await
    }

    /// Write deferred registry changes for this namespace and every
    /// collection opened through it, nested ones included
    ///
    /// # Returns
    /// True if any registry had pending changes
    pub async fn commit(&self) -> Result<bool> {
        let mut changed = self.keys.commit().await?;
        changed |= self.collection_keys.commit().await?;

        let children: Vec<Arc<NamespaceCache>> = self
            .collections
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        for child in children {
            changed |= Box::pin(child.commit()).await?;
        }
        Ok(changed)
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::invalid_argument(format!("Invalid key pattern '{pattern}': {e}")))
}
