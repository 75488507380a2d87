//! Key registry
//!
//! Maps cache ids back to the user keys that produced them. The whole map is
//! stored as one never-expiring envelope in a reserved backend slot, so a
//! namespace can be enumerated without asking the backend to list its rows.
//!
//! Writes are read-modify-write with no compare-and-swap: two processes
//! registering at the same time race, and the last writer wins.

use super::codec::EnvelopeCodec;
use cachly_domain::constants::NEVER_EXPIRES;
use cachly_domain::error::Result;
use cachly_domain::{CacheBackend, CacheId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{trace, warn};

/// Working copy kept in memory while writes are deferred
#[derive(Debug, Default)]
struct Pending {
    entries: Option<BTreeMap<String, String>>,
    dirty: bool,
}

/// Persistent cache id → user key map for one namespace
#[derive(Debug)]
pub struct KeyRegistry {
    backend: Arc<dyn CacheBackend>,
    slot: CacheId,
    pending: Option<Mutex<Pending>>,
}

impl KeyRegistry {
    /// Registry stored under `slot`, persisting on every change
    pub fn new(backend: Arc<dyn CacheBackend>, slot: CacheId) -> Self {
        Self {
            backend,
            slot,
            pending: None,
        }
    }

    /// Registry that buffers changes until [`KeyRegistry::commit`]
    pub fn deferred(backend: Arc<dyn CacheBackend>, slot: CacheId) -> Self {
        Self {
            backend,
            slot,
            pending: Some(Mutex::new(Pending::default())),
        }
    }

    /// The backend slot holding the map
    pub fn slot(&self) -> &CacheId {
        &self.slot
    }

    /// Track `cid` as produced by `key`
    ///
    /// # Returns
    /// False when the id was already tracked (nothing is written)
    pub async fn register(&self, cid: &CacheId, key: &str) -> Result<bool> {
        let mut entries = self.list().await?;
        if entries.contains_key(cid.as_str()) {
            return Ok(false);
        }
        entries.insert(cid.to_string(), key.to_string());
        self.persist(entries).await?;
        Ok(true)
    }

    /// Stop tracking `cid`
    ///
    /// # Returns
    /// True if the id was tracked
    pub async fn remove(&self, cid: &CacheId) -> Result<bool> {
        Ok(self.remove_many(std::slice::from_ref(cid)).await? > 0)
    }

    /// Stop tracking every id in `cids`, persisting once
    ///
    /// # Returns
    /// Number of ids that were tracked
    pub async fn remove_many(&self, cids: &[CacheId]) -> Result<usize> {
        let mut entries = self.list().await?;
        let removed = cids
            .iter()
            .filter(|cid| entries.remove(cid.as_str()).is_some())
            .count();
        if removed > 0 {
            self.persist(entries).await?;
        }
        Ok(removed)
    }

    /// Every tracked id with its user key
    ///
    /// A slot that was never written reads as an empty map.
    pub async fn list(&self) -> Result<BTreeMap<String, String>> {
        if let Some(pending) = &self.pending {
            let mut pending = pending.lock().await;
            if let Some(entries) = &pending.entries {
                return Ok(entries.clone());
            }
            let entries = self.load().await?;
            pending.entries = Some(entries.clone());
            return Ok(entries);
        }
        self.load().await
    }

    /// Whether `cid` is tracked
    pub async fn contains(&self, cid: &CacheId) -> Result<bool> {
        Ok(self.list().await?.contains_key(cid.as_str()))
    }

    /// User key tracked for `cid`
    pub async fn key_for(&self, cid: &CacheId) -> Result<Option<String>> {
        Ok(self.list().await?.remove(cid.as_str()))
    }

    /// Reset to an empty map
    pub async fn clear(&self) -> Result<()> {
        self.persist(BTreeMap::new()).await
    }

    /// Write buffered changes to the backend
    ///
    /// # Returns
    /// True if anything was written; always false for non-deferred registries
    pub async fn commit(&self) -> Result<bool> {
        let Some(pending) = &self.pending else {
            return Ok(false);
        };
        let mut pending = pending.lock().await;
        if !pending.dirty {
            return Ok(false);
        }
        let entries = pending.entries.clone().unwrap_or_default();
        self.store(&entries).await?;
        pending.dirty = false;
        Ok(true)
    }

    async fn load(&self) -> Result<BTreeMap<String, String>> {
        let Some(payload) = self.backend.get(&self.slot).await? else {
            trace!(slot = %self.slot, "Registry slot empty");
            return Ok(BTreeMap::new());
        };
        match EnvelopeCodec::decode::<BTreeMap<String, String>>(&payload) {
            Ok(envelope) => Ok(envelope.value),
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "Registry slot unreadable, starting empty");
                Ok(BTreeMap::new())
            }
        }
    }

    async fn persist(&self, entries: BTreeMap<String, String>) -> Result<()> {
        if let Some(pending) = &self.pending {
            let mut pending = pending.lock().await;
            pending.entries = Some(entries);
            pending.dirty = true;
            return Ok(());
        }
        self.store(&entries).await
    }

    async fn store(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let payload = EnvelopeCodec::encode(entries, NEVER_EXPIRES)?;
        self.backend.set(&self.slot, &payload, NEVER_EXPIRES).await?;
        trace!(slot = %self.slot, entries = entries.len(), "Registry persisted");
        Ok(())
    }
}
