//! Unit tests for the default `CacheBackend` behaviour

use async_trait::async_trait;
use cachly_domain::{CacheBackend, CacheId, Envelope, Result};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct MapBackend {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl CacheBackend for MapBackend {
    async fn set(&self, id: &CacheId, payload: &str, _expires_at: i64) -> Result<bool> {
        self.entries
            .lock()
            .unwrap()
            .insert(id.to_string(), payload.to_string());
        Ok(true)
    }

    async fn exists(&self, id: &CacheId) -> Result<bool> {
        Ok(self.entries.lock().unwrap().contains_key(id.as_str()))
    }

    async fn get(&self, id: &CacheId) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(id.as_str()).cloned())
    }

    async fn delete(&self, id: &CacheId) -> Result<bool> {
        Ok(self.entries.lock().unwrap().remove(id.as_str()).is_some())
    }

    async fn list_all(&self) -> Result<HashMap<String, String>> {
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn flush(&self) -> Result<bool> {
        self.entries.lock().unwrap().clear();
        Ok(true)
    }

    fn backend_name(&self) -> &str {
        "map"
    }
}

async fn put(backend: &MapBackend, key: &str, expires_at: i64) -> CacheId {
    let id = CacheId::for_item("map", "ns", key).unwrap();
    let payload = serde_json::to_string(&Envelope::new(key, expires_at)).unwrap();
    backend.set(&id, &payload, expires_at).await.unwrap();
    id
}

#[tokio::test]
async fn test_collect_garbage_removes_only_expired() {
    let backend = MapBackend::default();
    let stale = put(&backend, "stale", 100).await;
    let fresh = put(&backend, "fresh", 500).await;
    let forever = put(&backend, "forever", 0).await;

    let removed = backend.collect_garbage(200).await.unwrap();

    assert_eq!(removed, 1);
    assert!(!backend.exists(&stale).await.unwrap());
    assert!(backend.exists(&fresh).await.unwrap());
    assert!(backend.exists(&forever).await.unwrap());
}

#[tokio::test]
async fn test_collect_garbage_skips_foreign_payloads() {
    let backend = MapBackend::default();
    let id = CacheId::from_raw("foreign");
    backend.set(&id, "plain text", 0).await.unwrap();

    assert_eq!(backend.collect_garbage(i64::MAX).await.unwrap(), 0);
    assert!(backend.exists(&id).await.unwrap());
}
