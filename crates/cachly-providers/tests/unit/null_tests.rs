//! Tests for the null backend

use cachly_domain::{CacheBackend, CacheId};
use cachly_providers::cache::NullBackend;

#[tokio::test]
async fn test_accepts_writes_but_stores_nothing() {
    let backend = NullBackend::new();
    let key = CacheId::for_item("null", "tests", "anything").unwrap();

    assert!(backend.set(&key, "payload", 0).await.unwrap());
    assert!(!backend.exists(&key).await.unwrap());
    assert_eq!(backend.get(&key).await.unwrap(), None);
    assert!(!backend.delete(&key).await.unwrap());
    assert!(backend.list_all().await.unwrap().is_empty());
    assert!(backend.flush().await.unwrap());
    assert_eq!(backend.backend_name(), "null");
}
