//! Tests for the moka backend

use cachly_domain::{CacheBackend, CacheId, Envelope};
use cachly_providers::cache::MokaBackend;

fn id(key: &str) -> CacheId {
    CacheId::for_item("moka", "tests", key).unwrap()
}

#[tokio::test]
async fn test_set_get_delete() {
    let backend = MokaBackend::new();
    let key = id("alpha");

    assert!(backend.set(&key, "payload", 0).await.unwrap());
    assert!(backend.exists(&key).await.unwrap());
    assert_eq!(backend.get(&key).await.unwrap().as_deref(), Some("payload"));

    assert!(backend.delete(&key).await.unwrap());
    assert!(!backend.delete(&key).await.unwrap());
    assert!(!backend.exists(&key).await.unwrap());
    assert_eq!(backend.get(&key).await.unwrap(), None);
}

#[tokio::test]
async fn test_list_all_and_flush() {
    let backend = MokaBackend::with_capacity(100);
    backend.set(&id("a"), "1", 0).await.unwrap();
    backend.set(&id("b"), "2", 0).await.unwrap();

    let all = backend.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all.get(id("a").as_str()).map(String::as_str), Some("1"));

    assert!(backend.flush().await.unwrap());
    assert!(backend.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_collect_garbage_drops_expired_envelopes() {
    let backend = MokaBackend::new();
    let stale = id("stale");
    let fresh = id("fresh");
    let old = serde_json::to_string(&Envelope::new("x", 10)).unwrap();
    let new = serde_json::to_string(&Envelope::new("y", 0)).unwrap();
    backend.set(&stale, &old, 10).await.unwrap();
    backend.set(&fresh, &new, 0).await.unwrap();

    assert_eq!(backend.collect_garbage(11).await.unwrap(), 1);
    assert!(!backend.exists(&stale).await.unwrap());
    assert!(backend.exists(&fresh).await.unwrap());
}

#[test]
fn test_reports_name_and_capacity() {
    let backend = MokaBackend::with_capacity(42);
    assert_eq!(backend.backend_name(), "moka");
    assert_eq!(backend.max_capacity(), Some(42));
    assert_eq!(MokaBackend::new().max_capacity(), None);
}

#[tokio::test]
async fn test_default_backend_keeps_every_entry() {
    let backend = MokaBackend::new();
    for n in 0..20_000 {
        backend.set(&id(&n.to_string()), "v", 0).await.unwrap();
    }

    for n in [0, 9_999, 10_000, 19_999] {
        assert!(backend.exists(&id(&n.to_string())).await.unwrap());
    }
    assert_eq!(backend.list_all().await.unwrap().len(), 20_000);
}
