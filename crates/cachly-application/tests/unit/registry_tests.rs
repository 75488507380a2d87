//! Tests for the key registry

use cachly_application::KeyRegistry;
use cachly_domain::{CacheBackend, CacheId};
use cachly_providers::cache::MokaBackend;
use std::sync::Arc;

fn slot() -> CacheId {
    CacheId::for_registry("memory", "tests", "keys")
}

fn cid(key: &str) -> CacheId {
    CacheId::for_item("memory", "tests", key).unwrap()
}

#[tokio::test]
async fn test_missing_slot_reads_as_empty() {
    let registry = KeyRegistry::new(Arc::new(MokaBackend::new()), slot());
    assert!(registry.list().await.unwrap().is_empty());
    assert!(!registry.contains(&cid("a")).await.unwrap());
}

#[tokio::test]
async fn test_register_is_idempotent() {
    let registry = KeyRegistry::new(Arc::new(MokaBackend::new()), slot());
    assert!(registry.register(&cid("a"), "a").await.unwrap());
    assert!(!registry.register(&cid("a"), "a").await.unwrap());

    let entries = registry.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries.get(cid("a").as_str()).map(String::as_str), Some("a"));
    assert_eq!(registry.key_for(&cid("a")).await.unwrap().as_deref(), Some("a"));
}

#[tokio::test]
async fn test_state_lives_in_backend() {
    let backend = Arc::new(MokaBackend::new());
    let first = KeyRegistry::new(backend.clone(), slot());
    first.register(&cid("a"), "a").await.unwrap();

    let second = KeyRegistry::new(backend.clone(), slot());
    assert!(second.contains(&cid("a")).await.unwrap());
    assert!(backend.exists(second.slot()).await.unwrap());
}

#[tokio::test]
async fn test_remove_and_clear() {
    let registry = KeyRegistry::new(Arc::new(MokaBackend::new()), slot());
    registry.register(&cid("a"), "a").await.unwrap();
    registry.register(&cid("b"), "b").await.unwrap();
    registry.register(&cid("c"), "c").await.unwrap();

    assert!(registry.remove(&cid("a")).await.unwrap());
    assert!(!registry.remove(&cid("a")).await.unwrap());
    assert_eq!(registry.remove_many(&[cid("b"), cid("zzz")]).await.unwrap(), 1);
    assert_eq!(registry.list().await.unwrap().len(), 1);

    registry.clear().await.unwrap();
    assert!(registry.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deferred_registry_writes_on_commit() {
    let backend = Arc::new(MokaBackend::new());
    let deferred = KeyRegistry::deferred(backend.clone(), slot());
    let observer = KeyRegistry::new(backend.clone(), slot());

    deferred.register(&cid("a"), "a").await.unwrap();
    assert!(deferred.contains(&cid("a")).await.unwrap());
    assert!(!observer.contains(&cid("a")).await.unwrap());

    assert!(deferred.commit().await.unwrap());
    assert!(observer.contains(&cid("a")).await.unwrap());
    assert!(!deferred.commit().await.unwrap());
}

#[tokio::test]
async fn test_commit_is_noop_when_not_deferred() {
    let registry = KeyRegistry::new(Arc::new(MokaBackend::new()), slot());
    registry.register(&cid("a"), "a").await.unwrap();
    assert!(!registry.commit().await.unwrap());
}

#[tokio::test]
async fn test_unreadable_slot_reads_as_empty() {
    let backend = Arc::new(MokaBackend::new());
    backend.set(&slot(), "not an envelope", 0).await.unwrap();
    let registry = KeyRegistry::new(backend, slot());
    assert!(registry.list().await.unwrap().is_empty());
}
