//! Tests for nested collections

use crate::common::{fixture, fixture_with, options};
use cachly_application::NamespaceCache;
use cachly_domain::{Error, Expires};
use std::collections::BTreeMap;
use std::sync::Arc;

#[tokio::test]
async fn test_collection_namespace() {
    let f = fixture("app");
    let users = f.cache.collection("users").await.unwrap();
    assert_eq!(users.namespace(), "app-collection-users");
    assert_eq!(users.backend_name(), "memory");
}

#[tokio::test]
async fn test_collection_handle_is_memoized() {
    let f = fixture("app");
    let a = f.cache.collection("users").await.unwrap();
    let b = f.cache.collection("users").await.unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[tokio::test]
async fn test_nested_values_are_invisible_to_parent() {
    let f = fixture("app");
    f.cache.set("top", &1, Expires::Never).await.unwrap();

    let inner = f
        .cache
        .collection("x")
        .await
        .unwrap()
        .collection("y")
        .await
        .unwrap();
    inner.set("k", &2, Expires::Never).await.unwrap();

    let again = f
        .cache
        .collection("x")
        .await
        .unwrap()
        .collection("y")
        .await
        .unwrap();
    assert_eq!(again.get::<i32>("k").await.unwrap(), Some(2));
    assert_eq!(inner.namespace(), "app-collection-x-collection-y");

    let parent: BTreeMap<String, i32> = f.cache.get_all().await.unwrap();
    assert_eq!(parent.keys().collect::<Vec<_>>(), vec!["top"]);
    assert_eq!(f.cache.get::<i32>("k").await.unwrap(), None);
}

#[tokio::test]
async fn test_collections_are_enumerable() {
    let f = fixture("app");
    f.cache.collection("b").await.unwrap();
    f.cache.collection("a").await.unwrap();

    assert_eq!(
        f.cache.collection_names().await.unwrap(),
        vec!["a".to_string(), "b".to_string()]
    );

    let mut seen = Vec::new();
    f.cache
        .each_collection(|child, name| seen.push(format!("{name}@{}", child.namespace())))
        .await
        .unwrap();
    assert_eq!(
        seen,
        vec!["a@app-collection-a".to_string(), "b@app-collection-b".to_string()]
    );
}

#[tokio::test]
async fn test_collection_registry_is_persistent() {
    let f = fixture("app");
    f.cache
        .collection("users")
        .await
        .unwrap()
        .set("u", &1, Expires::Never)
        .await
        .unwrap();

    let reopened = cachly_application::NamespaceCache::with_options(
        "app",
        f.backend.clone(),
        crate::common::options(&f.clock),
    )
    .unwrap();
    assert_eq!(
        reopened.collection_names().await.unwrap(),
        vec!["users".to_string()]
    );
    let users = reopened.collection("users").await.unwrap();
    assert_eq!(users.get::<i32>("u").await.unwrap(), Some(1));
}

#[tokio::test]
async fn test_collection_keys_do_not_mix_with_item_keys() {
    let f = fixture("app");
    f.cache.collection("users").await.unwrap();
    assert!(f.cache.keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_collection() {
    let f = fixture("app");
    let users = f.cache.collection("users").await.unwrap();
    users.set("u", &1, Expires::Never).await.unwrap();

    assert!(f.cache.delete_collection("users").await.unwrap());
    assert!(f.cache.collection_names().await.unwrap().is_empty());
    assert_eq!(users.get::<i32>("u").await.unwrap(), None);
    assert!(!f.cache.delete_collection("users").await.unwrap());
}

#[tokio::test]
async fn test_empty_collection_name_is_invalid() {
    let f = fixture("app");
    assert!(matches!(
        f.cache.collection("").await,
        Err(Error::InvalidKey { .. })
    ));
}

#[tokio::test]
async fn test_commit_writes_deferred_collection_registries() {
    let f = fixture_with("deferred", |o| o.with_deferred_registry(true));
    let outer = f.cache.collection("c").await.unwrap();
    outer.set("k", &1, Expires::Never).await.unwrap();
    let inner = outer.collection("d").await.unwrap();
    inner.set("deep", &2, Expires::Never).await.unwrap();

    assert!(f.cache.commit().await.unwrap());
    assert!(!f.cache.commit().await.unwrap());

    let fresh = NamespaceCache::with_options(
        "deferred",
        f.backend.clone(),
        options(&f.clock).with_deferred_registry(true),
    )
    .unwrap();
    assert_eq!(fresh.collection_names().await.unwrap(), vec!["c".to_string()]);
    let reopened = fresh.collection("c").await.unwrap();
    assert_eq!(reopened.keys().await.unwrap(), vec!["k".to_string()]);
    let nested = reopened.collection("d").await.unwrap();
    assert_eq!(nested.keys().await.unwrap(), vec!["deep".to_string()]);
}
