//! Tests for compute-once memoization

use crate::common::fixture;
use cachly_domain::{Error, Expires};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

#[tokio::test]
async fn test_once_runs_producer_once() {
    let f = fixture("once");
    let counter = AtomicUsize::new(0);
    let calls = &counter;
    let produce = move || async move {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok::<_, Error>(vec!["expensive".to_string()])
    };

    let parts = [json!("report"), json!(2024)];
    let first: Vec<String> = f.cache.once(&parts, produce).await.unwrap();
    let second: Vec<String> = f.cache.once(&parts, produce).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_changing_any_part_recomputes() {
    let f = fixture("once-parts");
    let counter = AtomicUsize::new(0);
    let calls = &counter;
    let produce = move || async move { Ok::<_, Error>(calls.fetch_add(1, Ordering::SeqCst)) };

    f.cache.once(&[json!("a"), json!(true)], produce).await.unwrap();
    f.cache.once(&[json!("a"), json!(false)], produce).await.unwrap();
    f.cache.once(&[json!("b"), json!(true)], produce).await.unwrap();
    f.cache.once(&[json!(true), json!("a")], produce).await.unwrap();
    f.cache.once(&[json!("a"), json!(true)], produce).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_once_registers_packed_key() {
    let f = fixture("once-key");
    let value: i32 = f
        .cache
        .once(&[json!("sum"), json!([1, 2])], || async { Ok(3) })
        .await
        .unwrap();

    assert_eq!(value, 3);
    assert_eq!(f.cache.keys().await.unwrap(), vec!["sum,1,2".to_string()]);
    assert_eq!(f.cache.get::<i32>("sum,1,2").await.unwrap(), Some(3));
}

#[tokio::test]
async fn test_once_force_recomputes() {
    let f = fixture("once-force");
    let parts = [json!("counter")];

    let first: u32 = f.cache.once(&parts, || async { Ok(1) }).await.unwrap();
    let cached: u32 = f
        .cache
        .once_force(&parts, || async { Ok(2) }, false)
        .await
        .unwrap();
    let forced: u32 = f
        .cache
        .once_force(&parts, || async { Ok(3) }, true)
        .await
        .unwrap();
    let after: u32 = f.cache.once(&parts, || async { Ok(4) }).await.unwrap();

    assert_eq!((first, cached, forced, after), (1, 1, 3, 3));
}

#[tokio::test]
async fn test_once_with_expiry_recomputes_after_ttl() {
    let f = fixture("once-ttl");
    let counter = AtomicUsize::new(0);
    let calls = &counter;
    let produce = move || async move { Ok::<_, Error>(calls.fetch_add(1, Ordering::SeqCst)) };
    let parts = [json!("rates")];

    let a = f
        .cache
        .once_with_expiry(&parts, produce, Expires::after_secs(60))
        .await
        .unwrap();
    f.clock.advance(30);
    let b = f
        .cache
        .once_with_expiry(&parts, produce, Expires::after_secs(60))
        .await
        .unwrap();
    f.clock.advance(31);
    let c = f
        .cache
        .once_with_expiry(&parts, produce, Expires::after_secs(60))
        .await
        .unwrap();

    assert_eq!((a, b, c), (0, 0, 1));
}

#[tokio::test]
async fn test_failing_producer_caches_nothing() {
    let f = fixture("once-fail");
    let parts = [json!("flaky")];

    let result: Result<i32, _> = f
        .cache
        .once(&parts, || async { Err(Error::internal("upstream down")) })
        .await;
    assert!(matches!(result, Err(Error::Internal { .. })));
    assert!(f.cache.keys().await.unwrap().is_empty());

    let value: i32 = f.cache.once(&parts, || async { Ok(7) }).await.unwrap();
    assert_eq!(value, 7);
}

#[tokio::test]
async fn test_empty_parts_are_rejected() {
    let f = fixture("once-empty");
    let result: Result<i32, _> = f.cache.once(&[], || async { Ok(1) }).await;
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}
