//! Tests for the file backend

use cachly_domain::{CacheBackend, CacheId, Error};
use cachly_providers::cache::FileBackend;
use tempfile::TempDir;

fn id(key: &str) -> CacheId {
    CacheId::for_item("file", "tests", key).unwrap()
}

#[tokio::test]
async fn test_entries_are_files() {
    let dir = TempDir::new().unwrap();
    let backend = FileBackend::new(dir.path()).unwrap();
    let key = id("alpha");

    backend.set(&key, r#"{"value":1,"expires_at":0}"#, 0).await.unwrap();

    let path = dir.path().join(format!("{key}.cache"));
    assert!(path.exists());
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        r#"{"value":1,"expires_at":0}"#
    );
    assert!(backend.exists(&key).await.unwrap());
}

#[tokio::test]
async fn test_overwrite_and_delete() {
    let dir = TempDir::new().unwrap();
    let backend = FileBackend::new(dir.path()).unwrap();
    let key = id("alpha");

    backend.set(&key, "first", 0).await.unwrap();
    backend.set(&key, "second", 0).await.unwrap();
    assert_eq!(backend.get(&key).await.unwrap().as_deref(), Some("second"));

    assert!(backend.delete(&key).await.unwrap());
    assert!(!backend.delete(&key).await.unwrap());
    assert_eq!(backend.get(&key).await.unwrap(), None);
}

#[tokio::test]
async fn test_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let key = id("persistent");
    FileBackend::new(dir.path())
        .unwrap()
        .set(&key, "kept", 0)
        .await
        .unwrap();

    let reopened = FileBackend::new(dir.path()).unwrap();
    assert_eq!(reopened.get(&key).await.unwrap().as_deref(), Some("kept"));
}

#[tokio::test]
async fn test_flush_leaves_foreign_files() {
    let dir = TempDir::new().unwrap();
    let backend = FileBackend::new(dir.path()).unwrap();
    backend.set(&id("a"), "1", 0).await.unwrap();
    backend.set(&id("b"), "2", 0).await.unwrap();
    std::fs::write(dir.path().join("notes.txt"), "mine").unwrap();

    assert_eq!(backend.list_all().await.unwrap().len(), 2);
    assert!(backend.flush().await.unwrap());

    assert!(backend.list_all().await.unwrap().is_empty());
    assert!(dir.path().join("notes.txt").exists());
}

#[tokio::test]
async fn test_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("deep").join("cache");
    let backend = FileBackend::new(&nested).unwrap();
    assert_eq!(backend.dir(), nested.as_path());
    assert!(nested.is_dir());
}

#[test]
fn test_unusable_directory_is_backend_unavailable() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("occupied");
    std::fs::write(&blocker, "a file, not a directory").unwrap();

    let result = FileBackend::new(blocker.join("cache"));
    assert!(matches!(result, Err(Error::BackendUnavailable { .. })));
}
