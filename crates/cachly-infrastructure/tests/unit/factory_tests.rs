//! Backend Factory Tests

use cachly_application::NamespaceCache;
use cachly_domain::Expires;
use cachly_domain::error::Error;
use cachly_infrastructure::cache::BackendFactory;
use cachly_infrastructure::config::{BackendSettings, CacheConfig, ConfigBuilder};
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn factory_with(name: &str, settings: BackendSettings) -> BackendFactory {
    let config = ConfigBuilder::new().with_backend(name, settings).build();
    BackendFactory::new(&config.cache)
}

/// Settings for a file backend whose directory cannot be created
fn unusable_file_backend(blocker: &NamedTempFile) -> BackendSettings {
    BackendSettings {
        path: Some(PathBuf::from(blocker.path()).join("cache")),
        ..BackendSettings::new("file")
    }
}

#[test]
fn test_creates_configured_backends() {
    let factory = BackendFactory::new(&CacheConfig::default());

    assert_eq!(factory.create("memory").unwrap().backend_name(), "moka");
    assert_eq!(factory.create("null").unwrap().backend_name(), "null");
}

#[test]
fn test_unconfigured_name_is_configuration_error() {
    let factory = BackendFactory::new(&CacheConfig::default());
    assert!(matches!(
        factory.create("ghost"),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_unknown_provider_is_configuration_error() {
    let factory = factory_with("odd", BackendSettings::new("memcached"));
    assert!(matches!(
        factory.create("odd"),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_unusable_primary_without_fallback_fails() {
    let blocker = NamedTempFile::new().unwrap();
    let factory = factory_with("disk", unusable_file_backend(&blocker));

    let error = factory.create("disk").unwrap_err();
    assert!(error.is_backend_unavailable());
}

#[test]
fn test_unusable_primary_is_replaced_by_fallback() {
    let blocker = NamedTempFile::new().unwrap();
    let factory = factory_with(
        "disk",
        unusable_file_backend(&blocker).with_fallback("memory"),
    );

    let backend = factory.create("disk").unwrap();
    assert_eq!(backend.backend_name(), "moka");
}

#[test]
fn test_unusable_fallback_leaves_primary_in_service() {
    let blocker = NamedTempFile::new().unwrap();
    let config = ConfigBuilder::new()
        .with_backend("disk", unusable_file_backend(&blocker))
        .with_backend("main", BackendSettings::new("moka").with_fallback("disk"))
        .build();
    let factory = BackendFactory::new(&config.cache);

    let backend = factory.create("main").unwrap();
    assert_eq!(backend.backend_name(), "moka");
}

#[test]
fn test_unusable_primary_and_fallback_fail() {
    let blocker = NamedTempFile::new().unwrap();
    let config = ConfigBuilder::new()
        .with_backend("spare", unusable_file_backend(&blocker))
        .with_backend("disk", unusable_file_backend(&blocker).with_fallback("spare"))
        .build();
    let factory = BackendFactory::new(&config.cache);

    let error = factory.create("disk").unwrap_err();
    assert!(error.is_backend_unavailable());
}

#[test]
fn test_file_backend_uses_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let factory = factory_with(
        "disk",
        BackendSettings {
            path: Some(dir.path().to_path_buf()),
            ..BackendSettings::new("file")
        },
    );

    assert_eq!(factory.create("disk").unwrap().backend_name(), "file");
}

#[tokio::test]
async fn test_unreachable_redis_serves_from_fallback() {
    // Port 1 refuses connections; the client itself opens lazily
    let factory = factory_with(
        "shared",
        BackendSettings {
            uri: Some("redis://127.0.0.1:1".to_string()),
            ..BackendSettings::new("redis")
        }
        .with_fallback("memory"),
    );

    let backend = factory.create("shared").unwrap();
    assert_eq!(backend.backend_name(), "redis");

    let cache = NamespaceCache::new("sessions", backend).unwrap();
    cache.set("token", "abc", Expires::Never).await.unwrap();
    assert_eq!(
        cache.get::<String>("token").await.unwrap().as_deref(),
        Some("abc")
    );
}
