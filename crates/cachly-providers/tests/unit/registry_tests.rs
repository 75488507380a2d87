//! Tests for backend self-registration

use cachly_application::ports::registry::{
    BackendConfig, list_cache_backends, resolve_cache_backend,
};

#[test]
fn test_null_backend_is_registered() {
    let names: Vec<&str> = list_cache_backends().iter().map(|(name, _)| *name).collect();
    assert!(names.contains(&"null"));
    #[cfg(feature = "cache-moka")]
    assert!(names.contains(&"moka"));
    #[cfg(feature = "cache-file")]
    assert!(names.contains(&"file"));
}

#[test]
fn test_resolve_by_name() {
    let backend = resolve_cache_backend(&BackendConfig::new("null")).unwrap();
    assert_eq!(backend.backend_name(), "null");
}

#[cfg(feature = "cache-moka")]
#[test]
fn test_resolve_moka_with_capacity() {
    let backend = resolve_cache_backend(&BackendConfig::new("moka").with_max_capacity(5)).unwrap();
    assert_eq!(backend.backend_name(), "moka");
}

#[cfg(feature = "cache-file")]
#[test]
fn test_resolve_file_with_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let backend = resolve_cache_backend(&BackendConfig::new("file").with_path(dir.path())).unwrap();
    assert_eq!(backend.backend_name(), "file");
}
