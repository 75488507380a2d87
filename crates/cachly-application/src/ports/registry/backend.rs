//! Cache Backend Registry
//!
//! Auto-registration for storage backends. Providers submit entries to
//! [`CACHE_BACKENDS`] at compile time and are resolved by name.

use cachly_domain::CacheBackend;
use cachly_domain::error::{Error, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for backend creation
///
/// Carries every option a backend might need; each backend reads what it
/// uses and ignores the rest.
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    /// Provider name (e.g., "moka", "file", "redis", "null")
    pub provider: String,
    /// Connection URI (redis)
    pub uri: Option<String>,
    /// Storage directory (file)
    pub path: Option<PathBuf>,
    /// Maximum number of entries (moka)
    pub max_capacity: Option<u64>,
    /// Prefix applied to every stored key (redis)
    pub key_prefix: Option<String>,
}

impl BackendConfig {
    /// Create a new config for the given provider
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the storage directory
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the maximum capacity
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    /// Set the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }
}

/// Registry entry for cache backends
pub struct CacheBackendEntry {
    /// Unique provider name (e.g., "moka", "redis", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create a backend instance
    pub factory: fn(&BackendConfig) -> Result<Arc<dyn CacheBackend>>,
}

#[linkme::distributed_slice]
pub static CACHE_BACKENDS: [CacheBackendEntry] = [..];

/// Build the backend named by `config.provider`
///
/// # Errors
///
/// - [`Error::Configuration`] when no backend with that name is registered
/// - whatever the backend's factory fails with
pub fn resolve_cache_backend(config: &BackendConfig) -> Result<Arc<dyn CacheBackend>> {
    if let Some(entry) = CACHE_BACKENDS.iter().find(|e| e.name == config.provider) {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = CACHE_BACKENDS.iter().map(|e| e.name).collect();
    Err(Error::configuration(format!(
        "Unknown cache backend '{}'. Available backends: {:?}",
        config.provider, available
    )))
}

/// List all registered backends as (name, description) pairs
pub fn list_cache_backends() -> Vec<(&'static str, &'static str)> {
    CACHE_BACKENDS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
