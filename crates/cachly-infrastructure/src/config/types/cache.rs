//! Cache configuration types

use crate::constants::{DEFAULT_BACKEND_NAME, NULL_BACKEND_NAME};
use cachly_application::BackendConfig;
use cachly_domain::constants::DEFAULT_NAMESPACE;
use cachly_providers::constants::{BACKEND_MOKA, BACKEND_NULL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// One named backend
///
/// The configured name (the key under `[cache.backends]`) is what gets
/// hashed into cache ids, so two names over the same provider never see
/// each other's entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Registered provider ("moka", "file", "redis", "null")
    pub provider: String,

    /// Connection URI (redis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Storage directory (file)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Maximum number of entries (moka); unbounded when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<u64>,

    /// Prefix applied to every stored key (redis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_prefix: Option<String>,

    /// Name of another configured backend to use when this one is unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl BackendSettings {
    /// Settings for `provider` with every option left at its default
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Use `fallback` when this backend is unavailable
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// The provider-facing part of these settings
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            provider: self.provider.clone(),
            uri: self.uri.clone(),
            path: self.path.clone(),
            max_capacity: self.max_capacity,
            key_prefix: self.key_prefix.clone(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Backend used by `default_instance` and when no backend is named
    pub default_backend: String,

    /// Namespace used by `default_instance`
    pub default_namespace: String,

    /// Require keys to be registered before they can be written
    pub strict_keys: bool,

    /// Buffer registry writes until `commit`
    pub deferred_registry_writes: bool,

    /// Named backends
    pub backends: HashMap<String, BackendSettings>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let backends = HashMap::from([
            (
                DEFAULT_BACKEND_NAME.to_string(),
                BackendSettings::new(BACKEND_MOKA),
            ),
            (
                NULL_BACKEND_NAME.to_string(),
                BackendSettings::new(BACKEND_NULL),
            ),
        ]);
        Self {
            default_backend: DEFAULT_BACKEND_NAME.to_string(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            strict_keys: false,
            deferred_registry_writes: false,
            backends,
        }
    }
}

impl CacheConfig {
    /// Settings of the backend named `name`
    pub fn backend(&self, name: &str) -> Option<&BackendSettings> {
        self.backends.get(name)
    }

    /// Configured backend names, sorted
    pub fn backend_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
