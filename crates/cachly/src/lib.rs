//! # Cachly
//!
//! Namespaced caching over pluggable backends. Every namespace keeps a
//! registry of the keys written to it, so a cache can be enumerated,
//! filtered, pruned and flushed without scanning the backend.
//!
//! ## Features
//!
//! - **Expiry**: TTLs, absolute dates and relative expressions (`"+10 hours"`)
//! - **Collections**: nested sub-namespaces with their own registries
//! - **Compute-once**: `once`, `once_force` and `once_with_expiry` memoize
//!   async producers under packed keys
//! - **Backends**: moka, file, Redis and null, selected by configuration,
//!   with an optional fallback per backend
//!
//! ## Example
//!
//! ```ignore
//! use cachly::{Cachly, Expires};
//!
//! let cachly = Cachly::load()?;
//! let users = cachly.default_instance()?.collection("users").await?;
//!
//! users.set("alice", &42, "+10 minutes".parse::<Expires>()?).await?;
//! let profile = users
//!     .once(&[serde_json::json!("profile"), serde_json::json!(42)], || async {
//!         load_profile(42).await
//!     })
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - ids, expiry values, errors and the backend port
//! - `application` - namespace caches, registries, collections, compute-once
//! - `providers` - backend implementations
//! - `infrastructure` - configuration, logging, backend wiring

use std::sync::Arc;

/// Domain layer - ids, expiry values, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use cachly_domain::*;
}

/// Application layer - namespace caches
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use cachly_application::*;
}

/// Providers - backend implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use cachly_providers::*;
}

/// Infrastructure layer - configuration, logging and wiring
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use cachly_infrastructure::*;
}

// Re-export commonly used types at the crate root
pub use application::{CacheOptions, KeyHandle, NamespaceCache};
pub use domain::error::{Error, Result};
pub use domain::{CacheBackend, CacheId, Clock, Expires, ExpiryStatus, ManualClock, SystemClock};
pub use infrastructure::config::{AppConfig, BackendSettings, ConfigBuilder, ConfigLoader};

use cachly_infrastructure::cache::CacheInstances;
use cachly_infrastructure::config::loader::validate_app_config;
use cachly_infrastructure::constants::{DEFAULT_BACKEND_NAME, NULL_BACKEND_NAME};

/// Composition root: configuration plus the caches built from it
///
/// Caches are handed out per (backend, namespace) and reused, so two calls
/// for the same pair return the same handle.
#[derive(Debug)]
pub struct Cachly {
    config: AppConfig,
    instances: CacheInstances,
}

impl Cachly {
    /// Build from an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when `config` does not validate.
    pub fn new(config: AppConfig) -> Result<Self> {
        validate_app_config(&config)?;
        Ok(Self {
            instances: CacheInstances::new(config.cache.clone()),
            config,
        })
    }

    /// Build from defaults, `cachly.toml` and `CACHLY_*` environment variables
    pub fn load() -> Result<Self> {
        Self::new(ConfigLoader::new().load()?)
    }

    /// Use `clock` for expiry in every cache handed out
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.instances = self.instances.with_clock(clock);
        self
    }

    /// The configuration in use
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Install the global tracing subscriber from the logging configuration
    pub fn init_logging(&self) -> Result<()> {
        cachly_infrastructure::logging::init_logging(&self.config.logging)
    }

    /// The cache for the configured default namespace on the default backend
    pub fn default_instance(&self) -> Result<Arc<NamespaceCache>> {
        self.instances.default_instance()
    }

    /// The cache for `namespace` on `backend` (default backend when `None`)
    pub fn instance(&self, namespace: &str, backend: Option<&str>) -> Result<Arc<NamespaceCache>> {
        self.instances.instance(namespace, backend)
    }

    /// The cache for `namespace` on the in-memory backend
    pub fn memory(&self, namespace: &str) -> Result<Arc<NamespaceCache>> {
        self.instance(namespace, Some(DEFAULT_BACKEND_NAME))
    }

    /// The cache for `namespace` on the backend that stores nothing
    pub fn null(&self, namespace: &str) -> Result<Arc<NamespaceCache>> {
        self.instance(namespace, Some(NULL_BACKEND_NAME))
    }

    /// Every backend provider compiled into this build, as (name, description)
    pub fn providers() -> Vec<(&'static str, &'static str)> {
        cachly_application::list_cache_backends()
    }
}
