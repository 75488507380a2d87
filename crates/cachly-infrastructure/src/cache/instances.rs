//! Cache instances
//!
//! One [`NamespaceCache`] per (backend name, namespace), created on first
//! use. Backends are built once per name and shared by every namespace on
//! them.

use super::factory::BackendFactory;
use crate::config::CacheConfig;
use cachly_application::{CacheOptions, NamespaceCache};
use cachly_domain::{CacheBackend, Clock, SystemClock};
use cachly_domain::error::Result;
use dashmap::DashMap;
use std::sync::Arc;

/// Registry of live caches
#[derive(Debug)]
pub struct CacheInstances {
    config: CacheConfig,
    factory: BackendFactory,
    clock: Arc<dyn Clock>,
    backends: DashMap<String, Arc<dyn CacheBackend>>,
    instances: DashMap<(String, String), Arc<NamespaceCache>>,
}

impl CacheInstances {
    /// Instances over the backends in `config`, on the system clock
    pub fn new(config: CacheConfig) -> Self {
        Self {
            factory: BackendFactory::new(&config),
            config,
            clock: Arc::new(SystemClock),
            backends: DashMap::new(),
            instances: DashMap::new(),
        }
    }

    /// Use `clock` for every cache created from now on
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The cache configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The cache for `namespace` on the backend named `backend`
    ///
    /// `None` picks the configured default backend.
    pub fn instance(&self, namespace: &str, backend: Option<&str>) -> Result<Arc<NamespaceCache>> {
        let backend_name = backend.unwrap_or(self.config.default_backend.as_str());
        let key = (backend_name.to_string(), namespace.to_string());
        if let Some(existing) = self.instances.get(&key) {
            return Ok(Arc::clone(existing.value()));
        }

        let options = CacheOptions::default()
            .with_backend_name(backend_name)
            .with_clock(Arc::clone(&self.clock))
            .with_strict_keys(self.config.strict_keys)
            .with_deferred_registry(self.config.deferred_registry_writes);
        let cache = NamespaceCache::with_options(namespace, self.backend(backend_name)?, options)?;

        Ok(Arc::clone(
            self.instances.entry(key).or_insert(Arc::new(cache)).value(),
        ))
    }

    /// The cache for the default namespace on the default backend
    pub fn default_instance(&self) -> Result<Arc<NamespaceCache>> {
        self.instance(&self.config.default_namespace, None)
    }

    /// The shared backend named `name`, built on first use
    pub fn backend(&self, name: &str) -> Result<Arc<dyn CacheBackend>> {
        if let Some(existing) = self.backends.get(name) {
            return Ok(Arc::clone(existing.value()));
        }
        let backend = self.factory.create(name)?;
        Ok(Arc::clone(
            self.backends
                .entry(name.to_string())
                .or_insert(backend)
                .value(),
        ))
    }

    /// Number of live caches
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether no cache has been created yet
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Forget every cache and backend; stored data is left alone
    pub fn clear(&self) {
        self.instances.clear();
        self.backends.clear();
    }
}
