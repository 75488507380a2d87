//! Backend factory
//!
//! Resolves configured backends through the `CACHE_BACKENDS` registry and
//! applies the `fallback` setting:
//!
//! - primary builds: it is wrapped in a [`FallbackBackend`], so calls that
//!   find it unavailable are retried on the fallback
//! - primary fails with `BackendUnavailable`: the fallback is used directly
//! - fallback fails to build: the primary is served alone, with a warning
//!
//! Fallbacks are one level deep. The fallback's own `fallback` setting is
//! ignored.

use crate::config::{BackendSettings, CacheConfig};
use cachly_application::resolve_cache_backend;
use cachly_domain::CacheBackend;
use cachly_domain::error::{Error, Result};
use cachly_providers::cache::FallbackBackend;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds backends from named settings
#[derive(Debug, Clone)]
pub struct BackendFactory {
    backends: HashMap<String, BackendSettings>,
}

impl BackendFactory {
    /// Factory over the backends configured in `config`
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            backends: config.backends.clone(),
        }
    }

    /// Settings of the backend named `name`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when no such backend is configured.
    pub fn settings(&self, name: &str) -> Result<&BackendSettings> {
        self.backends.get(name).ok_or_else(|| {
            let mut configured: Vec<&str> = self.backends.keys().map(String::as_str).collect();
            configured.sort_unstable();
            Error::configuration(format!(
                "Cache backend '{name}' is not configured. Configured backends: {configured:?}"
            ))
        })
    }

    /// Build the backend named `name`, honouring its fallback
    pub fn create(&self, name: &str) -> Result<Arc<dyn CacheBackend>> {
        let settings = self.settings(name)?;
        let primary = resolve_cache_backend(&settings.backend_config());

        let Some(fallback_name) = &settings.fallback else {
            debug!(backend = name, provider = %settings.provider, "Cache backend created");
            return primary;
        };
        let fallback = resolve_cache_backend(&self.settings(fallback_name)?.backend_config());

        match (primary, fallback) {
            (Ok(primary), Ok(fallback)) => {
                debug!(
                    backend = name,
                    fallback = %fallback_name,
                    "Cache backend created with fallback"
                );
                Ok(Arc::new(FallbackBackend::new(primary, fallback)))
            }
            (Ok(primary), Err(e)) => {
                warn!(
                    backend = name,
                    fallback = %fallback_name,
                    error = %e,
                    "Fallback backend could not be built, serving primary alone"
                );
                Ok(primary)
            }
            (Err(e), Ok(fallback)) if e.is_backend_unavailable() => {
                warn!(
                    backend = name,
                    fallback = %fallback_name,
                    error = %e,
                    "Cache backend unavailable at startup, using fallback"
                );
                Ok(fallback)
            }
            (Err(e), Err(fallback_error)) if e.is_backend_unavailable() => {
                warn!(
                    backend = name,
                    fallback = %fallback_name,
                    error = %e,
                    "Cache backend and its fallback are both unavailable"
                );
                Err(fallback_error)
            }
            (Err(e), _) => Err(e),
        }
    }
}
