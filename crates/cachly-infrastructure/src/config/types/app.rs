//! Main application configuration

use super::cache::CacheConfig;
use super::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Root of the configuration tree
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [cache]
/// default_backend = "shared"
///
/// [cache.backends.shared]
/// provider = "redis"
/// uri = "redis://cache.internal:6379"
/// fallback = "memory"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}
