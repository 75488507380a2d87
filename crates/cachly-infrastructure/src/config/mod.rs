//! Configuration management
//!
//! Figment-layered configuration: defaults, then a TOML file, then
//! `CACHLY_*` environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, BackendSettings, CacheConfig, LoggingConfig};
