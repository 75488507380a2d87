//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns that turn configuration into ready
//! namespace caches.
//!
//! ## Module Categories
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment layering of defaults, TOML and `CACHLY_*` env vars |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Data & Storage
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Backend factory and per-(backend, namespace) instances |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use cache::{BackendFactory, CacheInstances};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
