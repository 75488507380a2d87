//! # Cachly - Backend Implementations
//!
//! Every backend implements the `CacheBackend` port from `cachly-domain` and
//! registers itself in the `CACHE_BACKENDS` slice declared by
//! `cachly-application`, so configuration can select it by name.
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! cachly-providers = { version = "0.1", default-features = false, features = ["cache-redis"] }
//! ```
//!
//! | Feature | Backend |
//! |---------|---------|
//! | `cache-moka` (default) | `MokaBackend` |
//! | `cache-file` (default) | `FileBackend` |
//! | `cache-redis` | `RedisBackend` |
//!
//! `NullBackend` and `FallbackBackend` are always available.

// Re-export cachly-domain types commonly used with backends
pub use cachly_domain::CacheBackend;
pub use cachly_domain::error::{Error, Result};

/// Backend-specific constants
pub mod constants;

/// Cache backend implementations
pub mod cache;
