//! Cache Backend Implementations
//!
//! ## Available Backends
//!
//! | Backend | Type | Description |
//! |---------|------|-------------|
//! | [`NullBackend`] | Testing | Stores nothing |
//! | [`MokaBackend`] | Local | In-process memory |
//! | [`FileBackend`] | Local | One file per entry, survives restarts |
//! | [`RedisBackend`] | Shared | Redis, for several processes |
//! | [`FallbackBackend`] | Decorator | Primary with a one-shot fallback |
//!
//! ## Backend Selection Guide
//!
//! - **Tests / caching disabled**: `NullBackend`
//! - **Single process**: `MokaBackend`
//! - **Single host, persistent**: `FileBackend`
//! - **Several processes or hosts**: `RedisBackend`, wrapped in a
//!   `FallbackBackend` if the application must keep working without Redis

pub mod fallback;
#[cfg(feature = "cache-file")]
pub mod file;
#[cfg(feature = "cache-moka")]
pub mod memory;
pub mod null;
#[cfg(feature = "cache-redis")]
pub mod redis;

// Re-export for convenience
pub use fallback::FallbackBackend;
#[cfg(feature = "cache-file")]
pub use file::FileBackend;
#[cfg(feature = "cache-moka")]
pub use memory::MokaBackend;
pub use null::NullBackend;
#[cfg(feature = "cache-redis")]
pub use redis::RedisBackend;
