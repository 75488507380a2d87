//! Provider Registry System
//!
//! Backends register themselves with `linkme` at compile time and are
//! looked up by name at runtime.
//!
//! ```text
//! 1. Provider defines:  #[linkme::distributed_slice(CACHE_BACKENDS)]
//!                       static ENTRY: CacheBackendEntry = ...
//! 2. Registry declares: #[linkme::distributed_slice]
//!                       pub static CACHE_BACKENDS: [CacheBackendEntry] = [..]
//! 3. Resolver queries:  CACHE_BACKENDS.iter()
//! 4. Config selects:    provider = "moka" → MokaBackend
//! ```
//!
//! ### Registering a backend (in cachly-providers)
//!
//! ```ignore
//! use cachly_application::ports::registry::{CACHE_BACKENDS, CacheBackendEntry};
//!
//! #[linkme::distributed_slice(CACHE_BACKENDS)]
//! static MOKA_BACKEND: CacheBackendEntry = CacheBackendEntry {
//!     name: "moka",
//!     description: "In-process memory cache",
//!     factory: |config| Ok(Arc::new(MokaBackend::from_config(config))),
//! };
//! ```

pub mod backend;

pub use backend::{
    BackendConfig, CACHE_BACKENDS, CacheBackendEntry, list_cache_backends, resolve_cache_backend,
};
