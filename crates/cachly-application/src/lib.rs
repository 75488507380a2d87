//! Application Layer - Cachly
//!
//! Turns a plain string store into an enumerable, expiry-aware cache with
//! nested collections and compute-once memoization.
//!
//! ## Architecture
//!
//! The application layer:
//! - Owns the namespace, registry and envelope logic ([`cache`])
//! - Declares the backend registry that providers plug into ([`ports::registry`])
//! - Never depends on a concrete backend
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `cachly-domain`: for ids, expiry values, errors and the backend port
//! - Pure Rust libraries for serialization, patterns and registration

pub mod cache;
pub mod ports;

pub use cache::{CacheOptions, EnvelopeCodec, KeyHandle, KeyRegistry, NamespaceCache};
pub use ports::registry::{
    BackendConfig, CACHE_BACKENDS, CacheBackendEntry, list_cache_backends, resolve_cache_backend,
};
