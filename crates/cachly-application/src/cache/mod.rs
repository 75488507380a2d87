//! Namespaced caches
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`codec`] | Envelope encode/decode |
//! | [`registry`] | Persistent cache id → key map |
//! | [`namespace`] | `NamespaceCache` reads, writes, deletes and enumeration |
//! | [`handle`] | `KeyHandle`, one key of a namespace |
//! | `collection` | Nested child caches |
//! | `memoize` | `once`, `once_force`, `once_with_expiry` |

pub mod codec;
mod collection;
pub mod handle;
mod memoize;
pub mod namespace;
pub mod registry;

pub use codec::EnvelopeCodec;
pub use handle::KeyHandle;
pub use namespace::{CacheOptions, NamespaceCache};
pub use registry::KeyRegistry;
