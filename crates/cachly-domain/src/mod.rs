//! # Domain Layer
//!
//! Core types shared by every Cachly crate. Nothing here performs I/O.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | The single error enum and `Result` alias |
//! | [`constants`] | Naming rules baked into cache ids |
//! | [`value_objects`] | `CacheId`, `Expires`, `ExpiryStatus`, `Envelope`, key-part packing |
//! | [`ports`] | `CacheBackend` and `Clock` traits implemented by outer layers |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::infrastructure::clock::{Clock, ManualClock, SystemClock};
pub use ports::providers::cache::CacheBackend;
pub use value_objects::{CacheId, Envelope, EnvelopeHeader, Expires, ExpiryStatus};
