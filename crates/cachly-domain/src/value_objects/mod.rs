//! Value objects
//!
//! Immutable types with no identity beyond their contents.

pub mod cache_id;
pub mod envelope;
pub mod expiry;
pub mod key_parts;

pub use cache_id::CacheId;
pub use envelope::{Envelope, EnvelopeHeader};
pub use expiry::{Expires, ExpiryStatus, is_expired_at};
pub use key_parts::pack_key_parts;
