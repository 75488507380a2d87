//! Stored entry envelope
//!
//! Every payload written to a backend is the JSON form of an [`Envelope`]:
//! `{"value": <user value>, "expires_at": <epoch or 0>}`. Keeping the expiry
//! inside the payload makes expiration independent of backend TTL support.

use super::expiry::is_expired_at;
use crate::constants::NEVER_EXPIRES;
use serde::{Deserialize, Serialize};

/// A value together with its absolute expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The user value
    pub value: T,
    /// Epoch seconds, or `0` for never
    #[serde(default)]
    pub expires_at: i64,
}

impl<T> Envelope<T> {
    /// Wrap a value with an already resolved expiry
    pub fn new(value: T, expires_at: i64) -> Self {
        Self { value, expires_at }
    }

    /// Wrap a value that never expires
    pub fn permanent(value: T) -> Self {
        Self::new(value, NEVER_EXPIRES)
    }

    /// Whether the envelope is past its expiry at `now`
    pub fn is_expired_at(&self, now: i64) -> bool {
        is_expired_at(self.expires_at, now)
    }
}

/// Expiry-only view of a stored payload
///
/// Decodes without materialising the value, so expiry checks work whatever
/// type the entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EnvelopeHeader {
    /// Epoch seconds, or `0` for never
    #[serde(default)]
    pub expires_at: i64,
}

impl EnvelopeHeader {
    /// Parse the header of a stored payload
    pub fn parse(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }

    /// Whether the entry is past its expiry at `now`
    pub fn is_expired_at(&self, now: i64) -> bool {
        is_expired_at(self.expires_at, now)
    }
}
