//! Envelope codec
//!
//! Turns user values into stored payloads and back. The payload format is
//! the JSON form of [`Envelope`].

use cachly_domain::error::{Error, Result};
use cachly_domain::value_objects::{Envelope, EnvelopeHeader};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Stateless payload encoder/decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeCodec;

impl EnvelopeCodec {
    /// Wrap `value` with its resolved expiry and serialize it
    pub fn encode<T: Serialize + ?Sized>(value: &T, expires_at: i64) -> Result<String> {
        Ok(serde_json::to_string(&Envelope::new(value, expires_at))?)
    }

    /// Deserialize a full envelope
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] when the payload is not an envelope holding a `T`.
    pub fn decode<T: DeserializeOwned>(payload: &str) -> Result<Envelope<T>> {
        serde_json::from_str(payload)
            .map_err(|e| Error::cache(format!("Stored value cannot be decoded: {e}")))
    }

    /// Read only the expiry of a payload
    pub fn header(payload: &str) -> Result<EnvelopeHeader> {
        EnvelopeHeader::parse(payload)
            .map_err(|e| Error::cache(format!("Stored envelope is malformed: {e}")))
    }

    /// Decode the value if the envelope is still live at `now`
    ///
    /// Returns `Ok(None)` for expired or malformed envelopes; a live envelope
    /// whose value is not a `T` is an error.
    pub fn decode_live<T: DeserializeOwned>(payload: &str, now: i64) -> Result<Option<T>> {
        match Self::header(payload) {
            Ok(header) if !header.is_expired_at(now) => {
                Self::decode::<T>(payload).map(|envelope| Some(envelope.value))
            }
            _ => Ok(None),
        }
    }
}
