//! Codec trait and the JSON implementation used at the API boundary.
//!
//! A "codec" converts between Rust types and raw bytes. Handlers that read
//! request bodies or write responses go through the [`Codec`] trait rather
//! than calling `serde_json` directly, so error handling stays uniform
//! ([`ProtocolError`]) no matter which format is plugged in.
//!
//! The storage-side array literal is not a serde format and lives in
//! [`array`](crate::array) as plain functions.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds
///
/// - `Send + Sync` → one codec instance is shared by every request task.
/// - `'static` → it owns everything it needs and lives as long as the
///   backend does.
///
/// `decode` requires `DeserializeOwned` so the result never borrows from
/// the request buffer, which is dropped right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is the format of every API body the admin frontend sends and
/// receives. It sits behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use vihara_protocol::{Codec, JsonCodec, StringArray};
///
/// let codec = JsonCodec;
/// let urls = StringArray::from(vec!["https://img/1.jpg", "https://img/2.jpg"]);
///
/// let bytes = codec.encode(&urls).unwrap();
/// assert_eq!(bytes, br#"["https://img/1.jpg","https://img/2.jpg"]"#);
///
/// let decoded: StringArray = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded, urls);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
