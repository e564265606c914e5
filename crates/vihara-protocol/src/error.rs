//! Error types for the protocol layer.
//!
//! Malformed array literals are deliberately absent from this list: the
//! literal decoder is best-effort and never fails. Only the JSON codec and
//! the scan boundary can reject input.

/// Errors that can occur while encoding or decoding protocol values.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization to JSON failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization from JSON failed.
    ///
    /// Common causes: malformed JSON, or an array containing something
    /// other than strings where a [`StringArray`](crate::StringArray) is
    /// expected.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A column value of the wrong kind reached the array scanner.
    ///
    /// Only text and byte values can hold an array literal. The payload
    /// names the kind that was received (e.g. `"integer"`).
    #[error("cannot scan {0} value into a string array")]
    UnsupportedSource(&'static str),
}
