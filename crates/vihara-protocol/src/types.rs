//! Core protocol types shared by the session and ledger layers.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::array::{decode_array_literal, encode_array_literal};
use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for an administrator account.
///
/// Newtype over the row id so a user id can't be confused with a
/// transaction or registration id. Serialized as the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// Renders the plain decimal id. Session tokens are built from this form,
/// so it must stay a bare number.
impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an administrator is allowed to manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages registrant records and chanting progress.
    #[default]
    Registration,
    /// Manages income and expense transactions.
    Finance,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Finance => "finance",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SqlValue: what the data-access layer hands us
// ---------------------------------------------------------------------------

/// A raw column value at the scan boundary.
///
/// The relational driver is outside this workspace; it converts whatever
/// it read into one of these variants before asking a protocol type to
/// parse it.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl SqlValue {
    /// A short name for the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
        }
    }
}

// ---------------------------------------------------------------------------
// StringArray
// ---------------------------------------------------------------------------

/// An ordered list of strings stored in a single `text[]` column.
///
/// Transactions use this for their receipt image URLs. The same value has
/// two external forms:
///
/// - **storage**: an array literal like `{"https://a/1.jpg","https://a/2.jpg"}`
///   ([`to_sql`](Self::to_sql) / [`from_sql`](Self::from_sql));
/// - **API**: a plain JSON array of strings (serde, via `#[serde(transparent)]`).
///
/// Order and duplicates are preserved. Blank elements are dropped on the
/// way to storage, and the decoder trims each element, so `["", " a "]`
/// comes back from a storage round trip as `["a"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringArray(Vec<String>);

impl StringArray {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.0.push(value.into());
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Encodes the list as a storage array literal.
    pub fn to_sql(&self) -> String {
        encode_array_literal(&self.0)
    }

    /// Parses a storage array literal. Never fails; see
    /// [`decode_array_literal`].
    pub fn parse_literal(text: &str) -> Self {
        Self(decode_array_literal(text))
    }

    /// Builds the list from a raw column value.
    ///
    /// `Null` becomes an empty list. Text and bytes are decoded as an array
    /// literal (bytes are read as UTF-8, replacing invalid sequences).
    ///
    /// # Errors
    /// [`ProtocolError::UnsupportedSource`] for any other kind of value.
    pub fn from_sql(value: &SqlValue) -> Result<Self, ProtocolError> {
        match value {
            SqlValue::Null => Ok(Self::new()),
            SqlValue::Text(text) => Ok(Self::parse_literal(text)),
            SqlValue::Bytes(bytes) => Ok(Self::parse_literal(&String::from_utf8_lossy(bytes))),
            other => Err(ProtocolError::UnsupportedSource(other.kind())),
        }
    }
}

impl Deref for StringArray {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> From<Vec<S>> for StringArray {
    fn from(values: Vec<S>) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for StringArray {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for StringArray {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StringArray {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display_is_plain_decimal() {
        assert_eq!(UserId(42).to_string(), "42");
    }

    #[test]
    fn test_role_default_is_registration() {
        assert_eq!(Role::default(), Role::Registration);
        assert_eq!(Role::Finance.to_string(), "finance");
    }

    #[test]
    fn test_to_sql_empty_is_braces() {
        assert_eq!(StringArray::new().to_sql(), "{}");
    }

    #[test]
    fn test_from_sql_null_is_empty() {
        let arr = StringArray::from_sql(&SqlValue::Null).expect("null is allowed");
        assert!(arr.is_empty());
    }

    #[test]
    fn test_from_sql_text_and_bytes_decode_alike() {
        let literal = r#"{"https://a/1.jpg","b,c"}"#;

        let from_text = StringArray::from_sql(&SqlValue::Text(literal.into())).unwrap();
        let from_bytes =
            StringArray::from_sql(&SqlValue::Bytes(literal.as_bytes().to_vec())).unwrap();

        assert_eq!(from_text, from_bytes);
        assert_eq!(from_text.as_slice(), ["https://a/1.jpg", "b,c"]);
    }

    #[test]
    fn test_from_sql_integer_returns_unsupported_source() {
        let result = StringArray::from_sql(&SqlValue::Int(5));

        assert!(
            matches!(result, Err(ProtocolError::UnsupportedSource("integer"))),
            "only text and bytes hold array literals"
        );
    }

    #[test]
    fn test_from_sql_bool_returns_unsupported_source() {
        let err = StringArray::from_sql(&SqlValue::Bool(true)).unwrap_err();
        assert_eq!(err.to_string(), "cannot scan boolean value into a string array");
    }

    #[test]
    fn test_storage_roundtrip_through_sql_value() {
        let original: StringArray = ["r1.jpg", "note \"paid\"", "ค่าไฟ, ค่าน้ำ"].into_iter().collect();

        let stored = SqlValue::Text(original.to_sql());
        let loaded = StringArray::from_sql(&stored).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_deref_exposes_slice_methods() {
        let arr = StringArray::from(vec!["a", "b"]);
        assert_eq!(arr.len(), 2);
        assert_eq!(arr.first().map(String::as_str), Some("a"));
    }
}
