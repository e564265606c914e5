//! Wire and storage protocol for Vihara.
//!
//! This crate defines how administrative data looks at the two boundaries
//! the backend talks across:
//!
//! - **Types** ([`UserId`], [`Role`], [`StringArray`], [`SqlValue`]): the
//!   values that travel in API bodies and relational columns.
//! - **Codecs** ([`Codec`] trait, [`JsonCodec`], and the array-literal
//!   functions): how those values become text and back.
//! - **Errors** ([`ProtocolError`]): what can go wrong while doing so.
//!
//! # Architecture
//!
//! ```text
//! API body (JSON) ─┐                       ┌─ column text ({"a","b"})
//!                  ├─→ Protocol (types) ←──┤
//! Session / Ledger ┘                       └─ SqlValue (scan boundary)
//! ```
//!
//! Nothing here performs I/O. The data-access layer hands us raw column
//! values and takes back encoded text.

mod array;
mod codec;
mod error;
mod types;

pub use array::{decode_array_literal, encode_array_literal, EMPTY_LITERAL};
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{Role, SqlValue, StringArray, UserId};
