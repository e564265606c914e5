//! Unified error type for the Vihara backend.

use vihara_ledger::LedgerError;
use vihara_protocol::ProtocolError;
use vihara_session::SessionError;

/// Anything that can go wrong below the admin gate.
///
/// Codec failures come from `vihara-protocol`, login and session failures
/// from `vihara-session`, and rejected drafts from `vihara-ledger`; each
/// converts in with `?`. `Logging` is the one failure owned by this crate:
/// [`logging::init`](crate::logging::init) rejected the filter directive
/// or found a subscriber already installed. Request handlers usually want
/// [`Denial`](crate::Denial) instead, which carries the HTTP status and
/// the user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum ViharaError {
    /// A codec error (array literal, JSON).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session error (authentication, login, hashing).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A ledger validation error.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The tracing subscriber could not be installed.
    #[error("logging init failed: {0}")]
    Logging(String),
}
