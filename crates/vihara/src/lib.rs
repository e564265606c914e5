//! # Vihara
//!
//! Session-gated admin backend core for a temple's registration and
//! finance system.
//!
//! The HTTP framework and the database are left to the embedding
//! application. Vihara provides what sits between them: the
//! [`AdminGate`] that turns a `Cookie` header into a [`Principal`]
//! (or a [`Denial`]), login, logout and administrator sign-up, the
//! PostgreSQL text-array codec, and the registration, finance and audit
//! records the admin routes work with.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use vihara::prelude::*;
//!
//! # async fn run(directory: InMemoryDirectory) -> Result<(), ViharaError> {
//! vihara::logging::init(vihara::logging::DEFAULT_FILTER)?;
//!
//! let gate = ViharaBuilder::new().build(Arc::new(directory));
//!
//! // In a request handler:
//! match gate.authorize(Some("session_id=7-0a1b...")).await {
//!     Ok(principal) => println!("hello {}", principal.username),
//!     Err(denial) => println!("{}", denial.to_json()),
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod gate;
pub mod logging;

pub use builder::ViharaBuilder;
pub use error::ViharaError;
pub use gate::{
    AccountReply, AdminGate, Denial, LoginGrant, LoginReply, LoginRequest, MSG_ACCOUNT_CREATED,
    MSG_ACCOUNT_FAILED, MSG_BAD_CREDENTIALS, MSG_BAD_REQUEST, MSG_INCOMPLETE_FORM, MSG_INTERNAL,
    MSG_LOGIN_OK, MSG_LOGIN_REQUIRED, MSG_LOGOUT_OK, MSG_MISSING_CREDENTIALS, MSG_USERNAME_TAKEN,
};
pub use vihara_session::Principal;

/// Everything a backend usually needs, in one import.
pub mod prelude {
    pub use crate::{AdminGate, Denial, LoginGrant, ViharaBuilder, ViharaError};

    pub use vihara_ledger::{
        ActivityLog, ChantingStatus, ChantingSummary, DashboardSummary, DeviceLog, DeviceLogDraft,
        FinanceSummary, LogCounts, Registration, RegistrationDraft, Transaction, TransactionDraft,
        TransactionEvent, TransactionFilter, TransactionKind, TransactionPatch,
    };
    pub use vihara_protocol::{Role, SqlValue, StringArray, UserId};
    pub use vihara_session::password::hash_password;
    pub use vihara_session::{
        AdminRegistration, Authenticator, InMemoryDirectory, Principal, SessionConfig,
        SessionRegistry, UserAccount, UserDirectory,
    };
}
