//! Administrator session management for Vihara.
//!
//! This crate handles who is logged in to the admin backend:
//!
//! 1. **Tokens**: minting `"<user id>-<32 hex>"` session tokens
//!    ([`generate_token`]) and peeking at the embedded id
//!    ([`parse_session_id`]).
//! 2. **Session tracking**: the shared `token → user` table
//!    ([`SessionRegistry`] over a plain [`SessionStore`]).
//! 3. **Authentication**: turning a cookie value into a [`Principal`]
//!    ([`Authenticator`] trait, [`SessionAuthenticator`]).
//! 4. **Login plumbing**: password hashing and the `session_id` cookie.
//! 5. **Accounts**: registering new administrators
//!    ([`SessionAuthenticator::register_admin`]).
//!
//! # How it fits in the stack
//!
//! ```text
//! Facade (above)  ← AdminGate: cookie in, Principal or Denial out
//!     ↕
//! Session Layer (this crate)  ← tokens, sessions, user lookup
//!     ↕
//! Protocol Layer (below)  ← provides UserId, Role
//! ```

#![allow(async_fn_in_trait)]

mod auth;
pub mod cookies;
mod directory;
mod error;
pub mod password;
mod registry;
mod session;
mod store;
mod token;

pub use auth::{Authenticator, SessionAuthenticator};
pub use directory::{AdminRegistration, InMemoryDirectory, NewAccount, UserAccount, UserDirectory};
pub use error::SessionError;
pub use registry::SessionRegistry;
pub use session::{Principal, SessionConfig};
pub use store::SessionStore;
pub use token::{generate_token, parse_session_id, TOKEN_SEPARATOR};
