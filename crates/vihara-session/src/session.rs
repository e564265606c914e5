//! Session configuration and the authenticated principal.

use std::time::Duration;

use cookie::SameSite;
use serde::{Deserialize, Serialize};
use vihara_protocol::{Role, UserId};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session cookies.
///
/// The server keeps sessions until logout; `cookie_ttl` is only the
/// expiry hint sent to the browser.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token.
    ///
    /// Default: `session_id`.
    pub cookie_name: String,

    /// How long the browser should keep the cookie.
    ///
    /// Default: 24 hours.
    pub cookie_ttl: Duration,

    /// Whether to set the `Secure` flag. Enable when served over HTTPS.
    ///
    /// Default: `false`.
    pub secure: bool,

    /// Default: `Lax`.
    pub same_site: SameSite,

    /// Default: `/`.
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session_id".to_string(),
            cookie_ttl: Duration::from_secs(24 * 60 * 60),
            secure: false,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Principal
// ---------------------------------------------------------------------------

/// The administrator a request is acting as.
///
/// Produced by a successful authentication and handed to downstream
/// handlers as per-request context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}
