//! Error types for the session layer.

/// Errors that can occur during session management and login.
///
/// Authentication deliberately has a single failure variant. Whether the
/// token was malformed, unknown, or belonged to a deactivated account is
/// only visible in debug logs, never to the caller.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No valid session backs the presented token.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Login was attempted without a username or password.
    #[error("username and password are required")]
    MissingCredentials,

    /// The username/password pair was rejected. Unknown user, inactive
    /// user, and wrong password all land here.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Registering an administrator without a username, password or
    /// full name.
    #[error("username, password and full name are required")]
    MissingAccountFields,

    /// Another account already uses this username.
    #[error("username {0:?} is already taken")]
    UsernameTaken(String),

    /// The directory could not store a new account.
    #[error("user directory failed: {0}")]
    Directory(String),

    /// Hashing a new password failed.
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}
