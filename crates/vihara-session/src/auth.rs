//! Authentication: turning a session token into a [`Principal`].
//!
//! The [`Authenticator`] trait is the seam the facade gates requests on.
//! [`SessionAuthenticator`] is the real implementation: it checks the
//! session table, then asks the [`UserDirectory`] whether the account is
//! still active. It also owns the login/logout flows, since those are the
//! only places sessions are created and destroyed.

use std::sync::Arc;

use vihara_protocol::UserId;

use crate::password::{decoy_hash, hash_password, verify_password};
use crate::{
    parse_session_id, AdminRegistration, NewAccount, Principal, SessionError, SessionRegistry,
    UserAccount, UserDirectory,
};

/// Validates a session token and returns who it belongs to.
///
/// # Trait bounds
///
/// - `Send + Sync` → one authenticator is shared by every request task.
/// - `'static` → it lives as long as the backend.
///
/// # Example
///
/// ```rust
/// use vihara_protocol::{Role, UserId};
/// use vihara_session::{Authenticator, Principal, SessionError};
///
/// /// Lets a single fixed token through. Only for local development.
/// struct DevAuthenticator;
///
/// impl Authenticator for DevAuthenticator {
///     async fn authenticate(&self, token: &str) -> Result<Principal, SessionError> {
///         if token != "dev" {
///             return Err(SessionError::Unauthenticated);
///         }
///         Ok(Principal {
///             user_id: UserId(1),
///             username: "dev".into(),
///             role: Role::Finance,
///         })
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Validates `token` and returns the principal behind it.
    ///
    /// # Returns
    /// - `Ok(Principal)`: the session is live and the account is active
    /// - `Err(SessionError::Unauthenticated)`: anything else
    fn authenticate(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Principal, SessionError>> + Send;
}

/// The session-table-backed [`Authenticator`].
///
/// Every failure collapses to [`SessionError::Unauthenticated`]; the
/// specific reason only shows up in `debug` logs.
pub struct SessionAuthenticator<D> {
    sessions: SessionRegistry,
    directory: Arc<D>,
}

impl<D: UserDirectory> SessionAuthenticator<D> {
    pub fn new(sessions: SessionRegistry, directory: Arc<D>) -> Self {
        Self {
            sessions,
            directory,
        }
    }

    /// The registry this authenticator reads and writes.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn directory(&self) -> &Arc<D> {
        &self.directory
    }

    /// Checks credentials and, on success, opens a session.
    ///
    /// Returns the principal and the new session token.
    ///
    /// # Errors
    /// - [`SessionError::MissingCredentials`]: empty username or password
    /// - [`SessionError::InvalidCredentials`]: unknown or inactive user,
    ///   or wrong password (indistinguishable on purpose)
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(Principal, String), SessionError> {
        if username.is_empty() || password.is_empty() {
            return Err(SessionError::MissingCredentials);
        }

        let account = self.directory.find_active_by_username(username).await;

        // Argon2 is deliberately slow; keep it off the async workers. An
        // unknown username is checked against the decoy hash so it takes
        // as long as a wrong password.
        let password = password.to_string();
        let hash = account.as_ref().map(|a| a.password_hash.clone());
        let matches = tokio::task::spawn_blocking(move || {
            let hash = hash.as_deref().unwrap_or_else(|| decoy_hash());
            verify_password(&password, hash)
        })
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "password verification task failed");
            false
        });

        let Some(account) = account else {
            tracing::debug!(username, "login rejected: no active account");
            return Err(SessionError::InvalidCredentials);
        };
        if !matches {
            tracing::debug!(user_id = %account.id, "login rejected: wrong password");
            return Err(SessionError::InvalidCredentials);
        }

        let token = self.sessions.create(account.id).await;
        tracing::info!(user_id = %account.id, username, "administrator logged in");
        Ok((account.principal(), token))
    }

    /// Creates a new, active administrator account.
    ///
    /// Does not open a session; the new administrator logs in separately.
    ///
    /// # Errors
    /// - [`SessionError::MissingAccountFields`]: empty username, password
    ///   or full name
    /// - [`SessionError::UsernameTaken`]: the username is already in use
    /// - [`SessionError::PasswordHash`] / [`SessionError::Directory`]:
    ///   server-side failures
    pub async fn register_admin(
        &self,
        form: AdminRegistration,
    ) -> Result<UserAccount, SessionError> {
        if form.username.is_empty() || form.password.is_empty() || form.full_name.is_empty() {
            return Err(SessionError::MissingAccountFields);
        }

        let password = form.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| SessionError::PasswordHash(e.to_string()))??;

        let account = self
            .directory
            .create_account(NewAccount {
                username: form.username,
                full_name: form.full_name,
                password_hash,
                role: form.role,
            })
            .await?;
        tracing::info!(user_id = %account.id, username = %account.username, "administrator registered");
        Ok(account)
    }

    /// Ends the session for `token`. Returns `true` if one existed.
    pub async fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.delete(token).await;
        if removed {
            tracing::info!(claimed_user = ?parse_session_id(token), "administrator logged out");
        }
        removed
    }

    /// Ends every session of `user_id`, e.g. after deactivating the account.
    pub async fn revoke(&self, user_id: UserId) -> usize {
        self.sessions.revoke_user(user_id).await
    }
}

impl<D: UserDirectory> Authenticator for SessionAuthenticator<D> {
    async fn authenticate(&self, token: &str) -> Result<Principal, SessionError> {
        if token.is_empty() {
            tracing::debug!("rejected: no session token");
            return Err(SessionError::Unauthenticated);
        }

        // The embedded id is logged for diagnosis only; the table decides.
        let Some(user_id) = self.sessions.resolve(token).await else {
            tracing::debug!(claimed_user = ?parse_session_id(token), "rejected: unknown session");
            return Err(SessionError::Unauthenticated);
        };

        let Some(account) = self.directory.find_active_user(user_id).await else {
            tracing::debug!(%user_id, "rejected: account missing or inactive");
            return Err(SessionError::Unauthenticated);
        };

        Ok(account.principal())
    }
}
