//! The user lookup seam between authentication and storage.
//!
//! Vihara doesn't talk to the database itself. Whoever wires up the
//! backend implements [`UserDirectory`] over their data-access layer; the
//! authenticator asks two questions ("is this id an active account?" and
//! "is this username an active account?") and, when an administrator is
//! registered, asks the directory to store the new account.
//!
//! [`InMemoryDirectory`] is a complete implementation for tests and local
//! development.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use vihara_protocol::{Role, UserId};

use crate::{Principal, SessionError};

/// An administrator account as stored by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub username: String,
    pub full_name: String,

    /// PHC-format Argon2 hash. Never sent over the wire.
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub is_active: bool,
    #[serde(default)]
    pub role: Role,
}

impl UserAccount {
    /// The identity handed to request handlers once this account is
    /// authenticated.
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.id,
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// A validated account waiting for the directory to assign its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub full_name: String,
    /// PHC-format Argon2 hash.
    pub password_hash: String,
    pub role: Role,
}

impl NewAccount {
    /// New accounts start out active.
    pub fn with_id(self, id: UserId) -> UserAccount {
        UserAccount {
            id,
            username: self.username,
            full_name: self.full_name,
            password_hash: self.password_hash,
            is_active: true,
            role: self.role,
        }
    }
}

/// The body of a "register administrator" request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminRegistration {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

/// Looks up and stores administrator accounts.
///
/// Both lookups return only **active** accounts. Implementations should
/// map storage failures to `None` (after logging them): to the caller, a
/// broken lookup and a missing account are the same denial.
pub trait UserDirectory: Send + Sync + 'static {
    /// Returns the active account with this id.
    fn find_active_user(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Option<UserAccount>> + Send;

    /// Returns the active account with this username.
    fn find_active_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Option<UserAccount>> + Send;

    /// Stores `account` and returns it with its assigned id.
    ///
    /// # Errors
    /// - [`SessionError::UsernameTaken`]: any account, active or not,
    ///   already has this username. The check and the insert must be
    ///   atomic.
    /// - [`SessionError::Directory`]: the backing store failed.
    fn create_account(
        &self,
        account: NewAccount,
    ) -> impl std::future::Future<Output = Result<UserAccount, SessionError>> + Send;
}

// ---------------------------------------------------------------------------
// InMemoryDirectory
// ---------------------------------------------------------------------------

/// A [`UserDirectory`] backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: RwLock<HashMap<UserId, UserAccount>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory pre-filled with `accounts`.
    pub fn with_accounts(accounts: impl IntoIterator<Item = UserAccount>) -> Self {
        let users = accounts.into_iter().map(|a| (a.id, a)).collect();
        Self {
            users: RwLock::new(users),
        }
    }

    /// Adds or replaces an account.
    pub async fn insert(&self, account: UserAccount) {
        self.users.write().await.insert(account.id, account);
    }

    /// Flips the active flag. Returns `false` if the account doesn't exist.
    pub async fn set_active(&self, id: UserId, active: bool) -> bool {
        match self.users.write().await.get_mut(&id) {
            Some(account) => {
                account.is_active = active;
                true
            }
            None => false,
        }
    }

    /// Returns the account regardless of its active flag.
    pub async fn get(&self, id: UserId) -> Option<UserAccount> {
        self.users.read().await.get(&id).cloned()
    }
}

impl UserDirectory for InMemoryDirectory {
    async fn find_active_user(&self, id: UserId) -> Option<UserAccount> {
        self.users
            .read()
            .await
            .get(&id)
            .filter(|a| a.is_active)
            .cloned()
    }

    async fn find_active_by_username(&self, username: &str) -> Option<UserAccount> {
        self.users
            .read()
            .await
            .values()
            .find(|a| a.is_active && a.username == username)
            .cloned()
    }

    async fn create_account(&self, account: NewAccount) -> Result<UserAccount, SessionError> {
        let mut users = self.users.write().await;
        if users.values().any(|a| a.username == account.username) {
            return Err(SessionError::UsernameTaken(account.username));
        }
        let next_id = users.keys().map(|id| id.0).max().unwrap_or(0) + 1;
        let created = account.with_id(UserId(next_id));
        users.insert(created.id, created.clone());
        Ok(created)
    }
}
