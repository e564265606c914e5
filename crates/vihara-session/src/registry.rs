//! The shared session registry.
//!
//! Every request task holds a clone of the same [`SessionRegistry`]. Each
//! call takes the lock, performs one map operation, and releases it; no
//! lock is ever held across an `.await` on anything else.
//!
//! ## Lifecycle
//!
//! ```text
//! login ──→ create() ──→ resolve() … resolve() ──→ delete() ← logout
//!                             │
//!                             └──→ None once deleted (or never issued)
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;
use vihara_protocol::UserId;

use crate::{generate_token, SessionStore};

/// Process-wide `token → user` table, safe to share across tasks.
///
/// Cloning is cheap (an `Arc` bump); all clones see the same sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    store: Arc<Mutex<SessionStore>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a token for `user_id`, stores it, and returns it.
    pub async fn create(&self, user_id: UserId) -> String {
        let token = generate_token(user_id);
        self.store(token.clone(), user_id).await;
        token
    }

    /// Inserts or overwrites the session for `token`.
    pub async fn store(&self, token: String, user_id: UserId) {
        let replaced = self.store.lock().await.insert(token, user_id);
        if let Some(previous) = replaced {
            tracing::warn!(%user_id, %previous, "session token overwritten");
        } else {
            tracing::info!(%user_id, "session created");
        }
    }

    /// Returns the user behind `token`, or `None` if no such session exists.
    pub async fn resolve(&self, token: &str) -> Option<UserId> {
        self.store.lock().await.resolve(token)
    }

    /// Ends the session for `token`. Returns `true` if one existed.
    pub async fn delete(&self, token: &str) -> bool {
        let removed = self.store.lock().await.remove(token);
        if removed {
            tracing::info!("session deleted");
        }
        removed
    }

    /// Ends every session belonging to `user_id`.
    ///
    /// Returns how many sessions were removed.
    pub async fn revoke_user(&self, user_id: UserId) -> usize {
        let removed = self.store.lock().await.remove_user(user_id);
        if removed > 0 {
            tracing::info!(%user_id, removed, "sessions revoked");
        }
        removed
    }

    /// Returns the number of live sessions.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(id: u64) -> UserId {
        UserId(id)
    }

    #[tokio::test]
    async fn test_store_then_resolve_returns_user() {
        let registry = SessionRegistry::new();

        registry.store("tok".into(), uid(7)).await;

        assert_eq!(registry.resolve("tok").await, Some(uid(7)));
    }

    #[tokio::test]
    async fn test_delete_then_resolve_returns_none() {
        let registry = SessionRegistry::new();
        registry.store("tok".into(), uid(7)).await;

        assert!(registry.delete("tok").await);

        assert_eq!(registry.resolve("tok").await, None);
    }

    #[tokio::test]
    async fn test_delete_unknown_token_is_noop() {
        let registry = SessionRegistry::new();
        registry.store("keep".into(), uid(1)).await;

        assert!(!registry.delete("missing").await);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_returns_resolvable_token_with_id_prefix() {
        let registry = SessionRegistry::new();

        let token = registry.create(uid(42)).await;

        assert!(token.starts_with("42-"));
        assert_eq!(registry.resolve(&token).await, Some(uid(42)));
    }

    #[tokio::test]
    async fn test_create_twice_keeps_both_sessions() {
        // Logging in from two browsers yields two independent sessions.
        let registry = SessionRegistry::new();

        let first = registry.create(uid(3)).await;
        let second = registry.create(uid(3)).await;

        assert_ne!(first, second);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let registry = SessionRegistry::new();
        let clone = registry.clone();

        registry.store("tok".into(), uid(5)).await;

        assert_eq!(clone.resolve("tok").await, Some(uid(5)));
    }

    #[tokio::test]
    async fn test_revoke_user_removes_only_that_user() {
        let registry = SessionRegistry::new();
        let a = registry.create(uid(1)).await;
        let b = registry.create(uid(2)).await;

        assert_eq!(registry.revoke_user(uid(1)).await, 1);

        assert_eq!(registry.resolve(&a).await, None);
        assert_eq!(registry.resolve(&b).await, Some(uid(2)));
    }

    #[tokio::test]
    async fn test_forged_token_with_valid_prefix_is_not_resolved() {
        let registry = SessionRegistry::new();
        registry.create(uid(42)).await;

        let forged = format!("42-{}", "0".repeat(32));

        assert_eq!(registry.resolve(&forged).await, None);
    }
}
