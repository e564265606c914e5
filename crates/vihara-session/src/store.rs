//! The session table itself.
//!
//! `SessionStore` is NOT thread-safe by itself: it is a plain `HashMap`.
//! The only way other code reaches it is through [`SessionRegistry`],
//! which owns it behind a mutex.
//!
//! [`SessionRegistry`]: crate::SessionRegistry

use std::collections::HashMap;

use vihara_protocol::UserId;

/// Maps session tokens to the user they were issued for.
///
/// No size bound and no expiry: entries live until [`remove`](Self::remove)
/// is called (logout) or the process exits.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, UserId>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the entry for `token`.
    ///
    /// Returns the user the token previously mapped to, if any.
    pub fn insert(&mut self, token: String, user_id: UserId) -> Option<UserId> {
        self.sessions.insert(token, user_id)
    }

    /// Looks up the user behind `token`.
    pub fn resolve(&self, token: &str) -> Option<UserId> {
        self.sessions.get(token).copied()
    }

    /// Removes `token`. Returns `true` if it was present.
    pub fn remove(&mut self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drops every session belonging to `user_id` and returns how many
    /// were removed. Used when an account is deactivated or deleted.
    pub fn remove_user(&mut self, user_id: UserId) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, owner| *owner != user_id);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(id: u64) -> UserId {
        UserId(id)
    }

    #[test]
    fn test_insert_then_resolve_returns_user() {
        let mut store = SessionStore::new();
        store.insert("7-abc".into(), uid(7));

        assert_eq!(store.resolve("7-abc"), Some(uid(7)));
    }

    #[test]
    fn test_insert_overwrites_existing_token() {
        let mut store = SessionStore::new();
        store.insert("tok".into(), uid(1));

        let previous = store.insert("tok".into(), uid(2));

        assert_eq!(previous, Some(uid(1)));
        assert_eq!(store.resolve("tok"), Some(uid(2)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_resolve_unknown_token_returns_none() {
        let store = SessionStore::new();

        assert_eq!(store.resolve("42-deadbeef"), None);
    }

    #[test]
    fn test_remove_present_and_absent() {
        let mut store = SessionStore::new();
        store.insert("tok".into(), uid(1));

        assert!(store.remove("tok"));
        assert!(!store.remove("tok"), "second remove is a no-op");
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_user_drops_all_of_their_sessions() {
        let mut store = SessionStore::new();
        store.insert("a".into(), uid(1));
        store.insert("b".into(), uid(1));
        store.insert("c".into(), uid(2));

        let removed = store.remove_user(uid(1));

        assert_eq!(removed, 2);
        assert_eq!(store.resolve("c"), Some(uid(2)));
        assert_eq!(store.len(), 1);
    }
}
