//! Password hashing and verification with Argon2id.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$m=19456,t=2,p=1$...`)
//! so the parameters travel with the hash and can be raised later without
//! invalidating existing accounts.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::SessionError;

/// Hashes `password` with a fresh random salt. Returns a PHC string.
pub fn hash_password(password: &str) -> Result<String, SessionError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SessionError::PasswordHash(e.to_string()))
}

/// Checks `password` against a stored PHC hash.
///
/// A malformed hash is reported as a mismatch: an account whose stored
/// hash can't be parsed simply cannot log in.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// A real Argon2 hash that belongs to no account.
///
/// Login verifies against it when the username is unknown, so a miss
/// costs the same Argon2 work as a wrong password. Computed on first use.
pub(crate) fn decoy_hash() -> &'static str {
    static DECOY: OnceLock<String> = OnceLock::new();
    DECOY.get_or_init(|| {
        hash_password("vihara-decoy-account").unwrap_or_else(|e| {
            tracing::error!(error = %e, "could not build decoy password hash");
            String::new()
        })
    })
}
