//! Session token minting and parsing.
//!
//! A token looks like `42-9f86d081884c7d659a2feaa0c55ad015`: the user id in
//! decimal, a `-`, then 128 random bits in lowercase hex. The id prefix is
//! a convenience for logs and debugging only. Authentication always goes
//! through the session table, so a token with a plausible prefix that was
//! never issued is still rejected.

use rand::Rng;
use vihara_protocol::UserId;

/// Separates the user id from the random suffix.
pub const TOKEN_SEPARATOR: char = '-';

/// Generates a fresh session token for `user_id`.
///
/// Uses the thread-local CSPRNG. If the OS randomness source is broken the
/// RNG panics; there is nothing sensible to fall back to.
pub fn generate_token(user_id: UserId) -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{user_id}{TOKEN_SEPARATOR}{suffix}")
}

/// Extracts the user id embedded in a token.
///
/// Splits once on [`TOKEN_SEPARATOR`] and parses the first segment as an
/// unsigned decimal. Returns `None` when there is no separator, the segment
/// isn't all ASCII digits, it overflows, or it is `0` (no account has id 0).
///
/// This never touches the session table. Do not treat the result as proof
/// of anything.
///
/// ```rust
/// use vihara_protocol::UserId;
/// use vihara_session::parse_session_id;
///
/// assert_eq!(parse_session_id("42-abcd1234"), Some(UserId(42)));
/// assert_eq!(parse_session_id("not-a-number-xyz"), None);
/// assert_eq!(parse_session_id("noseparator"), None);
/// ```
pub fn parse_session_id(token: &str) -> Option<UserId> {
    let (head, _) = token.split_once(TOKEN_SEPARATOR)?;
    if head.is_empty() || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match head.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(UserId(id)),
    }
}
