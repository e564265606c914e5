//! The `session_id` cookie: emitting it on login, clearing it on logout,
//! and finding it in a request's `Cookie` header.

use cookie::time::{Duration as CookieDuration, OffsetDateTime};
use cookie::Cookie;

use crate::SessionConfig;

/// Builds the cookie that carries a freshly issued session token.
///
/// `HttpOnly`, `SameSite` and `Secure` follow `config`; the expiry is
/// `now + config.cookie_ttl` and is only a hint to the browser.
pub fn login_cookie(token: &str, config: &SessionConfig) -> Cookie<'static> {
    let ttl = CookieDuration::try_from(config.cookie_ttl).unwrap_or(CookieDuration::DAY);

    Cookie::build((config.cookie_name.clone(), token.to_string()))
        .path(config.path.clone())
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site)
        .expires(OffsetDateTime::now_utc() + ttl)
        .build()
}

/// Builds the cookie that makes the browser forget the session.
///
/// Same name and path as [`login_cookie`], empty value, expired at the
/// Unix epoch.
pub fn logout_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), String::new()))
        .path(config.path.clone())
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

/// Returns the session token from a raw `Cookie` request header.
///
/// Unparseable pairs are skipped. An empty value counts as no token.
pub fn extract_session_token(header: &str, config: &SessionConfig) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .find(|c| c.name() == config.cookie_name)
        .map(|c| c.value().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use cookie::SameSite;

    use super::*;

    #[test]
    fn test_login_cookie_flags() {
        let config = SessionConfig::default();

        let cookie = login_cookie("7-abc", &config);

        assert_eq!(cookie.name(), "session_id");
        assert_eq!(cookie.value(), "7-abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_ne!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_login_cookie_expires_about_a_day_out() {
        let config = SessionConfig::default();

        let cookie = login_cookie("7-abc", &config);

        let expires = cookie.expires_datetime().expect("expiry set");
        let remaining = expires - OffsetDateTime::now_utc();
        assert!(remaining > CookieDuration::hours(23));
        assert!(remaining <= CookieDuration::hours(24));
    }

    #[test]
    fn test_login_cookie_secure_follows_config() {
        let config = SessionConfig {
            secure: true,
            ..SessionConfig::default()
        };

        assert_eq!(login_cookie("t", &config).secure(), Some(true));
    }

    #[test]
    fn test_logout_cookie_is_empty_and_expired() {
        let config = SessionConfig::default();

        let cookie = logout_cookie(&config);

        assert_eq!(cookie.name(), "session_id");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
    }

    #[test]
    fn test_extract_session_token_among_other_cookies() {
        let config = SessionConfig::default();

        let token = extract_session_token("theme=dark; session_id=42-abcd; lang=th", &config);

        assert_eq!(token.as_deref(), Some("42-abcd"));
    }

    #[test]
    fn test_extract_session_token_missing_or_empty() {
        let config = SessionConfig::default();

        assert_eq!(extract_session_token("theme=dark", &config), None);
        assert_eq!(extract_session_token("session_id=", &config), None);
        assert_eq!(extract_session_token("", &config), None);
    }

    #[test]
    fn test_extract_session_token_honors_custom_name() {
        let config = SessionConfig {
            cookie_name: "vihara_sid".into(),
            ..SessionConfig::default()
        };

        assert_eq!(
            extract_session_token("session_id=x; vihara_sid=y", &config).as_deref(),
            Some("y")
        );
    }
}
