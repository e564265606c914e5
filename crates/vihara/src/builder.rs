//! `ViharaBuilder`: wiring a user directory and session settings into an
//! [`AdminGate`].

use std::sync::Arc;
use std::time::Duration;

use vihara_session::{SessionAuthenticator, SessionConfig, SessionRegistry, UserDirectory};

use crate::AdminGate;

/// Builder for configuring an [`AdminGate`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use vihara::prelude::*;
///
/// let gate = ViharaBuilder::new()
///     .cookie_ttl(Duration::from_secs(8 * 60 * 60))
///     .secure(true)
///     .build(Arc::new(InMemoryDirectory::new()));
///
/// assert!(gate.config().secure);
/// ```
#[derive(Debug, Default)]
pub struct ViharaBuilder {
    session_config: SessionConfig,
    sessions: Option<SessionRegistry>,
}

impl ViharaBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    pub fn cookie_name(mut self, name: impl Into<String>) -> Self {
        self.session_config.cookie_name = name.into();
        self
    }

    pub fn cookie_ttl(mut self, ttl: Duration) -> Self {
        self.session_config.cookie_ttl = ttl;
        self
    }

    /// Sets the `Secure` flag on issued cookies. Turn on behind HTTPS.
    pub fn secure(mut self, secure: bool) -> Self {
        self.session_config.secure = secure;
        self
    }

    /// Uses an existing registry instead of a fresh one, so several gates
    /// (or other code) can see the same sessions.
    pub fn sessions(mut self, registry: SessionRegistry) -> Self {
        self.sessions = Some(registry);
        self
    }

    /// Builds the gate over `directory`.
    pub fn build<D: UserDirectory>(self, directory: Arc<D>) -> AdminGate<D> {
        let sessions = self.sessions.unwrap_or_default();
        tracing::info!(
            cookie = %self.session_config.cookie_name,
            secure = self.session_config.secure,
            "admin gate ready"
        );
        AdminGate::new(
            SessionAuthenticator::new(sessions, directory),
            self.session_config,
        )
    }
}
