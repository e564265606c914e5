//! The admin gate: what every protected request passes through.
//!
//! The flow for a protected route is:
//!   1. Pull the `session_id` cookie out of the `Cookie` header
//!   2. Resolve it against the session registry
//!   3. Check the account is still active
//!   4. Hand the [`Principal`] to the handler, or answer with a [`Denial`]
//!
//! Login and logout live here too, since they are the only places a
//! session cookie is issued or cleared.

use cookie::Cookie;
use serde::{Deserialize, Serialize};
use vihara_ledger::LedgerError;
use vihara_protocol::{Codec, JsonCodec, ProtocolError, UserId};
use vihara_session::cookies::{extract_session_token, login_cookie, logout_cookie};
use vihara_session::{
    AdminRegistration, Authenticator, Principal, SessionAuthenticator, SessionConfig, SessionError,
    SessionRegistry, UserAccount, UserDirectory,
};

use crate::ViharaBuilder;

/// Shown when a protected route is hit without a live session.
pub const MSG_LOGIN_REQUIRED: &str = "กรุณาเข้าสู่ระบบ";
/// Shown for a wrong username or password.
pub const MSG_BAD_CREDENTIALS: &str = "ชื่อผู้ใช้หรือรหัสผ่านไม่ถูกต้อง";
/// Shown when the login form is incomplete.
pub const MSG_MISSING_CREDENTIALS: &str = "กรุณากรอกชื่อผู้ใช้และรหัสผ่าน";
/// Shown when a request body can't be parsed.
pub const MSG_BAD_REQUEST: &str = "ข้อมูลไม่ถูกต้อง";
/// Shown when something failed on our side.
pub const MSG_INTERNAL: &str = "เกิดข้อผิดพลาดภายในระบบ";

/// Shown when a form is missing a required field.
pub const MSG_INCOMPLETE_FORM: &str = "กรุณากรอกข้อมูลให้ครบถ้วน";
/// Shown when registering an administrator under a username in use.
pub const MSG_USERNAME_TAKEN: &str = "ชื่อผู้ใช้นี้ถูกใช้งานแล้ว";
/// Shown when creating an administrator account failed on our side.
pub const MSG_ACCOUNT_FAILED: &str = "เกิดข้อผิดพลาดในการสร้างบัญชี";

pub const MSG_LOGIN_OK: &str = "เข้าสู่ระบบสำเร็จ";
pub const MSG_LOGOUT_OK: &str = "ออกจากระบบสำเร็จ";
pub const MSG_ACCOUNT_CREATED: &str = "สร้างบัญชีสำเร็จ";

// ---------------------------------------------------------------------------
// Denial
// ---------------------------------------------------------------------------

/// An HTTP-shaped rejection.
///
/// Serializes as `{"error": "<message>"}`; the status goes on the
/// response line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Denial {
    #[serde(skip)]
    pub status: u16,
    #[serde(rename = "error")]
    pub message: String,
}

impl Denial {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self::new(401, MSG_LOGIN_REQUIRED)
    }

    pub fn bad_credentials() -> Self {
        Self::new(401, MSG_BAD_CREDENTIALS)
    }

    pub fn missing_credentials() -> Self {
        Self::new(400, MSG_MISSING_CREDENTIALS)
    }

    /// The response body.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.message })
    }
}

impl std::fmt::Display for Denial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

impl From<SessionError> for Denial {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Unauthenticated => Self::unauthenticated(),
            SessionError::InvalidCredentials => Self::bad_credentials(),
            SessionError::MissingCredentials => Self::missing_credentials(),
            SessionError::MissingAccountFields => Self::new(400, MSG_INCOMPLETE_FORM),
            SessionError::UsernameTaken(_) => Self::new(400, MSG_USERNAME_TAKEN),
            SessionError::PasswordHash(e) => {
                tracing::error!(error = %e, "password hashing failed");
                Self::new(500, MSG_INTERNAL)
            }
            SessionError::Directory(e) => {
                tracing::error!(error = %e, "storing administrator account failed");
                Self::new(500, MSG_ACCOUNT_FAILED)
            }
        }
    }
}

impl From<ProtocolError> for Denial {
    fn from(err: ProtocolError) -> Self {
        tracing::debug!(error = %err, "rejected: malformed body");
        Self::new(400, MSG_BAD_REQUEST)
    }
}

impl From<LedgerError> for Denial {
    fn from(err: LedgerError) -> Self {
        let message = match err {
            LedgerError::InvalidKind(_) => "ประเภทต้องเป็น 'income' หรือ 'expense'",
            LedgerError::NonPositiveAmount(_) => "จำนวนเงินต้องมากกว่า 0",
            LedgerError::MissingDescription => "กรุณากรอกรายละเอียด",
            LedgerError::InvalidDate(_) => "รูปแบบวันที่ไม่ถูกต้อง (ใช้ YYYY-MM-DD)",
            LedgerError::TooManyImages { .. } => "สามารถอัพโหลดได้สูงสุด 5 ภาพ",
            LedgerError::MissingField(_) => MSG_INCOMPLETE_FORM,
            LedgerError::InvalidBirthDate(_) => "รูปแบบวันเกิดไม่ถูกต้อง",
        };
        Self::new(400, message)
    }
}

// ---------------------------------------------------------------------------
// Login responses
// ---------------------------------------------------------------------------

/// The login form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// A successful login: who logged in and the cookie to set.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub principal: Principal,
    pub cookie: Cookie<'static>,
}

impl LoginGrant {
    /// The session token carried by the cookie.
    pub fn token(&self) -> &str {
        self.cookie.value()
    }

    /// The `Set-Cookie` header value.
    pub fn set_cookie(&self) -> String {
        self.cookie.to_string()
    }

    /// The response body.
    pub fn reply(&self) -> LoginReply<'_> {
        LoginReply {
            success: true,
            message: MSG_LOGIN_OK,
            user: &self.principal,
        }
    }
}

/// Body of a successful login response.
#[derive(Debug, Serialize)]
pub struct LoginReply<'a> {
    pub success: bool,
    pub message: &'static str,
    pub user: &'a Principal,
}

/// Body of a successful "register administrator" response. Sent with
/// status [`AccountReply::STATUS`].
#[derive(Debug, Serialize)]
pub struct AccountReply {
    pub success: bool,
    pub message: &'static str,
    /// Serializes without the password hash.
    pub user: UserAccount,
}

impl AccountReply {
    pub const STATUS: u16 = 201;
}

// ---------------------------------------------------------------------------
// AdminGate
// ---------------------------------------------------------------------------

/// Cookie-in, principal-out authentication for the admin routes.
///
/// Build one with [`ViharaBuilder`] and share it (`Arc<AdminGate<_>>`)
/// across request handlers.
pub struct AdminGate<D> {
    auth: SessionAuthenticator<D>,
    config: SessionConfig,
}

impl<D: UserDirectory> AdminGate<D> {
    /// Creates a new builder.
    pub fn builder() -> ViharaBuilder {
        ViharaBuilder::new()
    }

    pub(crate) fn new(auth: SessionAuthenticator<D>, config: SessionConfig) -> Self {
        Self { auth, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionRegistry {
        self.auth.sessions()
    }

    pub fn authenticator(&self) -> &SessionAuthenticator<D> {
        &self.auth
    }

    /// Gates a protected request on its `Cookie` header.
    ///
    /// # Returns
    /// - `Ok(Principal)`: live session, active account
    /// - `Err(Denial)`: always `401` with [`MSG_LOGIN_REQUIRED`]
    pub async fn authorize(&self, cookie_header: Option<&str>) -> Result<Principal, Denial> {
        let Some(token) = cookie_header.and_then(|h| extract_session_token(h, &self.config)) else {
            tracing::debug!("rejected: no session cookie");
            return Err(Denial::unauthenticated());
        };

        let principal = self.auth.authenticate(&token).await?;
        tracing::trace!(user_id = %principal.user_id, "request authorized");
        Ok(principal)
    }

    /// Checks credentials and issues a session cookie.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginGrant, Denial> {
        let (principal, token) = self.auth.login(username, password).await?;
        let cookie = login_cookie(&token, &self.config);
        Ok(LoginGrant { principal, cookie })
    }

    /// [`login`](Self::login) straight from a JSON request body.
    ///
    /// A body that isn't a JSON object is a `400` with [`MSG_BAD_REQUEST`].
    pub async fn login_json(&self, body: &[u8]) -> Result<LoginGrant, Denial> {
        let form: LoginRequest = JsonCodec.decode(body)?;
        self.login(&form.username, &form.password).await
    }

    /// Creates an administrator account.
    ///
    /// # Returns
    /// - `Ok(AccountReply)`: send with status `201`
    /// - `Err(Denial)`: `400` with [`MSG_INCOMPLETE_FORM`] or
    ///   [`MSG_USERNAME_TAKEN`], `500` for hashing or storage failures
    pub async fn register_admin(&self, form: AdminRegistration) -> Result<AccountReply, Denial> {
        let user = self.auth.register_admin(form).await?;
        Ok(AccountReply {
            success: true,
            message: MSG_ACCOUNT_CREATED,
            user,
        })
    }

    /// [`register_admin`](Self::register_admin) straight from a JSON body.
    pub async fn register_admin_json(&self, body: &[u8]) -> Result<AccountReply, Denial> {
        let form: AdminRegistration = JsonCodec.decode(body)?;
        self.register_admin(form).await
    }

    /// Ends the session named in the `Cookie` header, if any, and returns
    /// the cookie that clears it in the browser.
    ///
    /// Never fails: logging out without a session still clears the cookie.
    pub async fn logout(&self, cookie_header: Option<&str>) -> Cookie<'static> {
        if let Some(token) = cookie_header.and_then(|h| extract_session_token(h, &self.config)) {
            self.auth.logout(&token).await;
        }
        logout_cookie(&self.config)
    }

    /// Ends every session of `user_id`.
    pub async fn revoke(&self, user_id: UserId) -> usize {
        self.auth.revoke(user_id).await
    }
}
