//! Integration tests for the admin gate: login, cookie-gated requests,
//! and logout, end to end.

use std::sync::Arc;

use vihara::prelude::*;
use vihara::{
    AccountReply, MSG_ACCOUNT_CREATED, MSG_BAD_CREDENTIALS, MSG_INCOMPLETE_FORM,
    MSG_LOGIN_REQUIRED, MSG_MISSING_CREDENTIALS, MSG_USERNAME_TAKEN,
};

// =========================================================================
// Helpers
// =========================================================================

fn admin(id: u64, username: &str, password: &str, role: Role) -> UserAccount {
    UserAccount {
        id: UserId(id),
        username: username.to_string(),
        full_name: format!("{username} (test)"),
        password_hash: hash_password(password).expect("hash"),
        is_active: true,
        role,
    }
}

fn gate() -> AdminGate<InMemoryDirectory> {
    let directory = InMemoryDirectory::with_accounts([
        admin(1, "registrar", "pw-reg", Role::Registration),
        admin(2, "treasurer", "pw-fin", Role::Finance),
    ]);
    ViharaBuilder::new().build(Arc::new(directory))
}

fn cookie_header(grant: &LoginGrant) -> String {
    format!("theme=dark; session_id={}", grant.token())
}

// =========================================================================
// Login → authorize → logout
// =========================================================================

#[tokio::test]
async fn test_login_then_authorize_with_cookie() {
    let gate = gate();

    let grant = gate.login("treasurer", "pw-fin").await.expect("login");
    let principal = gate
        .authorize(Some(&cookie_header(&grant)))
        .await
        .expect("cookie should authorize");

    assert_eq!(principal.user_id, UserId(2));
    assert_eq!(principal.role, Role::Finance);
    assert_eq!(principal, grant.principal);
}

#[tokio::test]
async fn test_login_set_cookie_header_has_session_flags() {
    let gate = gate();

    let grant = gate.login("registrar", "pw-reg").await.unwrap();
    let header = grant.set_cookie();

    assert!(header.starts_with(&format!("session_id={}", grant.token())));
    assert!(header.contains("HttpOnly"));
    assert!(header.contains("SameSite=Lax"));
    assert!(!header.contains("Secure"));
}

#[tokio::test]
async fn test_login_reply_body() {
    let gate = gate();

    let grant = gate.login("registrar", "pw-reg").await.unwrap();
    let body = serde_json::to_value(grant.reply()).unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "registrar");
    assert_eq!(body["user"]["role"], "registration");
}

#[tokio::test]
async fn test_logout_invalidates_cookie_and_clears_it() {
    let gate = gate();
    let grant = gate.login("registrar", "pw-reg").await.unwrap();
    let header = cookie_header(&grant);

    let cleared = gate.logout(Some(&header)).await;

    assert_eq!(cleared.name(), "session_id");
    assert_eq!(cleared.value(), "");
    let denial = gate.authorize(Some(&header)).await.unwrap_err();
    assert_eq!(denial.status, 401);
}

#[tokio::test]
async fn test_logout_without_session_still_clears_cookie() {
    let gate = gate();

    let cleared = gate.logout(None).await;

    assert_eq!(cleared.value(), "");
    assert!(gate.sessions().is_empty().await);
}

// =========================================================================
// Denials
// =========================================================================

#[tokio::test]
async fn test_authorize_without_cookie_is_401() {
    let gate = gate();

    for header in [None, Some(""), Some("theme=dark"), Some("session_id=")] {
        let denial = gate.authorize(header).await.unwrap_err();
        assert_eq!(denial.status, 401, "header {header:?}");
        assert_eq!(denial.message, MSG_LOGIN_REQUIRED);
    }
}

#[tokio::test]
async fn test_authorize_forged_cookie_is_401() {
    let gate = gate();
    gate.login("treasurer", "pw-fin").await.unwrap();

    let forged = format!("session_id=2-{}", "f".repeat(32));
    let denial = gate.authorize(Some(&forged)).await.unwrap_err();

    assert_eq!(denial, Denial::unauthenticated());
}

#[tokio::test]
async fn test_authorize_after_deactivation_is_401() {
    let gate = gate();
    let grant = gate.login("treasurer", "pw-fin").await.unwrap();

    gate.authenticator()
        .directory()
        .set_active(UserId(2), false)
        .await;

    let denial = gate.authorize(Some(&cookie_header(&grant))).await.unwrap_err();
    assert_eq!(denial.status, 401);
}

#[tokio::test]
async fn test_login_failures_map_to_thai_messages() {
    let gate = gate();

    let wrong = gate.login("treasurer", "nope").await.unwrap_err();
    let unknown = gate.login("ghost", "pw-fin").await.unwrap_err();
    let missing = gate.login("treasurer", "").await.unwrap_err();

    assert_eq!((wrong.status, wrong.message.as_str()), (401, MSG_BAD_CREDENTIALS));
    assert_eq!(wrong, unknown);
    assert_eq!((missing.status, missing.message.as_str()), (400, MSG_MISSING_CREDENTIALS));
    assert_eq!(
        missing.to_json(),
        serde_json::json!({ "error": MSG_MISSING_CREDENTIALS })
    );
}

#[tokio::test]
async fn test_revoke_ends_every_browser_session() {
    let gate = gate();
    let laptop = gate.login("registrar", "pw-reg").await.unwrap();
    let phone = gate.login("registrar", "pw-reg").await.unwrap();

    assert_eq!(gate.revoke(UserId(1)).await, 2);

    assert!(gate.authorize(Some(&cookie_header(&laptop))).await.is_err());
    assert!(gate.authorize(Some(&cookie_header(&phone))).await.is_err());
}

// =========================================================================
// Custom cookie name
// =========================================================================

#[tokio::test]
async fn test_custom_cookie_name_is_honored_both_ways() {
    let directory = InMemoryDirectory::with_accounts([admin(5, "abbot", "pw", Role::Finance)]);
    let gate = ViharaBuilder::new()
        .cookie_name("vihara_sid")
        .build(Arc::new(directory));

    let grant = gate.login("abbot", "pw").await.unwrap();
    assert_eq!(grant.cookie.name(), "vihara_sid");

    let default_named = format!("session_id={}", grant.token());
    assert!(gate.authorize(Some(&default_named)).await.is_err());

    let custom_named = format!("vihara_sid={}", grant.token());
    assert!(gate.authorize(Some(&custom_named)).await.is_ok());
}

// =========================================================================
// Gated ledger flow
// =========================================================================

#[tokio::test]
async fn test_authorized_principal_records_transaction_activity() {
    let gate = gate();
    let grant = gate.login("treasurer", "pw-fin").await.unwrap();
    let principal = gate.authorize(Some(&cookie_header(&grant))).await.unwrap();

    let draft: TransactionDraft = serde_json::from_str(
        r#"{"type":"income","amount":500,"description":"ทำบุญวันพระ","date":"2024-08-19"}"#,
    )
    .unwrap();
    let tx = draft.validate(principal.user_id).unwrap().with_id(1);
    let entry = ActivityLog::for_transaction(TransactionEvent::Created, &tx, principal.user_id);

    assert_eq!(tx.user_id, UserId(2));
    assert_eq!(entry.action, "เพิ่มรายการ income");
    assert_eq!(entry.description, "ทำบุญวันพระ - จำนวน ฿500.00");
}

#[tokio::test]
async fn test_invalid_transaction_becomes_400_denial() {
    let draft: TransactionDraft = serde_json::from_str(
        r#"{"type":"income","amount":-1,"description":"x","date":"2024-08-19"}"#,
    )
    .unwrap();

    let denial: Denial = draft.validate(UserId(2)).unwrap_err().into();

    assert_eq!(denial.status, 400);
    assert_eq!(denial.message, "จำนวนเงินต้องมากกว่า 0");
}

// =========================================================================
// JSON login bodies
// =========================================================================

#[tokio::test]
async fn test_login_json_accepts_form_body() {
    let gate = gate();

    let grant = gate
        .login_json(br#"{"username":"registrar","password":"pw-reg"}"#)
        .await
        .expect("login");

    assert_eq!(grant.principal.user_id, UserId(1));
}

#[tokio::test]
async fn test_login_json_rejects_malformed_and_incomplete_bodies() {
    let gate = gate();

    let malformed = gate.login_json(b"username=registrar").await.unwrap_err();
    let incomplete = gate.login_json(br#"{"username":"registrar"}"#).await.unwrap_err();

    assert_eq!(malformed.status, 400);
    assert_eq!(malformed.message, vihara::MSG_BAD_REQUEST);
    assert_eq!(incomplete.message, MSG_MISSING_CREDENTIALS);
}

// =========================================================================
// Administrator sign-up
// =========================================================================

#[tokio::test]
async fn test_register_admin_json_then_login() {
    let gate = gate();

    let reply = gate
        .register_admin_json(
            br#"{"username":"abbot","password":"metta","full_name":"Phra Abbot","role":"finance"}"#,
        )
        .await
        .expect("register");
    let body = serde_json::to_value(&reply).unwrap();
    let grant = gate.login("abbot", "metta").await.expect("login");

    assert_eq!(AccountReply::STATUS, 201);
    assert_eq!(body["message"], MSG_ACCOUNT_CREATED);
    assert_eq!(body["user"]["id"], 3);
    assert!(body["user"].get("password_hash").is_none());
    assert_eq!(grant.principal.role, Role::Finance);
}

#[tokio::test]
async fn test_register_admin_denials() {
    let gate = gate();

    let taken = gate
        .register_admin_json(br#"{"username":"treasurer","password":"x","full_name":"Dup"}"#)
        .await
        .unwrap_err();
    let incomplete = gate
        .register_admin_json(br#"{"username":"novice","password":"x"}"#)
        .await
        .unwrap_err();

    assert_eq!((taken.status, taken.message.as_str()), (400, MSG_USERNAME_TAKEN));
    assert_eq!((incomplete.status, incomplete.message.as_str()), (400, MSG_INCOMPLETE_FORM));
}

// =========================================================================
// Registrations and the dashboard
// =========================================================================

#[tokio::test]
async fn test_registration_chanting_feeds_dashboard() {
    let draft: RegistrationDraft = serde_json::from_str(
        r#"{"full_name":"สมชาย","birth_date":"1970-06-01","province_id":10,
            "district_id":1001,"sub_district_id":100101,"address_detail":"บ้านเลขที่ 1",
            "phone_number":"0811111111","vassa":20}"#,
    )
    .unwrap();
    let mut registrant = draft.validate().unwrap().with_id(1);
    let update: ChantingStatus =
        serde_json::from_str(r#"{"chanted_pariwat":true,"chanted_manat":true}"#).unwrap();
    registrant.set_chanting(update);

    let tx: TransactionDraft = serde_json::from_str(
        r#"{"type":"income","amount":900,"description":"ทำบุญ","date":"2024-08-19"}"#,
    )
    .unwrap();
    let tx = tx.validate(UserId(2)).unwrap().with_id(1);
    let today = chrono::NaiveDate::from_ymd_opt(2024, 8, 20).unwrap();

    let dashboard = DashboardSummary::compute(
        &[registrant],
        &[tx],
        LogCounts {
            activity_logs: 1,
            device_logs: 0,
        },
        today,
    );
    let json = serde_json::to_value(&dashboard).unwrap();

    assert_eq!(json["registrations"]["chanted_manat"], 1);
    assert_eq!(json["registrations"]["chanted_ok_apan"], 0);
    assert_eq!(json["transactions"]["income_this_month"], 900.0);
    assert_eq!(json["logs"]["activity_logs"], 1);
}

#[tokio::test]
async fn test_incomplete_registration_becomes_400_denial() {
    let draft: RegistrationDraft =
        serde_json::from_str(r#"{"full_name":"สมชาย","birth_date":"1970-06-01"}"#).unwrap();

    let denial: Denial = draft.validate().unwrap_err().into();

    assert_eq!(denial.status, 400);
    assert_eq!(denial.message, MSG_INCOMPLETE_FORM);
}
