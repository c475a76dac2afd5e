//! Session durability across restarts, logout erasure, and guard scenarios.
//!
//! These tests use the file storage backend so "restart" means what it means
//! in production: a fresh store reading the same session file.

#![allow(clippy::unwrap_used)]

use stylehub_core::{AccountRole, Role};

use stylehub_client::guard::{self, RouteDecision, ViewAccess};
use stylehub_client::session::storage::FileStorage;
use stylehub_integration_tests::{MockApi, seed};

#[tokio::test]
async fn test_restart_reproduces_identity_triple() {
    let api = MockApi::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");

    let (client, session) = api.client_with_storage(FileStorage::open(&session_file));
    let auth = client
        .login(AccountRole::Customer, &seed::customer_credentials())
        .await
        .expect("Login should succeed");
    let token = auth.token.clone();
    session
        .login(auth.user, auth.token, auth.role)
        .expect("Session login should succeed");

    // Restart: a fresh client stack over the same session file.
    let (_client, restarted) = api.client_with_storage(FileStorage::open(&session_file));

    let identity = restarted.current_identity();
    assert_eq!(identity.role(), Role::Customer);
    assert_eq!(identity.token(), Some(token.as_str()));
    assert_eq!(
        identity.user().unwrap().id.as_str(),
        seed::CUSTOMER_ID,
        "Restart must reproduce the persisted user record"
    );
}

#[tokio::test]
async fn test_logout_leaves_no_identity_in_storage() {
    let api = MockApi::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");

    let (client, session) = api.client_with_storage(FileStorage::open(&session_file));
    let auth = client
        .login(AccountRole::Seller, &seed::seller_credentials())
        .await
        .expect("Login should succeed");
    session
        .login(auth.user, auth.token, auth.role)
        .expect("Session login should succeed");

    session.logout().expect("Logout should succeed");
    assert_eq!(session.current_role(), Role::Anonymous);

    // The durable namespace is wiped in full, not just in memory.
    let raw = std::fs::read_to_string(&session_file).unwrap();
    let persisted: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, serde_json::json!({}));

    let (_client, restarted) = api.client_with_storage(FileStorage::open(&session_file));
    assert_eq!(restarted.current_role(), Role::Anonymous);
}

#[tokio::test]
async fn test_corrupt_session_file_starts_anonymous() {
    let api = MockApi::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    std::fs::write(&session_file, b"{\"user\": \"{broken").unwrap();

    let (_client, session) = api.client_with_storage(FileStorage::open(&session_file));
    assert_eq!(session.current_role(), Role::Anonymous);
}

#[tokio::test]
async fn test_seller_denied_customer_view_keeps_identity() {
    let api = MockApi::spawn().await;
    let (client, session) = api.client();

    let auth = client
        .login(AccountRole::Seller, &seed::seller_credentials())
        .await
        .expect("Login should succeed");
    session
        .login(auth.user, auth.token, auth.role)
        .expect("Session login should succeed");

    // Navigating to a customer-only view redirects to login...
    let decision = guard::evaluate(session.current_role(), ViewAccess::Customer);
    assert_eq!(decision, RouteDecision::RedirectToLogin);

    // ...identically to an anonymous visitor...
    assert_eq!(
        decision,
        guard::evaluate(Role::Anonymous, ViewAccess::Customer)
    );

    // ...and the Seller identity is untouched by the redirect.
    let identity = session.current_identity();
    assert_eq!(identity.role(), Role::Seller);
    assert!(identity.is_authenticated());
}
