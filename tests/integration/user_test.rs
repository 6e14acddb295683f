//! Integration tests for profile and user listing.

mod helpers;

use axum::http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_profile_returns_own_account() {
    let app = TestApp::new();
    let token = app.register_seller("frank@example.com").await;

    let response = app
        .request("GET", "/api/users/profile", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "frank@example.com");
    assert_eq!(response.body["role"], "seller");
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_list_users_is_admin_only() {
    let app = TestApp::new();
    let seller = app.register_seller("grace@example.com").await;
    let admin = app.seed_admin("root@example.com").await;

    let denied = app.request("GET", "/api/users", None, Some(&seller)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.body["error"], "FORBIDDEN");

    let listed = app.request("GET", "/api/users", None, Some(&admin)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let users = listed.body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
    assert!(users.iter().any(|u| u["role"] == "admin"));
}

#[tokio::test]
async fn test_list_users_requires_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/users", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
