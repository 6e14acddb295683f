//! Integration tests for registration, login and token handling.

mod helpers;

use axum::http::StatusCode;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_register_then_login_then_profile() {
    let app = TestApp::new();

    let response = app
        .register("alice@example.com", PASSWORD, PASSWORD)
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["token"].is_string());
    assert!(response.body["expiresAt"].is_string());
    assert_eq!(response.body["user"]["email"], "alice@example.com");
    assert_eq!(response.body["user"]["role"], "seller");
    assert!(response.body["user"].get("passwordHash").is_none());
    assert!(response.body["user"].get("password_hash").is_none());

    let token = app.login("alice@example.com", PASSWORD).await;
    let profile = app
        .request("GET", "/api/users/profile", None, Some(&token))
        .await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["email"], "alice@example.com");
    assert_eq!(profile.body["id"], response.body["user"]["id"]);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    app.register_seller("dup@example.com").await;

    let response = app.register("dup@example.com", PASSWORD, PASSWORD).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "ALREADY_REGISTERED");
}

#[tokio::test]
async fn test_duplicate_wins_over_mismatch() {
    let app = TestApp::new();
    app.register_seller("order@example.com").await;

    let response = app
        .register("order@example.com", "first-password", "other-password")
        .await;
    assert_eq!(response.body["error"], "ALREADY_REGISTERED");
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let app = TestApp::new();

    let response = app
        .register("bob@example.com", "first-password", "other-password")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "PASSWORD_MISMATCH");

    // Nothing was stored, so the email is still free.
    let retry = app.register("bob@example.com", PASSWORD, PASSWORD).await;
    assert_eq!(retry.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_weak_password() {
    let app = TestApp::new();

    let response = app.register("carol@example.com", "short", "short").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "WEAK_PASSWORD");
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::new();

    let response = app.register("not-an-email", PASSWORD, PASSWORD).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body.get("details").is_some());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register_seller("dave@example.com").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "dave@example.com",
                "password": "wrong-password",
            })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body["error"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_invalid_token_rejected_on_public_route() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/products/search", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_non_bearer_header_rejected() {
    let app = TestApp::new();
    let token = app.register_seller("erin@example.com").await;

    let response = app
        .request_with_header("GET", "/api/users/profile", &format!("Token {token}"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_token_on_protected_route() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/users/profile", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_head_requests_share_get_access() {
    let app = TestApp::new();
    let seller = app.register_seller("heidi@example.com").await;

    let health = app.request("HEAD", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);

    let search = app
        .request("HEAD", "/api/products/search", None, None)
        .await;
    assert_eq!(search.status, StatusCode::OK);

    let anonymous = app.request("HEAD", "/api/users", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let as_seller = app.request("HEAD", "/api/users", None, Some(&seller)).await;
    assert_eq!(as_seller.status, StatusCode::FORBIDDEN);
}
