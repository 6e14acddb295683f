//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use market_api::{AppState, build_app};
use market_auth::PasswordHasher;
use market_core::config::{AppConfig, StoreProvider};
use market_database::repositories::UserStore;
use market_database::{MemoryProductStore, MemoryUserStore};
use market_entity::user::{CreateUser, UserRole};

/// Password used by every helper-created account.
pub const PASSWORD: &str = "correct-horse";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// User store, for seeding accounts registration cannot create
    pub users: Arc<MemoryUserStore>,
    /// Application config
    pub config: AppConfig,
}

/// Test response wrapper
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body as JSON (`Null` when empty)
    pub body: Value,
}

impl TestApp {
    /// Create a new test application backed by in-memory stores
    pub fn new() -> Self {
        let config = test_config();
        let users = Arc::new(MemoryUserStore::new());
        let products = Arc::new(MemoryProductStore::new());

        let state = AppState::new(config.clone(), users.clone(), products)
            .expect("Failed to build app state");
        let router = build_app(state, &config.server.cors);

        Self {
            router,
            users,
            config,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Make a request with a raw `Authorization` header value
    pub async fn request_with_header(
        &self,
        method: &str,
        path: &str,
        authorization: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("Authorization", authorization)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Register a seller and return the raw response
    pub async fn register(&self, email: &str, password: &str, confirmation: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": email,
                "password": password,
                "passwordConfirmation": confirmation,
            })),
            None,
        )
        .await
    }

    /// Register a seller with [`PASSWORD`] and return its token
    pub async fn register_seller(&self, email: &str) -> String {
        let response = self.register(email, PASSWORD, PASSWORD).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        token_of(&response)
    }

    /// Log in and return the token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        token_of(&response)
    }

    /// Insert an admin directly into the store and log in as them
    pub async fn seed_admin(&self, email: &str) -> String {
        let hasher = PasswordHasher::new(&self.config.auth).expect("hasher");
        let password_hash = hasher.hash_password(PASSWORD).expect("hash");
        self.users
            .create(CreateUser {
                email: email.to_string(),
                password_hash,
                role: UserRole::Admin,
            })
            .await
            .expect("Failed to seed admin");
        self.login(email, PASSWORD).await
    }

    /// Create a product as the token holder and return its ID
    pub async fn create_product(&self, token: &str, name: &str, sku: &str, price: f64) -> String {
        let response = self
            .request(
                "POST",
                "/api/products",
                Some(serde_json::json!({
                    "name": name,
                    "description": "test product",
                    "sku": sku,
                    "quantity": 5,
                    "price": price,
                    "category": "test",
                })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"].as_str().unwrap().to_string()
    }
}

fn token_of(response: &TestResponse) -> String {
    response.body["token"].as_str().unwrap().to_string()
}

/// Memory stores, a fixed secret and cheap hashing
fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.provider = StoreProvider::Memory;
    config.auth.jwt_secret = Some("integration-test-secret".to_string());
    config.auth.hash_memory_kib = 8;
    config.auth.hash_iterations = 1;
    config.auth.hash_parallelism = 1;
    config
}
