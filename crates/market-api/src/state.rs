//! Application state shared across all handlers.

use std::sync::Arc;

use market_auth::{
    AccessGuard, AuthService, JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator,
};
use market_core::config::AppConfig;
use market_core::result::AppResult;
use market_database::repositories::{ProductStore, UserStore};
use market_service::{ProductService, UserService};

use crate::router::route_table;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// Token verification and per-route access rules
    pub access_guard: Arc<AccessGuard>,
    /// Registration and login
    pub auth_service: Arc<AuthService>,

    // ── Services ─────────────────────────────────────────────
    /// Product listings with ownership rules
    pub product_service: Arc<ProductService>,
    /// Profile and user listing
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wires every component from configuration and the chosen stores.
    ///
    /// Fails when the auth configuration is unusable, e.g. a missing
    /// signing secret.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        products: Arc<dyn ProductStore>,
    ) -> AppResult<Self> {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth)?);
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth)?);
        let access_guard = Arc::new(AccessGuard::new(jwt_decoder, route_table()));
        let password_hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        let password_validator = PasswordValidator::new(&config.auth);

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            password_hasher,
            password_validator,
            jwt_encoder,
        ));
        let product_service = Arc::new(ProductService::new(products, Arc::clone(&users)));
        let user_service = Arc::new(UserService::new(users));

        Ok(Self {
            config: Arc::new(config),
            access_guard,
            auth_service,
            product_service,
            user_service,
        })
    }
}
