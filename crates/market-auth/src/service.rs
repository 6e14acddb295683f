//! Registration and login.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use market_core::error::{AppError, ErrorKind};
use market_core::result::AppResult;
use market_database::repositories::UserStore;
use market_entity::user::{CreateUser, User, UserRole, UserSummary};

use crate::jwt::{Claims, JwtEncoder};
use crate::password::{PasswordHasher, PasswordValidator};

/// Result of a successful registration or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthOutcome {
    /// Signed session token.
    pub token: String,
    /// The claims inside `token`.
    pub claims: Claims,
    /// The account the token was issued for.
    pub user: UserSummary,
}

/// Orchestrates the credential store, password hasher and token issuer.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: PasswordValidator,
    encoder: Arc<JwtEncoder>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: PasswordValidator,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
        }
    }

    /// Registers a new seller account and signs them in.
    ///
    /// Checks run in a fixed order: existing email, confirmation mismatch,
    /// then password length. Nothing is written unless all pass.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> AppResult<AuthOutcome> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::already_registered());
        }
        if password != password_confirmation {
            return Err(AppError::password_mismatch());
        }
        self.validator.validate(password)?;

        let password_hash = self.hash(password.to_string()).await?;

        let user = self
            .users
            .create(CreateUser {
                email: email.to_string(),
                password_hash,
                role: UserRole::Seller,
            })
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Conflict => AppError::already_registered(),
                _ => e,
            })?;

        info!(user_id = %user.id, "User registered");
        self.sign_in(&user)
    }

    /// Exchanges email and password for a session token.
    ///
    /// An unknown email and a wrong password fail with the same error, and
    /// both pay for one Argon2 run.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthOutcome> {
        let Some(user) = self.users.find_by_email(email).await? else {
            self.hash(password.to_string()).await?;
            warn!("Login failed: unknown email");
            return Err(AppError::invalid_credentials());
        };

        let valid = self
            .verify(password.to_string(), user.password_hash.clone())
            .await?;
        if !valid {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::invalid_credentials());
        }

        info!(user_id = %user.id, role = %user.role, "User logged in");
        self.sign_in(&user)
    }

    fn sign_in(&self, user: &User) -> AppResult<AuthOutcome> {
        let claims = self.encoder.claims_for(user);
        let token = self.encoder.issue(&claims)?;
        Ok(AuthOutcome {
            token,
            claims,
            user: user.summary(),
        })
    }

    async fn hash(&self, password: String) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }

    async fn verify(&self, password: String, hash: String) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
    }
}
