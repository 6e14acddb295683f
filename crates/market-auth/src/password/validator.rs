//! Password policy for new accounts.

use market_core::config::AuthConfig;
use market_core::error::AppError;
use market_core::result::AppResult;

/// Enforces the minimum password length.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Length is counted in characters, not bytes.
    pub fn validate(&self, password: &str) -> AppResult<()> {
        if password.chars().count() < self.min_length {
            return Err(AppError::weak_password(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }
}
