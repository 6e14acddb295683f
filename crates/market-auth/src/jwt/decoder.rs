//! JWT token verification.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use market_core::config::AuthConfig;
use market_core::error::AppError;
use market_core::result::AppResult;

use super::claims::Claims;

/// Verifies HS256 session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a decoder. Fails when no signing secret is configured.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let secret = config.signing_secret()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.jwt_leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Checks signature, structure and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::invalid_token("Token has expired"),
                JwtErrorKind::InvalidSignature => {
                    AppError::invalid_token("Invalid token signature")
                }
                JwtErrorKind::InvalidToken | JwtErrorKind::Base64(_) | JwtErrorKind::Json(_) => {
                    AppError::invalid_token("Malformed token")
                }
                _ => AppError::invalid_token(format!("Token validation failed: {e}")),
            })
    }
}
