//! JWT token creation.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use market_core::config::AuthConfig;
use market_core::error::AppError;
use market_core::result::AppResult;
use market_entity::user::User;

use super::claims::Claims;

/// Upper bound on the configured token lifetime (one year).
const MAX_TTL_MINUTES: u64 = 60 * 24 * 365;

/// Signs HS256 session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates an encoder. Fails when no signing secret is configured.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let secret = config.signing_secret()?;
        let minutes = config.jwt_ttl_minutes.min(MAX_TTL_MINUTES) as i64;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(minutes),
        })
    }

    /// Builds fresh claims for `user`, valid for the configured TTL.
    pub fn claims_for(&self, user: &User) -> Claims {
        let now = Utc::now();
        Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        }
    }

    /// Signs `claims` as-is.
    pub fn issue(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
