//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Required; there is no default.
    #[serde(default, skip_serializing)]
    pub jwt_secret: Option<String>,
    /// Token TTL in minutes.
    #[serde(default = "default_ttl")]
    pub jwt_ttl_minutes: u64,
    /// Clock-skew leeway applied to the expiry check, in seconds.
    #[serde(default)]
    pub jwt_leeway_seconds: u64,
    /// Minimum password length, in characters.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
    /// Argon2 degree of parallelism.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
}

impl AuthConfig {
    /// Returns the signing secret, or a configuration error when it is
    /// missing or blank.
    pub fn signing_secret(&self) -> Result<&str, AppError> {
        match self.jwt_secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => Ok(secret),
            _ => Err(AppError::configuration(
                "JWT signing secret is not configured (set JWT_SECRET or auth.jwt_secret)",
            )),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_ttl_minutes: default_ttl(),
            jwt_leeway_seconds: 0,
            password_min_length: default_password_min(),
            hash_memory_kib: default_hash_memory(),
            hash_iterations: default_hash_iterations(),
            hash_parallelism: default_hash_parallelism(),
        }
    }
}

fn default_ttl() -> u64 {
    60
}

fn default_password_min() -> usize {
    8
}

fn default_hash_memory() -> u32 {
    19 * 1024
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_hash_parallelism() -> u32 {
    1
}
