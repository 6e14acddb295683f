//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use market_auth::AuthOutcome;
use market_entity::user::UserSummary;

/// Body returned by register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token.
    pub token: String,
    /// When `token` stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// The signed-in account.
    pub user: UserSummary,
}

impl From<AuthOutcome> for AuthResponse {
    fn from(outcome: AuthOutcome) -> Self {
        Self {
            expires_at: outcome.claims.expires_at(),
            token: outcome.token,
            user: outcome.user,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the process is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
}
