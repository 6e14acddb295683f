//! Request context carrying the authenticated identity.

use serde::{Deserialize, Serialize};

use market_auth::Claims;
use market_core::error::AppError;
use market_core::result::AppResult;
use market_core::types::UserId;
use market_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built from verified token claims and passed into service methods so that
/// every operation knows who is acting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// Email from the token.
    pub email: String,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id,
            email: email.into(),
            role,
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Fails with `Forbidden` unless the caller is an admin.
    pub fn require_admin(&self) -> AppResult<()> {
        self.require_any(&[UserRole::Admin])
    }

    /// Fails with `Forbidden` unless the caller holds one of `roles`.
    pub fn require_any(&self, roles: &[UserRole]) -> AppResult<()> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{}' may not perform this action",
                self.role
            )))
        }
    }
}

impl From<Claims> for RequestContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}
