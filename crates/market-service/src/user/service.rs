//! Profile lookup and the admin user listing.

use std::sync::Arc;

use tracing::debug;

use market_core::error::AppError;
use market_core::result::AppResult;
use market_database::repositories::UserStore;
use market_entity::user::UserSummary;

use crate::context::RequestContext;

/// Read-only user operations.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// The caller's own account.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<UserSummary> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .map(UserSummary::from)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Every account, without password hashes. Admin only.
    pub async fn list_all(&self, ctx: &RequestContext) -> AppResult<Vec<UserSummary>> {
        ctx.require_admin()?;
        let users = self.users.list_all().await?;
        debug!(count = users.len(), "Listed users");
        Ok(users)
    }
}
