//! User handlers.

use axum::Json;
use axum::extract::State;

use market_entity::user::UserSummary;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserSummary>, ApiError> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(user))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = state.user_service.list_all(&auth).await?;
    Ok(Json(users))
}
