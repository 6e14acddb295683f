//! Auth handlers: register and login.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::AuthResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let outcome = state
        .auth_service
        .register(&req.email, &req.password, &req.password_confirmation)
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::from(outcome))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let outcome = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(AuthResponse::from(outcome)))
}
