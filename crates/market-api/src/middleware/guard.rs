//! Access guard middleware. Applied with `route_layer`, so it only runs for
//! requests that matched a route and can read the route's path template.

use axum::extract::{MatchedPath, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use market_core::error::AppError;
use market_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Verifies the bearer token, enforces the route's declared access and
/// attaches the caller's [`RequestContext`] for the handler.
pub async fn access_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| AppError::unauthenticated("Malformed Authorization header"))
        })
        .transpose()?;

    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned());

    let identity = state.access_guard.check(
        request.method().as_str(),
        matched_path.as_deref(),
        authorization,
    )?;

    if let Some(claims) = identity {
        request
            .extensions_mut()
            .insert(RequestContext::from(claims));
    }

    Ok(next.run(request).await)
}
