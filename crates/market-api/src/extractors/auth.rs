//! Identity extractors. The access guard middleware verifies the token and
//! stores the resulting [`RequestContext`] in the request extensions; these
//! extractors only read it back.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use market_core::error::AppError;
use market_service::RequestContext;

use crate::error::ApiError;

/// Authenticated caller. Rejects with 401 when the guard attached no identity.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthenticated("Authentication required").into())
    }
}

/// Caller identity on routes that also admit anonymous requests.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<RequestContext>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(parts.extensions.get::<RequestContext>().cloned()))
    }
}
