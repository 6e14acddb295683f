//! The access guard applied to every request.

use std::sync::Arc;

use tracing::debug;

use market_core::error::AppError;
use market_core::result::AppResult;

use super::route_table::{RouteAccess, RouteTable, UNDECLARED};
use crate::jwt::{Claims, JwtDecoder};

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticates the bearer token of a request and enforces the declared
/// access of the route it matched.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    decoder: Arc<JwtDecoder>,
    routes: Arc<RouteTable>,
}

impl AccessGuard {
    /// Creates a guard over a finished route table.
    pub fn new(decoder: Arc<JwtDecoder>, routes: RouteTable) -> Self {
        Self {
            decoder,
            routes: Arc::new(routes),
        }
    }

    /// Resolves the caller's identity from the raw `Authorization` header.
    ///
    /// No header means anonymous. A header that is not a bearer token, or a
    /// token that fails verification, is rejected outright.
    pub fn identify(&self, authorization: Option<&str>) -> AppResult<Option<Claims>> {
        let Some(header) = authorization else {
            return Ok(None);
        };

        let token = header
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthenticated("Malformed Authorization header"))?;

        self.decoder.verify(token).map(Some)
    }

    /// Runs both stages for one request.
    ///
    /// `matched_path` is the router's path template, or `None` when no route
    /// matched; both unknown cases fall back to `Authenticated`.
    pub fn check(
        &self,
        method: &str,
        matched_path: Option<&str>,
        authorization: Option<&str>,
    ) -> AppResult<Option<Claims>> {
        let identity = self.identify(authorization)?;
        let access = match matched_path {
            Some(path) => self.routes.access_for(method, path),
            None => &UNDECLARED,
        };

        authorize(access, identity.as_ref()).inspect_err(|e| {
            debug!(
                method,
                path = matched_path.unwrap_or("<unmatched>"),
                error = %e.kind,
                "Request denied by access guard"
            );
        })?;

        Ok(identity)
    }
}

/// Decides whether `identity` satisfies `access`.
pub fn authorize(access: &RouteAccess, identity: Option<&Claims>) -> AppResult<()> {
    match (access, identity) {
        (RouteAccess::Public, _) => Ok(()),
        (_, None) => Err(AppError::unauthenticated("Authentication required")),
        (RouteAccess::Authenticated, Some(_)) => Ok(()),
        (RouteAccess::Roles(roles), Some(claims)) => {
            if roles.contains(&claims.role) {
                Ok(())
            } else {
                Err(AppError::forbidden(format!(
                    "Role '{}' may not access this resource",
                    claims.role
                )))
            }
        }
    }
}
