//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use market_core::error::{AppError, ErrorKind};

/// Shown for every authorization failure, whether the route or the
/// resource owner refused the caller.
const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action";

/// Shown instead of the real message for server-side failures.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details, such as per-field validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// An `AppError` on its way out of a handler.
#[derive(Debug)]
pub struct ApiError {
    /// The domain error.
    pub error: AppError,
    /// Extra structured information for the response body.
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Attaches `details` to the response body.
    pub fn with_details(error: AppError, details: serde_json::Value) -> Self {
        Self {
            error,
            details: Some(details),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            details: None,
        }
    }
}

/// Status and error code for a kind.
pub fn status_and_code(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::AlreadyRegistered => (StatusCode::BAD_REQUEST, "ALREADY_REGISTERED"),
        ErrorKind::PasswordMismatch => (StatusCode::BAD_REQUEST, "PASSWORD_MISMATCH"),
        ErrorKind::WeakPassword => (StatusCode::BAD_REQUEST, "WEAK_PASSWORD"),
        ErrorKind::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
        ErrorKind::Unauthenticated | ErrorKind::InvalidToken => {
            (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED")
        }
        ErrorKind::Forbidden | ErrorKind::NotOwner => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Database
        | ErrorKind::Serialization
        | ErrorKind::Configuration
        | ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.error.kind;
        let (status, code) = status_and_code(kind);

        let message = if kind.is_forbidden_class() {
            FORBIDDEN_MESSAGE.to_string()
        } else if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.error, source = ?self.error.source, "Internal server error");
            INTERNAL_MESSAGE.to_string()
        } else {
            self.error.message
        };

        let body = ApiErrorResponse {
            error: code.to_string(),
            message,
            details: self.details,
        };

        (status, Json(body)).into_response()
    }
}
