//! Unified application error types for the marketplace backend.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The HTTP layer maps each
//! [`ErrorKind`] to a status code; nothing below it knows about HTTP.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Input validation failed (malformed email, missing field, ...).
    Validation,
    /// Registration attempted with an email that already has an account.
    AlreadyRegistered,
    /// Registration password and its confirmation differ.
    PasswordMismatch,
    /// Registration password does not meet the minimum policy.
    WeakPassword,
    /// Login failed. Used for both unknown email and wrong password.
    InvalidCredentials,
    /// No usable identity on a route that requires one.
    Unauthenticated,
    /// A bearer token failed signature, format, or expiry checks.
    InvalidToken,
    /// Authenticated, but the role is not allowed on this route.
    Forbidden,
    /// Authenticated, but the acting identity does not own the resource.
    NotOwner,
    /// The requested resource was not found.
    NotFound,
    /// A unique constraint was violated (duplicate key).
    Conflict,
    /// A database error occurred.
    Database,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A configuration error occurred. Fatal at startup.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind belongs to the forbidden class.
    ///
    /// `NotOwner` and `Forbidden` are reported identically to clients.
    pub fn is_forbidden_class(&self) -> bool {
        matches!(self, Self::Forbidden | Self::NotOwner)
    }

    /// Whether this kind means the caller has no valid identity.
    pub fn is_unauthenticated_class(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::InvalidToken)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::AlreadyRegistered => write!(f, "ALREADY_REGISTERED"),
            Self::PasswordMismatch => write!(f, "PASSWORD_MISMATCH"),
            Self::WeakPassword => write!(f, "WEAK_PASSWORD"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::InvalidToken => write!(f, "INVALID_TOKEN"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::NotOwner => write!(f, "NOT_OWNER"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout the marketplace backend.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an already-registered error.
    pub fn already_registered() -> Self {
        Self::new(ErrorKind::AlreadyRegistered, "User is already registered")
    }

    /// Create a password-mismatch error.
    pub fn password_mismatch() -> Self {
        Self::new(
            ErrorKind::PasswordMismatch,
            "Password confirmation does not match",
        )
    }

    /// Create a weak-password error.
    pub fn weak_password(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WeakPassword, message)
    }

    /// Create an invalid-credentials error.
    ///
    /// The message is fixed so that "unknown email" and "wrong password"
    /// cannot be told apart.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid email or password")
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create an invalid-token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidToken, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a not-owner error.
    pub fn not_owner(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotOwner, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a conflict (duplicate key) error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
