//! # market-api
//!
//! HTTP API layer for the marketplace built on Axum.
//!
//! Provides the REST endpoints, the access guard middleware, CORS and
//! request logging layers, extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
