//! # market-service
//!
//! Business logic layer. Services receive their stores as `Arc<dyn _>`
//! at construction and take a [`RequestContext`] for every operation that
//! acts on behalf of a caller.

pub mod context;
pub mod product;
pub mod user;

pub use context::RequestContext;
pub use product::ProductService;
pub use user::UserService;
