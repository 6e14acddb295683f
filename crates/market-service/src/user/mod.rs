//! User account queries.

pub mod service;

pub use service::UserService;
