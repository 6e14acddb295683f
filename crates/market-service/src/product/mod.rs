//! Product listing operations.

pub mod service;

pub use service::ProductService;
