//! # market-database
//!
//! Store traits for users and products, the PostgreSQL repositories that
//! implement them, and process-local in-memory stores.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::{MemoryProductStore, MemoryUserStore};
pub use repositories::{ProductRepository, ProductStore, UserRepository, UserStore};
