//! Process-local stores backed by `DashMap`.
//!
//! Uniqueness of emails and SKUs is enforced through a secondary index map
//! claimed with `entry()`, so two concurrent inserts of the same key cannot
//! both succeed. No code path holds a guard on one map while locking the
//! other.

pub mod product;
pub mod user;

pub use product::MemoryProductStore;
pub use user::MemoryUserStore;
