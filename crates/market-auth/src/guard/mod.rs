//! Request guard: bearer token authentication plus per-route authorization.

pub mod access;
pub mod route_table;

pub use access::{AccessGuard, authorize};
pub use route_table::{RouteAccess, RouteTable};
