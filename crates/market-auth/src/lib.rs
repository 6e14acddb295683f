//! # market-auth
//!
//! Authentication and authorization for the marketplace.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and the minimum-length policy
//! - `jwt`: HS256 token issuance and verification
//! - `guard`: per-route access declarations and the request guard
//! - `ownership`: seller/admin checks on product mutation
//! - `service`: registration and login

pub mod guard;
pub mod jwt;
pub mod ownership;
pub mod password;
pub mod service;

pub use guard::{AccessGuard, RouteAccess, RouteTable};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use ownership::ensure_can_mutate;
pub use password::{PasswordHasher, PasswordValidator};
pub use service::{AuthOutcome, AuthService};
