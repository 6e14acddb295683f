//! # market-entity
//!
//! Domain entity models for the marketplace. Every struct in this crate
//! represents a database row or a domain value object. Database entities
//! additionally derive `sqlx::FromRow`.

pub mod product;
pub mod user;
