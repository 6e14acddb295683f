//! Core type definitions used across the marketplace workspace.

pub mod id;

pub use id::*;
