//! Product domain entities.

pub mod filter;
pub mod model;

pub use filter::ProductFilter;
pub use model::{NewProduct, Product, ProductView, SellerSummary, UpdateProduct};
