//! Typed path parameter helpers.

use market_core::error::AppError;
use market_core::types::ProductId;

/// Parses a product ID from a path segment.
///
/// A segment that is not a UUID cannot name an existing product, so it is
/// reported as not found.
pub fn parse_product_id(s: &str) -> Result<ProductId, AppError> {
    s.parse::<ProductId>()
        .map_err(|_| AppError::not_found(format!("Product {s} not found")))
}
