//! Ownership checks on product mutation.

use market_core::error::AppError;
use market_core::result::AppResult;
use market_core::types::{ProductId, UserId};
use market_entity::product::Product;
use market_entity::user::UserRole;

/// Admits an update or delete of `product` by the given actor.
///
/// A missing product is `NotFound` regardless of who asks. Otherwise the
/// actor must be the product's seller, unless they are an admin.
pub fn ensure_can_mutate(
    actor: UserId,
    role: UserRole,
    id: ProductId,
    product: Option<Product>,
) -> AppResult<Product> {
    let product = product.ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;

    if role.is_admin() || product.is_owned_by(actor) {
        Ok(product)
    } else {
        Err(AppError::not_owner(
            "Only the seller of this product may modify it",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::error::ErrorKind;
    use market_entity::product::NewProduct;

    fn listing(seller: UserId) -> Product {
        NewProduct {
            name: "Chair".to_string(),
            description: String::new(),
            sku: "CH-1".to_string(),
            quantity: 2,
            price: 40.0,
            category: String::new(),
            image: String::new(),
        }
        .into_product(seller)
    }

    #[test]
    fn test_owner_may_mutate() {
        let a = UserId::new();
        let product = listing(a);
        let id = product.id;
        assert!(ensure_can_mutate(a, UserRole::Seller, id, Some(product)).is_ok());
    }

    #[test]
    fn test_other_seller_is_not_owner() {
        let product = listing(UserId::new());
        let id = product.id;
        let err = ensure_can_mutate(UserId::new(), UserRole::Seller, id, Some(product))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotOwner);
    }

    #[test]
    fn test_admin_bypasses_ownership() {
        let product = listing(UserId::new());
        let id = product.id;
        assert!(ensure_can_mutate(UserId::new(), UserRole::Admin, id, Some(product)).is_ok());
    }

    #[test]
    fn test_missing_product_is_not_found_before_ownership() {
        let err = ensure_can_mutate(UserId::new(), UserRole::Seller, ProductId::new(), None)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
