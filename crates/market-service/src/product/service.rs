//! Product operations with ownership enforcement.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use market_auth::ensure_can_mutate;
use market_core::error::AppError;
use market_core::result::AppResult;
use market_core::types::{ProductId, UserId};
use market_database::repositories::{ProductStore, UserStore};
use market_entity::product::{
    NewProduct, Product, ProductFilter, ProductView, SellerSummary, UpdateProduct,
};
use market_entity::user::UserRole;

use crate::context::RequestContext;

/// Roles allowed to create, update or delete products.
const WRITER_ROLES: &[UserRole] = &[UserRole::Seller, UserRole::Admin];

/// Handles product listings.
///
/// Mutations check ownership against the stored record; the seller of a
/// product is always the identity that created it.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductStore>,
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductService").finish_non_exhaustive()
    }
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(products: Arc<dyn ProductStore>, users: Arc<dyn UserStore>) -> Self {
        Self { products, users }
    }

    /// Creates a listing owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, data: NewProduct) -> AppResult<Product> {
        ctx.require_any(WRITER_ROLES)?;
        data.validate()?;

        let product = self.products.create(data.into_product(ctx.user_id)).await?;
        info!(
            product_id = %product.id,
            user_id = %ctx.user_id,
            sku = %product.sku,
            "Product created"
        );
        Ok(product)
    }

    /// Everything for an admin, otherwise the caller's own listings.
    pub async fn list_for_actor(&self, ctx: &RequestContext) -> AppResult<Vec<Product>> {
        let filter = if ctx.is_admin() {
            ProductFilter::default()
        } else {
            ProductFilter::by_seller(ctx.user_id)
        };
        self.products.find(&filter).await
    }

    /// Filtered listing with resolved sellers. Admin only.
    pub async fn admin_list(
        &self,
        ctx: &RequestContext,
        filter: ProductFilter,
    ) -> AppResult<Vec<ProductView>> {
        ctx.require_admin()?;
        let products = self.products.find(&filter.normalized()).await?;
        self.with_sellers(products).await
    }

    /// Public search by name, SKU and price range.
    pub async fn search(&self, filter: ProductFilter) -> AppResult<Vec<Product>> {
        self.products.find(&filter.normalized()).await
    }

    /// A single product with its seller.
    pub async fn get(&self, id: ProductId) -> AppResult<ProductView> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;

        let seller = self
            .users
            .find_by_id(product.seller)
            .await?
            .map(|u| SellerSummary::from(&u));

        Ok(ProductView { product, seller })
    }

    /// Applies `changes` to a product the caller may modify.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: ProductId,
        changes: UpdateProduct,
    ) -> AppResult<Product> {
        ctx.require_any(WRITER_ROLES)?;

        let current = self.products.find_by_id(id).await?;
        let mut product = ensure_can_mutate(ctx.user_id, ctx.role, id, current)?;
        changes.validate()?;
        changes.apply_to(&mut product);

        let updated = self
            .products
            .update(product)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;

        info!(product_id = %id, user_id = %ctx.user_id, "Product updated");
        Ok(updated)
    }

    /// Deletes a product the caller may modify, returning the removed record.
    pub async fn delete(&self, ctx: &RequestContext, id: ProductId) -> AppResult<Product> {
        ctx.require_any(WRITER_ROLES)?;

        let current = self.products.find_by_id(id).await?;
        ensure_can_mutate(ctx.user_id, ctx.role, id, current)?;

        let removed = self
            .products
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;

        info!(product_id = %id, user_id = %ctx.user_id, "Product deleted");
        Ok(removed)
    }

    async fn with_sellers(&self, products: Vec<Product>) -> AppResult<Vec<ProductView>> {
        let mut ids: Vec<UserId> = products.iter().map(|p| p.seller).collect();
        ids.sort_by_key(|id| id.into_uuid());
        ids.dedup();

        let sellers: HashMap<UserId, SellerSummary> = self
            .users
            .find_many(&ids)
            .await?
            .iter()
            .map(|u| (u.id, SellerSummary::from(u)))
            .collect();

        Ok(products
            .into_iter()
            .map(|product| {
                let seller = sellers.get(&product.seller).cloned();
                ProductView { product, seller }
            })
            .collect())
    }
}
