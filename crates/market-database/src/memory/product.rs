//! In-memory product store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use market_core::error::AppError;
use market_core::result::AppResult;
use market_core::types::ProductId;
use market_entity::product::{Product, ProductFilter};

use crate::repositories::ProductStore;

/// Product store kept entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryProductStore {
    products: Arc<DashMap<ProductId, Product>>,
    skus: Arc<DashMap<String, ProductId>>,
}

impl MemoryProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the store holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn claim_sku(&self, sku: &str, id: ProductId) -> AppResult<()> {
        match self.skus.entry(sku.to_string()) {
            Entry::Occupied(owner) if *owner.get() != id => Err(AppError::conflict(format!(
                "SKU '{sku}' is already in use"
            ))),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
        }
    }

    fn release_sku(&self, sku: &str, id: ProductId) {
        self.skus.remove_if(sku, |_, owner| *owner == id);
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        Ok(self.products.get(&id).map(|p| p.value().clone()))
    }

    async fn find(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| filter.matches(p.value()))
            .map(|p| p.value().clone())
            .collect();
        products.sort_by_key(|p| p.created_at);
        Ok(products)
    }

    async fn create(&self, product: Product) -> AppResult<Product> {
        self.claim_sku(&product.sku, product.id)?;
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, mut product: Product) -> AppResult<Option<Product>> {
        let Some(current) = self.products.get(&product.id).map(|p| p.value().clone()) else {
            return Ok(None);
        };

        let sku_changed = current.sku != product.sku;
        if sku_changed {
            self.claim_sku(&product.sku, product.id)?;
        }

        product.seller = current.seller;
        product.created_at = current.created_at;

        let stored = match self.products.get_mut(&product.id) {
            Some(mut slot) => {
                *slot = product.clone();
                true
            }
            None => false,
        };
        if !stored {
            if sku_changed {
                self.release_sku(&product.sku, product.id);
            }
            return Ok(None);
        }

        if sku_changed {
            self.release_sku(&current.sku, product.id);
        }
        Ok(Some(product))
    }

    async fn delete(&self, id: ProductId) -> AppResult<Option<Product>> {
        let Some((_, removed)) = self.products.remove(&id) else {
            return Ok(None);
        };
        self.release_sku(&removed.sku, id);
        Ok(Some(removed))
    }
}
