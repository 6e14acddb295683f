//! Product listing filters.

use serde::{Deserialize, Serialize};

use market_core::types::UserId;

use super::model::Product;

/// Conjunctive filter over products. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Restrict to one seller.
    pub seller: Option<UserId>,
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Exact SKU.
    pub sku: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// Filter that only matches products owned by `seller`.
    pub fn by_seller(seller: UserId) -> Self {
        Self {
            seller: Some(seller),
            ..Self::default()
        }
    }

    /// Blank text criteria are treated as absent.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.filter(|n| !n.trim().is_empty());
        self.sku = self.sku.filter(|s| !s.trim().is_empty());
        self
    }

    /// Whether `product` satisfies every set criterion.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(seller) = self.seller {
            if product.seller != seller {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if !product
                .name
                .to_lowercase()
                .contains(&name.trim().to_lowercase())
            {
                return false;
            }
        }
        if let Some(sku) = &self.sku {
            if product.sku != sku.trim() {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        true
    }
}
