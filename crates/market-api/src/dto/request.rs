//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use market_core::types::UserId;
use market_entity::product::{NewProduct, ProductFilter, UpdateProduct};

/// Registration body.
///
/// Only the email format is checked here; password rules are enforced by
/// the auth service so their errors keep their own codes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login email.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Password.
    pub password: String,
    /// Must equal `password`.
    pub password_confirmation: String,
}

/// Login body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    pub password: String,
}

/// Create product body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Description.
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    /// Stock keeping unit.
    #[validate(length(min = 1, max = 100))]
    pub sku: String,
    /// Units in stock.
    #[validate(range(min = 0))]
    pub quantity: i32,
    /// Unit price.
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Category label.
    #[serde(default)]
    #[validate(length(max = 100))]
    pub category: String,
    /// Image URL.
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub image: String,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            sku: req.sku,
            quantity: req.quantity,
            price: req.price,
            category: req.category,
            image: req.image,
        }
    }
}

/// Partial product update. Any seller field in the body is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    /// New name.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// New description.
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    /// New SKU.
    #[validate(length(min = 1, max = 100))]
    pub sku: Option<String>,
    /// New quantity.
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    /// New price.
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    /// New category.
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// New image URL.
    #[validate(length(max = 2048))]
    pub image: Option<String>,
}

impl From<UpdateProductRequest> for UpdateProduct {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            sku: req.sku,
            quantity: req.quantity,
            price: req.price,
            category: req.category,
            image: req.image,
        }
    }
}

/// Query string of `GET /api/products/admin`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProductQuery {
    /// Restrict to one seller.
    pub seller_id: Option<UserId>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl From<AdminProductQuery> for ProductFilter {
    fn from(q: AdminProductQuery) -> Self {
        Self {
            seller: q.seller_id,
            min_price: q.min_price,
            max_price: q.max_price,
            ..Self::default()
        }
    }
}

/// Query string of `GET /api/products/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchQuery {
    /// Case-insensitive name fragment.
    pub name: Option<String>,
    /// Exact SKU.
    pub sku: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl From<ProductSearchQuery> for ProductFilter {
    fn from(q: ProductSearchQuery) -> Self {
        Self {
            name: q.name,
            sku: q.sku,
            min_price: q.min_price,
            max_price: q.max_price,
            ..Self::default()
        }
    }
}
