//! Product entity model and its write-side value objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use market_core::error::AppError;
use market_core::result::AppResult;
use market_core::types::{ProductId, UserId};

use crate::user::User;

/// A product listing owned by a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Stock keeping unit. Unique across the marketplace.
    pub sku: String,
    /// Units in stock.
    pub quantity: i32,
    /// Unit price.
    pub price: f64,
    /// Category label.
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Owning seller. Set at creation, never changed afterwards.
    #[sqlx(rename = "seller_id")]
    #[serde(rename = "sellerId")]
    pub seller: UserId,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Check whether the given user owns this product.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.seller == user_id
    }
}

/// Data required to create a product. The seller comes from the caller's
/// identity, never from the request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Stock keeping unit.
    pub sku: String,
    /// Units in stock.
    pub quantity: i32,
    /// Unit price.
    pub price: f64,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
}

impl NewProduct {
    /// Checks field-level invariants.
    pub fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        require_text("sku", &self.sku)?;
        check_quantity(self.quantity)?;
        check_price(self.price)
    }

    /// Builds the stored record for `seller`.
    pub fn into_product(self, seller: UserId) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId::new(),
            name: self.name.trim().to_string(),
            description: self.description,
            sku: self.sku.trim().to_string(),
            quantity: self.quantity,
            price: self.price,
            category: self.category,
            image: self.image,
            seller,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a product. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProduct {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New SKU.
    pub sku: Option<String>,
    /// New quantity.
    pub quantity: Option<i32>,
    /// New price.
    pub price: Option<f64>,
    /// New category.
    pub category: Option<String>,
    /// New image URL.
    pub image: Option<String>,
}

impl UpdateProduct {
    /// Checks the invariants of the fields that are present.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(sku) = &self.sku {
            require_text("sku", sku)?;
        }
        if let Some(quantity) = self.quantity {
            check_quantity(quantity)?;
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        Ok(())
    }

    /// Applies the present fields to `product`. The seller is not touched.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(sku) = self.sku {
            product.sku = sku.trim().to_string();
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        product.updated_at = Utc::now();
    }
}

/// The owning seller as shown next to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerSummary {
    /// Seller user ID.
    pub id: UserId,
    /// Seller email.
    pub email: String,
}

impl From<&User> for SellerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

/// A product composed with its resolved seller.
///
/// `seller` is `None` when the owning account no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    /// The product itself.
    #[serde(flatten)]
    pub product: Product,
    /// The resolved owner.
    pub seller: Option<SellerSummary>,
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("Product {field} is required")));
    }
    Ok(())
}

fn check_quantity(quantity: i32) -> AppResult<()> {
    if quantity < 0 {
        return Err(AppError::validation("Product quantity cannot be negative"));
    }
    Ok(())
}

fn check_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation(
            "Product price must be a non-negative number",
        ));
    }
    Ok(())
}
