//! Store traits and their PostgreSQL implementations.
//!
//! Services only see the traits, so the backing store can be swapped for
//! the in-memory variants in [`crate::memory`].

pub mod product;
pub mod user;

use async_trait::async_trait;

use market_core::result::AppResult;
use market_core::types::{ProductId, UserId};
use market_entity::product::{Product, ProductFilter};
use market_entity::user::{CreateUser, User, UserSummary};

pub use product::ProductRepository;
pub use user::UserRepository;

/// Persistence of user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Fetch every user whose ID is in `ids`. Unknown IDs are skipped.
    async fn find_many(&self, ids: &[UserId]) -> AppResult<Vec<User>>;

    /// Insert a user. Fails with `Conflict` when the email is taken.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Every user, oldest first, projected without the password hash.
    async fn list_all(&self) -> AppResult<Vec<UserSummary>>;
}

/// Persistence of product listings.
#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
    /// Find a product by primary key.
    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>>;

    /// Products matching `filter`, oldest first.
    async fn find(&self, filter: &ProductFilter) -> AppResult<Vec<Product>>;

    /// Insert a product. Fails with `Conflict` when the SKU is taken.
    async fn create(&self, product: Product) -> AppResult<Product>;

    /// Overwrite the mutable fields of an existing product.
    ///
    /// Returns `None` when the product no longer exists. The seller column
    /// is never written.
    async fn update(&self, product: Product) -> AppResult<Option<Product>>;

    /// Remove a product, returning the removed record if it existed.
    async fn delete(&self, id: ProductId) -> AppResult<Option<Product>>;
}
