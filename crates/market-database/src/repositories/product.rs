//! PostgreSQL product repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use market_core::error::{AppError, ErrorKind};
use market_core::result::AppResult;
use market_core::types::ProductId;
use market_entity::product::{Product, ProductFilter};

use super::ProductStore;

/// Repository for product listings.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn write_error(e: sqlx::Error, sku: &str, action: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("products_sku_key") => {
            AppError::conflict(format!("SKU '{sku}' is already in use"))
        }
        _ => AppError::with_source(ErrorKind::Database, format!("Failed to {action} product"), e),
    }
}

/// Escape `%`, `_` and `\` so user text is matched literally by `ILIKE`.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn filtered_select(filter: &ProductFilter) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new("SELECT * FROM products WHERE TRUE");
    if let Some(seller) = filter.seller {
        qb.push(" AND seller_id = ").push_bind(seller);
    }
    if let Some(name) = &filter.name {
        qb.push(" AND name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name.trim())));
    }
    if let Some(sku) = &filter.sku {
        qb.push(" AND sku = ").push_bind(sku.trim());
    }
    if let Some(min) = filter.min_price {
        qb.push(" AND price >= ").push_bind(min);
    }
    if let Some(max) = filter.max_price {
        qb.push(" AND price <= ").push_bind(max);
    }
    qb.push(" ORDER BY created_at ASC");
    qb
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find product by id", e)
            })
    }

    async fn find(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let mut qb = filtered_select(filter);
        qb.build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list products", e))
    }

    async fn create(&self, product: Product) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products \
             (id, name, description, sku, quantity, price, category, image, seller_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.sku)
        .bind(product.quantity)
        .bind(product.price)
        .bind(&product.category)
        .bind(&product.image)
        .bind(product.seller)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, &product.sku, "create"))
    }

    async fn update(&self, product: Product) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET name = $2, description = $3, sku = $4, quantity = $5, \
                                 price = $6, category = $7, image = $8, updated_at = $9 \
             WHERE id = $1 RETURNING *",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.sku)
        .bind(product.quantity)
        .bind(product.price)
        .bind(&product.category)
        .bind(&product.image)
        .bind(product.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, &product.sku, "update"))
    }

    async fn delete(&self, id: ProductId) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("DELETE FROM products WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete product", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::types::UserId;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("lamp"), "lamp");
    }

    #[test]
    fn test_filtered_select_sql() {
        let filter = ProductFilter {
            seller: Some(UserId::new()),
            name: Some("lamp".to_string()),
            min_price: Some(1.0),
            ..Default::default()
        };
        let qb = filtered_select(&filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM products WHERE TRUE AND seller_id = $1 AND name ILIKE $2 \
             AND price >= $3 ORDER BY created_at ASC"
        );
    }

    #[test]
    fn test_unfiltered_select_sql() {
        let filter = ProductFilter::default();
        assert_eq!(
            filtered_select(&filter).sql(),
            "SELECT * FROM products WHERE TRUE ORDER BY created_at ASC"
        );
    }
}
