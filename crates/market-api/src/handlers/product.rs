//! Product handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::debug;

use market_entity::product::{Product, ProductView};

use crate::dto::request::{
    AdminProductQuery, CreateProductRequest, ProductSearchQuery, UpdateProductRequest,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, MaybeAuthUser, ValidatedJson, parse_product_id};
use crate::state::AppState;

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.product_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.product_service.list_for_actor(&auth).await?;
    Ok(Json(products))
}

/// GET /api/products/admin
pub async fn admin_list_products(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AdminProductQuery>,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    let views = state
        .product_service
        .admin_list(&auth, query.into())
        .await?;
    Ok(Json(views))
}

/// GET /api/products/search
pub async fn search_products(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Query(query): Query<ProductSearchQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.product_service.search(query.into()).await?;
    debug!(
        viewer = ?viewer.map(|v| v.user_id),
        results = products.len(),
        "Product search"
    );
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>, ApiError> {
    let view = state.product_service.get(parse_product_id(&id)?).await?;
    Ok(Json(view))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .product_service
        .update(&auth, parse_product_id(&id)?, req.into())
        .await?;
    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let removed = state
        .product_service
        .delete(&auth, parse_product_id(&id)?)
        .await?;
    Ok(Json(removed))
}
