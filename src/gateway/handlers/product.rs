use axum::{
    Extension,
    extract::{Path, State},
};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use super::PRODUCT_LIST_LIMIT;
use crate::gateway::{
    state::AppState,
    types::{ApiError, ApiJson, ApiResponse, ApiResult, MessageData, created, error_codes, ok},
};
use crate::models::{Product, ProductDraft, ProductUpdate};
use crate::user_auth::Claims;

fn product_not_found() -> ApiError {
    ApiError::not_found(error_codes::PRODUCT_NOT_FOUND, "Product not found")
}

/// List the catalog in creation order
#[utoipa::path(
    get,
    path = "/api/products",
    responses((status = 200, description = "Products", body = ApiResponse<Vec<Product>>)),
    tag = "Catalog"
)]
pub async fn list_products(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Product>> {
    ok(state.store.list_products(PRODUCT_LIST_LIMIT).await?)
}

/// The featured (first-created) product
#[utoipa::path(
    get,
    path = "/api/product",
    responses(
        (status = 200, description = "Featured product", body = ApiResponse<Product>),
        (status = 404, description = "Catalog is empty")
    ),
    tag = "Catalog"
)]
pub async fn get_featured_product(State(state): State<Arc<AppState>>) -> ApiResult<Product> {
    match state.store.first_product().await? {
        Some(product) => ok(product),
        None => product_not_found().into_err(),
    }
}

#[utoipa::path(
    get,
    path = "/api/product/{product_id}",
    params(("product_id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found")
    ),
    tag = "Catalog"
)]
pub async fn get_product(State(state): State<Arc<AppState>>, Path(product_id): Path<String>) -> ApiResult<Product> {
    match state.store.get_product(&product_id).await? {
        Some(product) => ok(product),
        None => product_not_found().into_err(),
    }
}

/// Create a product; omitted fields take the storefront defaults
#[utoipa::path(
    post,
    path = "/api/product",
    request_body = ProductDraft,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<Product>),
        (status = 400, description = "Invalid product"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    ApiJson(draft): ApiJson<ProductDraft>,
) -> ApiResult<Product> {
    draft.validate()?;
    let product = draft.into_product(Utc::now());
    state.store.insert_product(&product).await?;
    tracing::info!(product_id = %product.id, admin = %claims.sub, "Product created");
    created(product)
}

/// Partial update by id
#[utoipa::path(
    put,
    path = "/api/product/{product_id}",
    params(("product_id" = String, Path, description = "Product id")),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 400, description = "Invalid update"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(product_id): Path<String>,
    ApiJson(update): ApiJson<ProductUpdate>,
) -> ApiResult<Product> {
    update.validate()?;
    apply_update(&state, &product_id, &update, &claims).await
}

/// Partial update of the featured product
#[utoipa::path(
    put,
    path = "/api/product",
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 400, description = "Invalid update"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Catalog is empty")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_featured_product(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    ApiJson(update): ApiJson<ProductUpdate>,
) -> ApiResult<Product> {
    update.validate()?;
    let featured = state.store.first_product().await?.ok_or_else(product_not_found)?;
    apply_update(&state, &featured.id, &update, &claims).await
}

async fn apply_update(state: &AppState, product_id: &str, update: &ProductUpdate, claims: &Claims) -> ApiResult<Product> {
    match state.store.update_product(product_id, update, Utc::now()).await? {
        Some(product) => {
            tracing::info!(product_id = %product.id, admin = %claims.sub, "Product updated");
            ok(product)
        }
        None => product_not_found().into_err(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/product/{product_id}",
    params(("product_id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<MessageData>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(product_id): Path<String>,
) -> ApiResult<MessageData> {
    if !state.store.delete_product(&product_id).await? {
        return product_not_found().into_err();
    }
    tracing::info!(product_id = %product_id, admin = %claims.sub, "Product deleted");
    ok(MessageData::new("Product deleted successfully"))
}
