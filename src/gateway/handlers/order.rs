use axum::{
    Extension,
    extract::{Path, State},
};
use std::sync::Arc;

use super::ORDER_LIST_LIMIT;
use crate::gateway::{
    services::OrderService,
    state::AppState,
    types::{ApiError, ApiJson, ApiResponse, ApiResult, created, error_codes, ok},
};
use crate::models::{NewOrder, Order, OrderStatusUpdate};
use crate::user_auth::Claims;

/// Place an order
///
/// POST /api/orders
///
/// Stock for every line item is checked and decremented atomically; any
/// unavailable or understocked item rejects the whole order.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = NewOrder,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<Order>),
        (status = 400, description = "Invalid order, product unavailable or insufficient stock"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Orders"
)]
pub async fn create_order(State(state): State<Arc<AppState>>, ApiJson(req): ApiJson<NewOrder>) -> ApiResult<Order> {
    let service = OrderService::new(state.store.as_ref(), state.mailer.as_deref());
    let order = service.place(req).await?;
    created(order)
}

/// All orders, newest first
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Orders", body = ApiResponse<Vec<Order>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Order>> {
    ok(state.store.list_orders(ORDER_LIST_LIMIT).await?)
}

/// Single order (used by the confirmation page, so public)
#[utoipa::path(
    get,
    path = "/api/orders/{order_id}",
    params(("order_id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order", body = ApiResponse<Order>),
        (status = 404, description = "Order not found")
    ),
    tag = "Orders"
)]
pub async fn get_order(State(state): State<Arc<AppState>>, Path(order_id): Path<String>) -> ApiResult<Order> {
    match state.store.get_order(&order_id).await? {
        Some(order) => ok(order),
        None => ApiError::not_found(error_codes::ORDER_NOT_FOUND, "Order not found").into_err(),
    }
}

#[utoipa::path(
    put,
    path = "/api/orders/{order_id}/status",
    params(("order_id" = String, Path, description = "Order id")),
    request_body = OrderStatusUpdate,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse<Order>),
        (status = 400, description = "Invalid status"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(order_id): Path<String>,
    ApiJson(req): ApiJson<OrderStatusUpdate>,
) -> ApiResult<Order> {
    let service = OrderService::new(state.store.as_ref(), state.mailer.as_deref());
    match service.update_status(&order_id, &req.status).await {
        Ok(order) => ok(order),
        Err(e) => {
            tracing::warn!(order_id = %order_id, admin = %claims.sub, "Status update rejected: {}", e);
            Err(e.into())
        }
    }
}
