//! Root banner and health check

use std::sync::Arc;

use axum::extract::State;
use chrono::Utc;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResponse, ApiResult, ok};

#[derive(serde::Serialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "MOOKI STORE API")]
    pub message: String,
    /// Build commit
    pub git_hash: String,
}

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_i64)]
    pub timestamp_ms: i64,
    /// Active storage backend
    #[schema(example = "postgres")]
    pub store: String,
}

/// API banner
#[utoipa::path(
    get,
    path = "/api/",
    responses((status = 200, description = "API banner", body = ApiResponse<RootResponse>)),
    tag = "System"
)]
pub async fn root() -> ApiResult<RootResponse> {
    ok(RootResponse {
        message: "MOOKI STORE API".to_string(),
        git_hash: env!("GIT_HASH").to_string(),
    })
}

/// Health check endpoint
///
/// Pings the store. Internal details are logged, never returned.
///
/// - Healthy: 200 OK + {code: 0, data: {timestamp_ms, store}}
/// - Unhealthy: 503 Service Unavailable
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service healthy", body = ApiResponse<HealthResponse>),
        (status = 503, description = "Service unavailable")
    ),
    tag = "System"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    if let Err(e) = state.store.health_check().await {
        tracing::error!("[HEALTH] {} store check failed: {}", state.store.name(), e);
        return ApiError::service_unavailable("unavailable").into_err();
    }
    ok(HealthResponse {
        timestamp_ms: Utc::now().timestamp_millis(),
        store: state.store.name().to_string(),
    })
}
