use axum::{Extension, extract::State};
use std::sync::Arc;

use super::service::{Claims, LoginRequest, TokenResponse, VerifyResponse};
use crate::gateway::{
    state::AppState,
    types::{ApiJson, ApiResponse, ApiResult, ok},
};

/// Admin login
///
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(State(state): State<Arc<AppState>>, ApiJson(req): ApiJson<LoginRequest>) -> ApiResult<TokenResponse> {
    let username = req.username.clone();
    match state.auth.login(req).await {
        Ok(resp) => {
            tracing::info!(username = %username, "Admin logged in");
            ok(resp)
        }
        Err(e) => {
            tracing::warn!(username = %username, "Login failed: {}", e);
            Err(e.into())
        }
    }
}

/// Verify the presented admin token
///
/// GET /api/auth/verify
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Token valid", body = ApiResponse<VerifyResponse>),
        (status = 401, description = "Missing, invalid or expired token")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn verify(Extension(claims): Extension<Claims>) -> ApiResult<VerifyResponse> {
    ok(VerifyResponse {
        valid: true,
        username: claims.sub,
    })
}
