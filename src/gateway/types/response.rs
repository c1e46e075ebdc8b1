//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `ApiError` / `ApiResult<T>`: handler error path
//! - `error_codes`: Standard error code constants

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::email::MailError;
use crate::gateway::services::OrderError;
use crate::models::InvalidStatus;
use crate::store::{StockRejection, StoreError};
use crate::user_auth::AuthError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Plain acknowledgement payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageData {
    #[schema(example = "Marked as read")]
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error path
// ============================================================================

/// Error returned by handlers: HTTP status + API error code + message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// 200 with data
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// 201 with the created record
pub fn created<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER, msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::unauthorized_code(error_codes::AUTH_FAILED, msg)
    }

    pub fn unauthorized_code(code: i32, msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, code, msg)
    }

    pub fn not_found(code: i32, msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR, msg)
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, error_codes::SERVICE_UNAVAILABLE, msg)
    }

    pub fn into_err<T>(self) -> Result<T, ApiError> {
        Err(self)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.code, self.msg))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Rejected(rejection) => rejection.into(),
            other => {
                // Storage details stay in the log
                tracing::error!("Store failure: {}", other);
                ApiError::internal("Internal server error")
            }
        }
    }
}

impl From<StockRejection> for ApiError {
    fn from(rejection: StockRejection) -> Self {
        let code = match rejection {
            StockRejection::Unavailable { .. } => error_codes::PRODUCT_UNAVAILABLE,
            StockRejection::InsufficientStock { .. } => error_codes::INSUFFICIENT_STOCK,
        };
        ApiError::new(StatusCode::BAD_REQUEST, code, rejection.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            AuthError::TokenExpired => ApiError::unauthorized_code(error_codes::TOKEN_EXPIRED, "Token expired"),
            AuthError::InvalidToken => ApiError::unauthorized("Invalid token"),
            AuthError::Store(e) => e.into(),
            other => {
                tracing::error!("Auth failure: {}", other);
                ApiError::internal("Internal server error")
            }
        }
    }
}

impl From<InvalidStatus> for ApiError {
    fn from(e: InvalidStatus) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, error_codes::INVALID_STATUS, e.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        ApiError::bad_request(e.to_string())
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Invalid(errors) => errors.into(),
            OrderError::Rejected(rejection) => rejection.into(),
            OrderError::InvalidStatus(e) => e.into(),
            OrderError::NotFound => ApiError::not_found(error_codes::ORDER_NOT_FOUND, "Order not found"),
            OrderError::Store(e) => e.into(),
        }
    }
}

impl From<MailError> for ApiError {
    fn from(e: MailError) -> Self {
        let msg = match e {
            MailError::NotConfigured => "RESEND_API_KEY not configured".to_string(),
            other => format!("Failed to send email: {}", other),
        };
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, error_codes::EMAIL_FAILED, msg)
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const PRODUCT_UNAVAILABLE: i32 = 1002;
    pub const INSUFFICIENT_STOCK: i32 = 1003;
    pub const INVALID_STATUS: i32 = 1004;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;
    pub const TOKEN_EXPIRED: i32 = 2003;

    // Resource errors (4xxx)
    pub const PRODUCT_NOT_FOUND: i32 = 4001;
    pub const ORDER_NOT_FOUND: i32 = 4002;
    pub const MESSAGE_NOT_FOUND: i32 = 4003;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
    pub const EMAIL_FAILED: i32 = 5002;
}
