//! Gateway types module
//!
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`ApiError`] / [`ApiResult`]: Handler error path and its conversions
//! - [`ApiJson`]: JSON body extractor with enveloped rejections
//! - [`error_codes`]: Numeric error codes carried in the envelope

pub mod extract;
pub mod response;

pub use extract::ApiJson;
pub use response::{ApiError, ApiResponse, ApiResult, MessageData, created, error_codes, ok};
