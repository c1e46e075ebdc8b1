use axum::{
    Extension,
    extract::{Path, State},
};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use super::MESSAGE_LIST_LIMIT;
use crate::gateway::{
    state::AppState,
    types::{ApiError, ApiJson, ApiResponse, ApiResult, MessageData, created, error_codes, ok},
};
use crate::models::{ContactMessage, NewContactMessage};
use crate::user_auth::Claims;

/// Leave a message for the shop
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = NewContactMessage,
    responses(
        (status = 201, description = "Message stored", body = ApiResponse<ContactMessage>),
        (status = 400, description = "Invalid message")
    ),
    tag = "Contact"
)]
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewContactMessage>,
) -> ApiResult<ContactMessage> {
    req.validate()?;
    let message = req.into_message(Utc::now());
    state.store.insert_message(&message).await?;
    tracing::info!(message_id = %message.id, "Contact message received");
    created(message)
}

#[utoipa::path(
    get,
    path = "/api/contact",
    responses(
        (status = 200, description = "Messages, newest first", body = ApiResponse<Vec<ContactMessage>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Contact"
)]
pub async fn list_messages(State(state): State<Arc<AppState>>) -> ApiResult<Vec<ContactMessage>> {
    ok(state.store.list_messages(MESSAGE_LIST_LIMIT).await?)
}

#[utoipa::path(
    put,
    path = "/api/contact/{message_id}/read",
    params(("message_id" = String, Path, description = "Message id")),
    responses(
        (status = 200, description = "Marked as read", body = ApiResponse<MessageData>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Message not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Contact"
)]
pub async fn mark_message_read(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(message_id): Path<String>,
) -> ApiResult<MessageData> {
    if !state.store.mark_message_read(&message_id).await? {
        return ApiError::not_found(error_codes::MESSAGE_NOT_FOUND, "Message not found").into_err();
    }
    tracing::debug!(message_id = %message_id, admin = %claims.sub, "Message marked read");
    ok(MessageData::new("Marked as read"))
}
