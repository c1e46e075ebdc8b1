use axum::{Extension, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::email::{EmailMessage, MailError};
use crate::gateway::{
    state::AppState,
    types::{ApiJson, ApiResponse, ApiResult, ok},
};
use crate::user_auth::Claims;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TestEmailRequest {
    #[validate(email(message = "recipient_email must be a valid email address"))]
    #[schema(example = "owner@example.com")]
    pub recipient_email: String,
    pub subject: String,
    pub html_content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TestEmailResponse {
    #[schema(example = "success")]
    pub status: String,
    pub email_id: String,
}

/// Send an arbitrary email through the configured provider
#[utoipa::path(
    post,
    path = "/api/send-test-email",
    request_body = TestEmailRequest,
    responses(
        (status = 200, description = "Email sent", body = ApiResponse<TestEmailResponse>),
        (status = 400, description = "Invalid recipient"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Mailer not configured or delivery failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Email"
)]
pub async fn send_test_email(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    ApiJson(req): ApiJson<TestEmailRequest>,
) -> ApiResult<TestEmailResponse> {
    req.validate()?;
    let mailer = state.mailer.as_ref().ok_or(MailError::NotConfigured)?;

    let message = EmailMessage {
        to: req.recipient_email,
        subject: req.subject,
        html: req.html_content,
    };
    let email_id = mailer.send(&message).await.map_err(|e| {
        tracing::error!(admin = %claims.sub, "Failed to send test email: {}", e);
        e
    })?;

    tracing::info!(email_id = %email_id, admin = %claims.sub, "Test email sent");
    ok(TestEmailResponse {
        status: "success".to_string(),
        email_id,
    })
}
