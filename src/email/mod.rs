//! Outbound email
//!
//! Handlers and the order service only see the [`Mailer`] trait. The
//! production implementation is [`ResendMailer`]; tests plug in their own.

pub mod resend;
pub mod template;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use resend::ResendMailer;
pub use template::{order_confirmation, order_confirmation_subject};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("email delivery is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message and return the provider's message id.
    async fn send(&self, message: &EmailMessage) -> Result<String, MailError>;
}
