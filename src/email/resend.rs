use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{EmailMessage, MailError, Mailer};
use crate::config::EmailConfig;

/// Resend HTTP API client
pub struct ResendMailer {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    sender: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

impl ResendMailer {
    /// Returns `None` when no API key is configured.
    pub fn from_config(config: &EmailConfig) -> Result<Option<Self>, MailError> {
        let Some(api_key) = config.resend_api_key.clone().filter(|k| !k.is_empty()) else {
            return Ok(None);
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Some(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            sender: config.sender_email.clone(),
        }))
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> Result<String, MailError> {
        let url = format!("{}/emails", self.api_base);
        let request = SendRequest {
            from: &self.sender,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
        };

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MailError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let sent: SendResponse = resp.json().await?;
        Ok(sent.id)
    }
}
