//! Resend HTTP email sender.

use async_trait::async_trait;

use crate::config::EmailConfig;
use crate::domain::{DomainError, ErrorCode};
use crate::ports::EmailSender;

const API_URL: &str = "https://api.resend.com/emails";

/// Email sender over the Resend HTTP API. When no API key is configured
/// every send fails with `EmailError`; callers treat that as a skip.
pub struct ResendEmailSender {
    client: reqwest::Client,
    api_key: Option<String>,
    from: String,
}

impl ResendEmailSender {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config
                .resend_api_key
                .as_ref()
                .filter(|k| !k.is_empty())
                .cloned(),
            from: config.from_header(),
        }
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), DomainError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            DomainError::new(ErrorCode::EmailError, "Email sending is not configured")
        })?;

        let body = serde_json::json!({
            "from": self.from,
            "to": [to],
            "subject": subject,
            "html": html,
        });

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::EmailError, format!("Email send failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Email provider rejected message");
            return Err(DomainError::new(
                ErrorCode::EmailError,
                format!("Email provider returned HTTP {}: {}", status, text),
            ));
        }
        Ok(())
    }
}
