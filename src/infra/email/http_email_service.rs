use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Serialize;
use tracing::error;

use crate::domain::ports::EmailService;
use crate::error::AppError;

/// Delivers rendered mail through the relay's JSON API.
pub struct HttpEmailService {
    client: Client,
    api_url: String,
    api_key: String,
    from_alias: String,
}

impl HttpEmailService {
    pub fn new(api_url: String, api_key: String, from_alias: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            from_alias,
        }
    }
}

#[derive(Serialize)]
struct Attachment {
    filename: String,
    content_base64: String,
}

#[derive(Serialize)]
struct OutboundEmail<'a> {
    from_alias: &'a str,
    to_addr: &'a str,
    subject: &'a str,
    html_body: &'a str,
    attachments: Vec<Attachment>,
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment_name: Option<&str>,
        attachment_data: Option<&[u8]>,
    ) -> Result<(), AppError> {
        let attachments = attachment_name
            .zip(attachment_data)
            .map(|(name, data)| Attachment {
                filename: name.to_string(),
                content_base64: general_purpose::STANDARD.encode(data),
            })
            .into_iter()
            .collect();

        let message = OutboundEmail {
            from_alias: &self.from_alias,
            to_addr: recipient,
            subject,
            html_body,
            attachments,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                error!("Mail relay unreachable: {}", e);
                AppError::Internal(format!("Mail relay unreachable: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Mail relay rejected message: {} {}", status, body);
            return Err(AppError::Internal(format!(
                "Mail relay rejected message: {} {}",
                status, body
            )));
        }

        Ok(())
    }
}
