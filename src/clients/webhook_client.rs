use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{error, info};

use crate::core::models::ChatMessage;
use crate::errors::NotifyError;

/// Delivers a finished chat message.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &ChatMessage) -> Result<(), NotifyError>;
}

/// Posts messages to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: Client,
    webhook_url: String,
}

impl WebhookClient {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), webhook_url)
    }

    pub fn with_client(http: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            http,
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl ChatTransport for WebhookClient {
    async fn send(&self, message: &ChatMessage) -> Result<(), NotifyError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let resp = self
            .http
            .post(&self.webhook_url)
            .headers(headers)
            .json(message)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            error!("Webhook POST failed: status={} body={}", status, body_text);
            return Err(NotifyError::HttpError(format!(
                "webhook returned {status}: {body_text}"
            )));
        }

        info!(channel = ?message.channel, "Delivered message to webhook");
        Ok(())
    }
}
