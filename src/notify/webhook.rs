//! Chat webhook delivery.
//!
//! Posts a JSON body of the form `{"content": "..."}`, which Discord-style
//! incoming webhooks render as a plain chat message.

use super::Notifier;
use crate::error::{NotifierError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// JSON body posted to the webhook.
#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    /// Message text.
    pub content: &'a str,
}

/// Posts messages to a single webhook URL.
pub struct WebhookNotifier {
    url: String,
    client: Client,
}

impl WebhookNotifier {
    /// Create a new builder.
    pub fn builder() -> WebhookNotifierBuilder {
        WebhookNotifierBuilder::new()
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { content: message })
            .send()
            .await
            .map_err(|e| {
                // The token lives in the URL path, so strip it from the error text.
                NotifierError::Delivery(format!("HTTP request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifierError::Delivery(format!(
                "webhook returned HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        Ok(())
    }
}

/// Builder for constructing a [`WebhookNotifier`].
pub struct WebhookNotifierBuilder {
    url: Option<String>,
    timeout: Duration,
    client: Option<Client>,
}

impl WebhookNotifierBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: None,
            timeout: Duration::from_secs(10),
            client: None,
        }
    }

    /// Set the webhook URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the request timeout. Ignored when a client is supplied.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reuse an existing client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no URL is provided or the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<WebhookNotifier> {
        let url = self
            .url
            .ok_or_else(|| NotifierError::Config("URL is required for WebhookNotifier".to_string()))?;

        let client = match self.client {
            Some(client) => client,
            None => crate::http::build_client(self.timeout)?,
        };

        Ok(WebhookNotifier { url, client })
    }
}

impl Default for WebhookNotifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}
