//! Shared HTTP client construction.

use crate::error::{NotifierError, Result};
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the client used for both the sheet fetch and the webhook post.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| NotifierError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Scheme and host of `url` with the path dropped.
///
/// Webhook URLs carry their secret token in the path, so only this form is
/// ever logged.
pub fn redact_url(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => format!("{}://{}/...", parsed.scheme(), host),
            None => "<redacted>".to_string(),
        },
        Err(_) => "<invalid url>".to_string(),
    }
}
