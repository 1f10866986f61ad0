//! Fetching the published sheet over HTTP.

use super::{Sheet, parse_tsv};
use crate::error::{NotifierError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Something that produces a fresh [`Sheet`] on demand.
#[async_trait]
pub trait SheetFetcher: Send + Sync {
    /// Fetch and parse the current sheet contents.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses and unparseable bodies are
    /// all errors. None of them are fatal to the poll loop.
    async fn fetch(&self) -> Result<Sheet>;

    /// Get a human-readable name for this fetcher (for logging).
    fn name(&self) -> String;
}

/// Fetches a TSV export with a plain HTTP GET.
///
/// # Examples
///
/// ```rust,no_run
/// use sheet_notifier::sheet::{HttpSheetFetcher, SheetFetcher};
/// use std::time::Duration;
///
/// # async fn example() -> sheet_notifier::error::Result<()> {
/// let fetcher = HttpSheetFetcher::builder()
///     .with_url("https://docs.example.com/spreadsheets/d/e/abc/pub?output=tsv")
///     .with_timeout(Duration::from_secs(10))
///     .build()?;
///
/// let sheet = fetcher.fetch().await?;
/// println!("{} rows", sheet.len());
/// # Ok(())
/// # }
/// ```
pub struct HttpSheetFetcher {
    url: String,
    client: Client,
}

impl HttpSheetFetcher {
    /// Create a new builder.
    pub fn builder() -> HttpSheetFetcherBuilder {
        HttpSheetFetcherBuilder::new()
    }

    /// The export URL being polled.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SheetFetcher for HttpSheetFetcher {
    async fn fetch(&self) -> Result<Sheet> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| NotifierError::Fetch(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifierError::Fetch(format!(
                "HTTP request failed with status {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| NotifierError::Fetch(format!("Failed to read response body: {}", e)))?;

        tracing::trace!(bytes = body.len(), "Sheet body received");
        parse_tsv(&body)
    }

    fn name(&self) -> String {
        format!("http:{}", self.url)
    }
}

/// Builder for constructing an [`HttpSheetFetcher`].
pub struct HttpSheetFetcherBuilder {
    url: Option<String>,
    timeout: Duration,
    client: Option<Client>,
}

impl HttpSheetFetcherBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: None,
            timeout: Duration::from_secs(10),
            client: None,
        }
    }

    /// Set the export URL to fetch.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the request timeout.
    ///
    /// Default is 10 seconds. Ignored when a client is supplied.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reuse an existing client (shared with the webhook notifier).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the fetcher.
    ///
    /// # Errors
    ///
    /// Returns an error if no URL is provided or the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<HttpSheetFetcher> {
        let url = self
            .url
            .ok_or_else(|| NotifierError::Config("URL is required for HttpSheetFetcher".to_string()))?;

        let client = match self.client {
            Some(client) => client,
            None => crate::http::build_client(self.timeout)?,
        };

        Ok(HttpSheetFetcher { url, client })
    }
}

impl Default for HttpSheetFetcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
