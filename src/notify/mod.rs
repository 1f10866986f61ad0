//! Delivering notifications to the chat webhook.

mod message;
mod webhook;

pub use message::{MessageFormatter, difficulty_tier};
pub use webhook::{WebhookNotifier, WebhookNotifierBuilder, WebhookPayload};

use crate::error::Result;
use async_trait::async_trait;

/// Sends one text message somewhere a human will see it.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::NotifierError::Delivery`] when the message was
    /// not accepted. Callers treat this as non-fatal and do not retry.
    async fn send(&self, message: &str) -> Result<()>;
}
