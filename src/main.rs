//! sheet-notifier: poll the sheet and notify the webhook until Ctrl-C.
//!
//! Takes no flags. Configuration comes from `sheet-notifier.toml` (or the
//! file named by `SHEET_NOTIFIER_CONFIG`) and environment variables.

use anyhow::{Context, Result};
use sheet_notifier::config::NotifierConfig;
use sheet_notifier::http::redact_url;
use sheet_notifier::logging;
use sheet_notifier::monitor::Monitor;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();

    let config = NotifierConfig::load().context("invalid startup configuration")?;

    tracing::info!(
        webhook = %redact_url(&config.webhook_url),
        sheet = %config.sheet_url,
        interval_minutes = config.check_interval_minutes,
        mode = ?config.watch.mode,
        "Starting sheet-notifier"
    );

    let mut monitor = Monitor::from_config(&config)?;
    monitor.run(shutdown_signal()).await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Cannot listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
}
