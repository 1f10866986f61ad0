//! send-manual: announce the newest victor of one level by hand.
//!
//! Usage:
//!   send-manual 12        # post for data row 12
//!   send-manual --list    # print row numbers and level names

use anyhow::{Context, Result, bail};
use clap::Parser;
use sheet_notifier::config::NotifierConfig;
use sheet_notifier::manual::{list_levels, manual_message};
use sheet_notifier::notify::{MessageFormatter, Notifier, WebhookNotifier};
use sheet_notifier::sheet::{HttpSheetFetcher, SheetFetcher};

#[derive(Parser)]
#[command(
    name = "send-manual",
    version,
    about = "Post the victor notification for one sheet row"
)]
struct Cli {
    /// Data row number (1 = first row after the header)
    #[arg(required_unless_present = "list")]
    row: Option<usize>,

    /// List levels with their row numbers and exit
    #[arg(short, long)]
    list: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    sheet_notifier::logging::init();

    let config = NotifierConfig::load().context("invalid startup configuration")?;
    let client = sheet_notifier::http::build_client(config.request_timeout())?;

    let fetcher = HttpSheetFetcher::builder()
        .with_url(&config.sheet_url)
        .with_client(client.clone())
        .build()?;
    let sheet = fetcher.fetch().await.context("failed to fetch sheet")?;
    tracing::info!(rows = sheet.len(), "Loaded sheet");

    if cli.list {
        for (row, id, name) in list_levels(&sheet, &config.watch) {
            println!("{row:>4}. {name} (ID: {id})");
        }
        return Ok(());
    }

    let Some(row) = cli.row else {
        bail!("a row number is required");
    };

    let formatter = MessageFormatter::new(&config.message);
    let message = manual_message(&sheet, row, &config.watch, &formatter)?;

    let notifier = WebhookNotifier::builder()
        .with_url(&config.webhook_url)
        .with_client(client)
        .build()?;
    notifier.send(&message).await?;

    tracing::info!(%message, "Notification sent");
    Ok(())
}
