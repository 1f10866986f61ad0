//! # sheet-notifier
//!
//! Watches a publicly published spreadsheet (its tab-separated export) and
//! posts a chat webhook message when the watched data changes.
//!
//! ## Overview
//!
//! One task, one thing at a time:
//!
//! 1. GET the TSV export and split it into rows ([`sheet`])
//! 2. compare with what was seen last poll ([`detect`])
//! 3. POST a message for each change ([`notify`])
//! 4. sleep the configured interval and repeat ([`monitor`])
//!
//! Fetch and delivery failures are logged and absorbed; only a bad
//! configuration stops the process.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sheet_notifier::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let config = NotifierConfig::load()?;
//! let mut monitor = Monitor::from_config(&config)?;
//!
//! monitor
//!     .run(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Watch modes
//!
//! - `last_row` (default): one column of the final row; a new value is announced
//!   with `message.template`.
//! - `victors`: per-level comma-separated victor lists; every newly listed
//!   victor is announced with the level, creators and difficulty emoji.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod config;
pub mod detect;
pub mod error;
pub mod http;
pub mod logging;
pub mod manual;
pub mod monitor;
pub mod notify;
pub mod sheet;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::config::{NotifierConfig, Validate, WatchMode};
    pub use crate::detect::{Change, ChangeDetector, Observation};
    pub use crate::error::{NotifierError, Result, ValidationError};
    pub use crate::monitor::{Monitor, PollOutcome};
    pub use crate::notify::{MessageFormatter, Notifier};
    pub use crate::sheet::{Row, Sheet, SheetFetcher, parse_tsv};
}
