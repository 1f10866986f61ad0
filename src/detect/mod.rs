//! Change detection between consecutive fetches.
//!
//! A detector holds the only mutable state in the bot: what it saw on the
//! previous successful fetch. The first successful observation is a
//! baseline and never produces changes. After that, state is updated on
//! every successful observation, before any notification is attempted, so a
//! failed delivery is never retried by the next poll.

mod last_row;
mod victors;

pub use last_row::LastRowDetector;
pub use victors::VictorDetector;
pub(crate) use victors::{split_victors, user_mentions, victor_change};

use crate::config::{WatchConfig, WatchMode};
use crate::error::Result;
use crate::sheet::Sheet;

/// A victor newly listed for a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictorChange {
    /// Level id cell.
    pub level_id: String,
    /// Level name cell.
    pub level_name: String,
    /// Creators cell.
    pub creators: String,
    /// Difficulty cell as written.
    pub difficulty: String,
    /// Name of the new victor.
    pub victor: String,
    /// Chat user id of the victor, when the sheet maps one.
    pub mention: Option<String>,
}

/// One notifiable change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// The watched cell moved from `previous` to `current`.
    Value {
        /// Header text of the watched column, or `column N`.
        column: String,
        /// Value held before this fetch.
        previous: String,
        /// Value in this fetch.
        current: String,
    },
    /// Someone new appears in a level's victor list.
    Victor(VictorChange),
}

/// Result of comparing a fetch with held state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// First successful observation; state recorded, nothing to send.
    Baseline,
    /// Same as last time.
    Unchanged,
    /// Changes to notify, in delivery order.
    Changed(Vec<Change>),
}

/// Compares each fetched sheet against what was seen before.
pub trait ChangeDetector: Send {
    /// Record `sheet` and report how it differs from the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::NotifierError::Shape`] when the sheet does not
    /// have the expected layout. Held state is left untouched in that case.
    fn observe(&mut self, sheet: &Sheet) -> Result<Observation>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Build the detector selected by `watch.mode`.
pub fn detector_for(watch: &WatchConfig) -> Box<dyn ChangeDetector> {
    match watch.mode {
        WatchMode::LastRow => Box::new(LastRowDetector::new(watch.column, watch.header_rows)),
        WatchMode::Victors => Box::new(VictorDetector::new(
            watch.columns.clone(),
            watch.header_rows,
        )),
    }
}
