//! Watches per-level victor lists.

use super::{Change, ChangeDetector, Observation, VictorChange};
use crate::config::VictorColumns;
use crate::error::{NotifierError, Result};
use crate::sheet::{Row, Sheet};
use std::collections::{BTreeSet, HashMap};

/// Notifies once for every victor newly added to any level.
///
/// Levels are keyed by their id column; rows without an id are ignored.
/// Levels that disappear from the sheet keep their last recorded victors.
#[derive(Debug, Clone)]
pub struct VictorDetector {
    columns: VictorColumns,
    header_rows: usize,
    previous: HashMap<String, BTreeSet<String>>,
    baseline_done: bool,
}

impl VictorDetector {
    /// Create a detector reading the given column layout.
    pub fn new(columns: VictorColumns, header_rows: usize) -> Self {
        Self {
            columns,
            header_rows,
            previous: HashMap::new(),
            baseline_done: false,
        }
    }

    /// Victors recorded for `level_id`.
    pub fn victors_of(&self, level_id: &str) -> Option<&BTreeSet<String>> {
        self.previous.get(level_id)
    }
}

impl ChangeDetector for VictorDetector {
    fn observe(&mut self, sheet: &Sheet) -> Result<Observation> {
        let rows = sheet.data_rows(self.header_rows);
        if rows.is_empty() {
            return Err(NotifierError::Shape(format!(
                "no data rows after {} header row(s)",
                self.header_rows
            )));
        }

        let mentions = user_mentions(rows, &self.columns);
        let cols = &self.columns;
        let mut current: HashMap<String, BTreeSet<String>> = HashMap::new();
        let mut changes = Vec::new();

        for row in rows {
            let level_id = row.cell(cols.level_id);
            if level_id.is_empty() {
                continue;
            }

            let victors: BTreeSet<String> = split_victors(row.cell(cols.victors))
                .into_iter()
                .collect();

            if self.baseline_done {
                let known = self.previous.get(level_id);
                for victor in victors.iter().filter(|v| known.is_none_or(|k| !k.contains(*v))) {
                    changes.push(Change::Victor(victor_change(row, cols, victor, &mentions)));
                }
            }

            current.insert(level_id.to_string(), victors);
        }

        self.previous.extend(current);

        if !self.baseline_done {
            self.baseline_done = true;
            return Ok(Observation::Baseline);
        }

        if changes.is_empty() {
            Ok(Observation::Unchanged)
        } else {
            Ok(Observation::Changed(changes))
        }
    }

    fn name(&self) -> &'static str {
        "victors"
    }
}

/// Split a comma-separated victors cell, dropping blanks. Order is kept.
pub(crate) fn split_victors(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tracker username to chat user id, for every row that has both.
pub(crate) fn user_mentions(rows: &[Row], cols: &VictorColumns) -> HashMap<String, String> {
    rows.iter()
        .filter_map(|row| {
            let username = row.cell(cols.tracker_username);
            let id = row.cell(cols.discord_id);
            (!username.is_empty() && !id.is_empty()).then(|| (username.to_string(), id.to_string()))
        })
        .collect()
}

pub(crate) fn victor_change(
    row: &Row,
    cols: &VictorColumns,
    victor: &str,
    mentions: &HashMap<String, String>,
) -> VictorChange {
    VictorChange {
        level_id: row.cell(cols.level_id).to_string(),
        level_name: row.cell(cols.level_name).to_string(),
        creators: row.cell(cols.creator).to_string(),
        difficulty: row.cell(cols.difficulty).to_string(),
        victor: victor.to_string(),
        mention: mentions.get(victor).cloned(),
    }
}
