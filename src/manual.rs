//! One-off notification for a chosen level row.
//!
//! Used to re-announce a level's most recent victor by hand, e.g. after the
//! bot was offline when the sheet was edited.

use crate::config::WatchConfig;
use crate::detect::{split_victors, user_mentions, victor_change};
use crate::error::{NotifierError, Result};
use crate::notify::MessageFormatter;
use crate::sheet::Sheet;

/// Build the victor message for data row `row_number` (1-based, headers
/// excluded), announcing the last victor in that row's list.
///
/// # Errors
///
/// [`NotifierError::Manual`] when the sheet has no data rows, the row
/// number is out of range, or the row has no level id or no victors.
pub fn manual_message(
    sheet: &Sheet,
    row_number: usize,
    watch: &WatchConfig,
    formatter: &MessageFormatter,
) -> Result<String> {
    let rows = sheet.data_rows(watch.header_rows);
    if rows.is_empty() {
        return Err(NotifierError::Manual("no data found in sheet".to_string()));
    }

    if row_number < 1 || row_number > rows.len() {
        return Err(NotifierError::Manual(format!(
            "invalid row number {}, must be between 1 and {}",
            row_number,
            rows.len()
        )));
    }

    let cols = &watch.columns;
    let row = &rows[row_number - 1];

    if row.cell(cols.level_id).is_empty() {
        return Err(NotifierError::Manual(format!(
            "row {row_number} has no level id"
        )));
    }

    let newest = split_victors(row.cell(cols.victors))
        .pop()
        .ok_or_else(|| NotifierError::Manual(format!("row {row_number} has no victors yet")))?;

    let mentions = user_mentions(rows, cols);
    Ok(formatter.format_victor(&victor_change(row, cols, &newest, &mentions)))
}

/// `(row number, level id, level name)` for every data row with a level id.
pub fn list_levels(sheet: &Sheet, watch: &WatchConfig) -> Vec<(usize, String, String)> {
    let cols = &watch.columns;
    sheet
        .data_rows(watch.header_rows)
        .iter()
        .enumerate()
        .filter(|(_, row)| !row.cell(cols.level_id).is_empty())
        .map(|(idx, row)| {
            (
                idx + 1,
                row.cell(cols.level_id).to_string(),
                row.cell(cols.level_name).to_string(),
            )
        })
        .collect()
}
