//! Spreadsheet rows and the TSV export parser.

mod fetcher;

pub use fetcher::{HttpSheetFetcher, HttpSheetFetcherBuilder, SheetFetcher};

use crate::error::{NotifierError, Result};

/// One line of the export: an ordered list of cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    /// Create a row from its cells.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// The cell at `idx`, if the row is long enough.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.cells.get(idx).map(String::as_str)
    }

    /// The trimmed cell at `idx`; missing cells read as empty.
    pub fn cell(&self, idx: usize) -> &str {
        self.get(idx).map(str::trim).unwrap_or("")
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// All rows of one fetch, in sheet order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sheet {
    rows: Vec<Row>,
}

impl Sheet {
    /// Create a sheet from rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// All rows, headers included.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows after the first `header_rows`.
    pub fn data_rows(&self, header_rows: usize) -> &[Row] {
        self.rows.get(header_rows..).unwrap_or(&[])
    }

    /// The final row, if any.
    pub fn last_row(&self) -> Option<&Row> {
        self.rows.last()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the sheet has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse a tab-separated export.
///
/// Quoted cells follow the usual delimited-text rules. Rows may differ in
/// length. Lines whose cells are all blank are dropped.
///
/// # Errors
///
/// [`NotifierError::EmptyResponse`] if the text holds no rows,
/// [`NotifierError::Parse`] if the text is not well-formed.
pub fn parse_tsv(text: &str) -> Result<Sheet> {
    if text.trim().is_empty() {
        return Err(NotifierError::EmptyResponse);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| NotifierError::Parse(e.to_string()))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().collect::<Row>());
    }

    if rows.is_empty() {
        return Err(NotifierError::EmptyResponse);
    }

    Ok(Sheet::new(rows))
}
