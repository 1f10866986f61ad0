//! Watches a single column of the last row.

use super::{Change, ChangeDetector, Observation};
use crate::error::{NotifierError, Result};
use crate::sheet::Sheet;

/// Notifies when one cell of the last row changes value.
#[derive(Debug, Clone)]
pub struct LastRowDetector {
    column: usize,
    header_rows: usize,
    last_known: Option<String>,
}

impl LastRowDetector {
    /// Watch `column` (zero-based). The first `header_rows` rows are never
    /// watched; the last of them labels the column in messages.
    pub fn new(column: usize, header_rows: usize) -> Self {
        Self {
            column,
            header_rows,
            last_known: None,
        }
    }

    /// The value recorded by the last successful observation.
    pub fn last_known(&self) -> Option<&str> {
        self.last_known.as_deref()
    }

    fn label(&self, sheet: &Sheet) -> String {
        let header = match self.header_rows {
            0 => None,
            n => sheet.rows().get(n - 1).map(|row| row.cell(self.column)),
        };
        match header {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format!("column {}", self.column),
        }
    }
}

impl ChangeDetector for LastRowDetector {
    fn observe(&mut self, sheet: &Sheet) -> Result<Observation> {
        let row = sheet
            .data_rows(self.header_rows)
            .last()
            .ok_or_else(|| NotifierError::Shape("sheet has no data rows".to_string()))?;

        if row.get(self.column).is_none() {
            return Err(NotifierError::Shape(format!(
                "last row has {} cells, watched column {} is missing",
                row.len(),
                self.column
            )));
        }
        let current = row.cell(self.column).to_string();

        let observation = match self.last_known.replace(current.clone()) {
            None => Observation::Baseline,
            Some(previous) if previous == current => Observation::Unchanged,
            Some(previous) => Observation::Changed(vec![Change::Value {
                column: self.label(sheet),
                previous,
                current,
            }]),
        };

        Ok(observation)
    }

    fn name(&self) -> &'static str {
        "last_row"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::parse_tsv;

    fn sheet(last: &str) -> Sheet {
        parse_tsv(&format!("id\tstatus\n1\told\n2\t{last}\n")).unwrap()
    }

    #[test]
    fn test_baseline_then_transition() {
        let mut detector = LastRowDetector::new(1, 1);

        assert_eq!(detector.observe(&sheet("A")).unwrap(), Observation::Baseline);
        assert_eq!(detector.observe(&sheet("A")).unwrap(), Observation::Unchanged);

        let observation = detector.observe(&sheet("B")).unwrap();
        assert_eq!(
            observation,
            Observation::Changed(vec![Change::Value {
                column: "status".into(),
                previous: "A".into(),
                current: "B".into(),
            }])
        );
        assert_eq!(detector.last_known(), Some("B"));
    }

    #[test]
    fn test_whitespace_is_not_a_change() {
        let mut detector = LastRowDetector::new(1, 1);
        detector.observe(&sheet("A")).unwrap();
        assert_eq!(detector.observe(&sheet(" A ")).unwrap(), Observation::Unchanged);
    }

    #[test]
    fn test_missing_column_keeps_state() {
        let mut detector = LastRowDetector::new(1, 1);
        detector.observe(&sheet("A")).unwrap();

        let short = parse_tsv("id\tstatus\n3\n").unwrap();
        assert!(matches!(detector.observe(&short), Err(NotifierError::Shape(_))));
        assert_eq!(detector.last_known(), Some("A"));
    }

    #[test]
    fn test_header_only_sheet_keeps_state() {
        let mut detector = LastRowDetector::new(1, 1);
        detector.observe(&sheet("A")).unwrap();

        let header_only = parse_tsv("id\tstatus\n").unwrap();
        assert!(matches!(detector.observe(&header_only), Err(NotifierError::Shape(_))));
        assert_eq!(detector.last_known(), Some("A"));

        assert_eq!(detector.observe(&sheet("A")).unwrap(), Observation::Unchanged);
    }

    #[test]
    fn test_label_without_header() {
        let mut detector = LastRowDetector::new(1, 0);
        detector.observe(&sheet("A")).unwrap();
        match detector.observe(&sheet("B")).unwrap() {
            Observation::Changed(changes) => {
                assert!(matches!(&changes[0], Change::Value { column, .. } if column == "column 1"));
            }
            other => panic!("expected change, got {other:?}"),
        }
    }
}
