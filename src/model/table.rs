//! Table model structures.

use serde::{Deserialize, Serialize};

/// A rectangular table of strings: named columns plus data rows.
///
/// Every row holds exactly one value per column. The header row of the
/// source sheet is stored in `columns` and never appears in `rows`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Column names, in sheet order
    pub columns: Vec<String>,

    /// Data rows, each aligned positionally with `columns`
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given columns and no rows.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row, padding it with empty strings to the column count.
    ///
    /// Rows longer than the column count are truncated; the extractor
    /// rejects them before they get here.
    pub fn add_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value at `row` in the column named `column`.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec!["Name".into(), "Age".into()]);
        table.add_row(vec!["Ann".into(), "41".into()]);
        table.add_row(vec!["Bob".into()]);
        table
    }

    #[test]
    fn test_add_row_pads_short_rows() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.rows[1], vec!["Bob".to_string(), String::new()]);
    }

    #[test]
    fn test_lookup() {
        let table = sample();
        assert_eq!(table.get(0, "Age"), Some("41"));
        assert_eq!(table.get(1, "Age"), Some(""));
        assert_eq!(table.get(0, "age"), None);
        assert_eq!(table.get(5, "Name"), None);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"columns":["Name","Age"],"rows":[["Ann","41"],["Bob",""]]}"#
        );
    }
}
