//! Sheet → table extraction.
//!
//! A [`SheetSource`] yields the ordered rows of one worksheet plus its
//! shared-string table. [`TableExtractor`] resolves every cell to text, takes
//! the first row as column names and returns the rest as a [`Table`].

use crate::error::{Error, Result};
use crate::model::{CellKind, RawCell, Table};
use crate::options::ExtractOptions;
use crate::xlsx::SharedStrings;

/// A source of worksheet rows.
///
/// Implemented by [`XlsxSheetReader`](crate::xlsx::XlsxSheetReader) for real
/// workbooks and by [`MemorySheet`] for data already in memory.
pub trait SheetSource {
    /// All logical rows, in sheet order, each with its cells in order.
    fn rows(&self) -> Result<Vec<Vec<RawCell>>>;

    /// The first logical row, if any.
    fn first_row(&self) -> Result<Option<Vec<RawCell>>> {
        Ok(self.rows()?.into_iter().next())
    }

    /// Shared strings referenced by [`CellKind::SharedString`] cells.
    fn shared_strings(&self) -> &SharedStrings;
}

/// Worksheet rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    rows: Vec<Vec<RawCell>>,
    shared_strings: SharedStrings,
}

impl MemorySheet {
    /// Create a sheet from rows and their shared-string table.
    pub fn new(rows: Vec<Vec<RawCell>>, shared_strings: SharedStrings) -> Self {
        Self {
            rows,
            shared_strings,
        }
    }

    /// Create a sheet of literal cells only.
    pub fn from_literals<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(RawCell::literal).collect())
            .collect();
        Self::new(rows, SharedStrings::default())
    }
}

impl SheetSource for MemorySheet {
    fn rows(&self) -> Result<Vec<Vec<RawCell>>> {
        Ok(self.rows.clone())
    }

    fn first_row(&self) -> Result<Option<Vec<RawCell>>> {
        Ok(self.rows.first().cloned())
    }

    fn shared_strings(&self) -> &SharedStrings {
        &self.shared_strings
    }
}

/// Resolve a raw cell to its display string.
///
/// Shared-string cells are looked up by index; every other kind returns its
/// payload unchanged.
pub fn resolve_cell(cell: &RawCell, shared_strings: &SharedStrings) -> Result<String> {
    match cell.kind {
        CellKind::SharedString => shared_strings.resolve(&cell.value).map(str::to_string),
        _ => Ok(cell.value.clone()),
    }
}

/// Builds [`Table`]s from sheet sources.
#[derive(Debug, Clone, Default)]
pub struct TableExtractor {
    options: ExtractOptions,
}

impl TableExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with the given options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// The options in effect.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Read the header row only and return its values as column names.
    pub fn extract_column_names<S: SheetSource + ?Sized>(&self, sheet: &S) -> Result<Vec<String>> {
        let header = sheet
            .first_row()?
            .ok_or_else(|| Error::MalformedSheet("sheet has no rows".to_string()))?;
        self.header_names(&header, sheet.shared_strings())
    }

    /// Read every row: the first gives the columns, the rest the data.
    ///
    /// Data values equal to the configured placeholder become empty strings.
    /// Values are placed by their position within the row. Rows with fewer
    /// cells are padded with empty strings. Extra cells past the last column
    /// are dropped when empty and rejected otherwise.
    pub fn extract_table<S: SheetSource + ?Sized>(&self, sheet: &S) -> Result<Table> {
        let mut rows = sheet.rows()?.into_iter();
        let header = rows
            .next()
            .ok_or_else(|| Error::MalformedSheet("sheet has no rows".to_string()))?;

        let shared_strings = sheet.shared_strings();
        let mut table = Table::new(self.header_names(&header, shared_strings)?);
        let width = table.column_count();

        for (idx, row) in rows.enumerate() {
            let mut values = Vec::with_capacity(width);
            for (pos, cell) in row.iter().enumerate() {
                let value = self.options.normalize(resolve_cell(cell, shared_strings)?);
                if pos < width {
                    values.push(value);
                } else if !value.is_empty() {
                    return Err(Error::MalformedSheet(format!(
                        "row {} has a value '{}' at {} beyond the {} header columns",
                        idx + 2,
                        value,
                        cell.reference.as_deref().unwrap_or("an unnamed cell"),
                        width
                    )));
                }
            }
            table.add_row(values);
        }

        log::debug!(
            "extracted {} columns x {} rows",
            table.column_count(),
            table.row_count()
        );
        Ok(table)
    }

    fn header_names(
        &self,
        header: &[RawCell],
        shared_strings: &SharedStrings,
    ) -> Result<Vec<String>> {
        header
            .iter()
            .map(|cell| -> Result<String> {
                let name = resolve_cell(cell, shared_strings)?;
                Ok(if self.options.trim_headers {
                    name.trim().to_string()
                } else {
                    name
                })
            })
            .collect()
    }
}
