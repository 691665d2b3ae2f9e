//! # xlsx-records
//!
//! Read the first worksheet of an XLSX workbook as a table of strings or as
//! typed records.
//!
//! The header row supplies the column names. Shared strings are resolved,
//! and the `-` placeholder becomes an empty string. Record mapping matches
//! column names to schema fields exactly and coerces dates, decimals and
//! integers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use xlsx_records::{column_names, read_table};
//!
//! let columns = column_names("people.xlsx")?;
//! println!("Columns: {:?}", columns);
//!
//! let table = read_table("people.xlsx")?;
//! for row in &table.rows {
//!     println!("{}", row.join(" | "));
//! }
//! # Ok::<(), xlsx_records::Error>(())
//! ```
//!
//! ## Typed Records
//!
//! ```no_run
//! use chrono::NaiveDateTime;
//! use rust_decimal::Decimal;
//! use xlsx_records::{read_records, Record, Schema};
//!
//! #[derive(Debug, Default)]
//! struct Employee {
//!     name: String,
//!     hired: NaiveDateTime,
//!     rate: Decimal,
//! }
//!
//! impl Record for Employee {
//!     fn schema() -> Schema<Self> {
//!         Schema::default()
//!             .text("Name", |e: &mut Employee, v| e.name = v)
//!             .date("Hired", |e: &mut Employee, v| e.hired = v)
//!             .decimal("Rate", |e: &mut Employee, v| e.rate = v)
//!     }
//! }
//!
//! let staff: Vec<Employee> = read_records("staff.xlsx")?;
//! # Ok::<(), xlsx_records::Error>(())
//! ```

pub mod container;
pub mod error;
pub mod extract;
pub mod mapping;
pub mod model;
pub mod options;
pub mod xlsx;

// Re-exports
pub use error::{Error, Result};
pub use extract::{MemorySheet, SheetSource, TableExtractor};
pub use mapping::{FieldKind, FieldValue, Record, RecordMapper, Schema};
pub use model::{CellKind, RawCell, Table};
pub use options::ExtractOptions;
pub use xlsx::{SharedStrings, XlsxSheetReader};

use std::path::Path;

/// Read the header row of the first sheet.
///
/// # Example
///
/// ```no_run
/// let columns = xlsx_records::column_names("people.xlsx")?;
/// assert!(!columns.is_empty());
/// # Ok::<(), xlsx_records::Error>(())
/// ```
pub fn column_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let reader = XlsxSheetReader::open(path)?;
    TableExtractor::new().extract_column_names(&reader)
}

/// Read the header row of the first sheet from bytes.
pub fn column_names_from_bytes(data: &[u8]) -> Result<Vec<String>> {
    let reader = XlsxSheetReader::from_bytes(data.to_vec())?;
    TableExtractor::new().extract_column_names(&reader)
}

/// Read the first sheet as a [`Table`].
///
/// # Example
///
/// ```no_run
/// let table = xlsx_records::read_table("people.xlsx")?;
/// println!("{} columns, {} rows", table.column_count(), table.row_count());
/// # Ok::<(), xlsx_records::Error>(())
/// ```
pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    read_table_with_options(path, &ExtractOptions::default())
}

/// Read the first sheet as a [`Table`] with options.
///
/// # Example
///
/// ```no_run
/// use xlsx_records::{read_table_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new().without_placeholder();
/// let table = read_table_with_options("people.xlsx", &options)?;
/// # Ok::<(), xlsx_records::Error>(())
/// ```
pub fn read_table_with_options(path: impl AsRef<Path>, options: &ExtractOptions) -> Result<Table> {
    let reader = XlsxSheetReader::open(path)?;
    TableExtractor::with_options(options.clone()).extract_table(&reader)
}

/// Read the first sheet from bytes as a [`Table`].
pub fn read_table_from_bytes(data: &[u8]) -> Result<Table> {
    let reader = XlsxSheetReader::from_bytes(data.to_vec())?;
    TableExtractor::new().extract_table(&reader)
}

/// Read the first sheet as records of a [`Record`] type.
pub fn read_records<T: Record>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    read_records_with(path, &T::schema())
}

/// Read the first sheet as records described by `schema`.
pub fn read_records_with<T>(path: impl AsRef<Path>, schema: &Schema<T>) -> Result<Vec<T>> {
    let table = read_table(path)?;
    RecordMapper::new(schema).map_rows(&table)
}

/// Read records of a [`Record`] type from bytes.
pub fn read_records_from_bytes<T: Record>(data: &[u8]) -> Result<Vec<T>> {
    let table = read_table_from_bytes(data)?;
    RecordMapper::new(&T::schema()).map_rows(&table)
}
