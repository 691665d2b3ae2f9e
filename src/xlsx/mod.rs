//! XLSX (Excel) sheet reading.
//!
//! [`XlsxSheetReader`] opens a workbook, locates its first worksheet and
//! hands its rows to the [`TableExtractor`](crate::extract::TableExtractor)
//! as unresolved [`RawCell`](crate::model::RawCell)s.
//!
//! # Example
//!
//! ```no_run
//! use xlsx_records::extract::TableExtractor;
//! use xlsx_records::xlsx::XlsxSheetReader;
//!
//! let reader = XlsxSheetReader::open("people.xlsx")?;
//! println!("Sheet: {}", reader.sheet_name());
//!
//! let table = TableExtractor::new().extract_table(&reader)?;
//! println!("{} rows", table.row_count());
//! # Ok::<(), xlsx_records::Error>(())
//! ```

mod reader;
mod shared_strings;

pub use reader::XlsxSheetReader;
pub use shared_strings::SharedStrings;
