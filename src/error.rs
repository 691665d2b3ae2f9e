//! Error types for the xlsx-records library.

use crate::mapping::FieldKind;
use std::io;
use thiserror::Error;

/// Result type alias for xlsx-records operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting or mapping a worksheet.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required package part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// The worksheet has no header row or is structurally unreadable.
    #[error("Malformed sheet: {0}")]
    MalformedSheet(String),

    /// A shared-string cell points outside the shared-string table.
    #[error("Invalid shared string reference '{index}' ({available} strings available)")]
    InvalidCellReference {
        /// Raw payload of the offending cell
        index: String,
        /// Number of entries in the shared-string table
        available: usize,
    },

    /// A cell value could not be converted to the declared field type.
    #[error("The value '{value}' for the column {column} is the wrong datatype (expected {kind})")]
    Coercion {
        /// Raw cell text
        value: String,
        /// Column the value came from
        column: String,
        /// Declared type of the target field
        kind: FieldKind,
    },
}

impl Error {
    /// Whether the error comes from opening or reading the input itself.
    pub fn is_resource_access(&self) -> bool {
        matches!(self, Error::Io(_) | Error::ZipArchive(_))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            other => Error::ZipArchive(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}
