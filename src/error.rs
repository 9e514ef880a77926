//! Error types for the scanbuddy library.

use std::io;
use thiserror::Error;

/// Result type alias for scanbuddy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while running a comparison.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized.
    #[error("Unknown file format: {0}")]
    UnknownFormat(String),

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// A source document (PDF, text or spreadsheet) cannot be opened or parsed.
    #[error("Document error: {0}")]
    Document(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Requested column does not exist in the table.
    #[error("Column {index} is out of range (table has {count} columns)")]
    ColumnOutOfRange { index: usize, count: usize },

    /// Condition name is not in the registry.
    #[error("Unknown condition: {0}")]
    UnknownCondition(String),

    /// Run parameters do not fit the input documents.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// The matched result cannot be serialized or written.
    #[error("Export error: {0}")]
    Export(String),
}

impl Error {
    /// Whether this error came from opening or reading a source document.
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            Error::Document(_)
                | Error::Encrypted
                | Error::UnknownFormat(_)
                | Error::UnsupportedVersion(_)
                | Error::Io(_)
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::Document(err.to_string()),
        }
    }
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::Document(format!("spreadsheet: {}", err))
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Export(err.to_string())
    }
}
