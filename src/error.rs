use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Error type covering the different failure cases that can occur when the
/// loader reads, merges, or exports data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when the API response does not carry the expected documents.
    #[error("invalid API response: {0}")]
    InvalidResponse(String),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a sheet does not follow the expected layout.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when an export needs more rows or columns than a sheet holds.
    #[error("sheet limit exceeded: {0}")]
    SheetLimit(String),

    /// Raised when records are requested in batches of zero.
    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

/// Coarse classification of [`LoadError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An input path does not exist.
    FileNotFound,
    /// An input is not valid JSON.
    Parse,
    /// An input parses but lacks the expected documents, sheets or columns.
    Schema,
    /// The caller passed an unusable argument.
    Usage,
    /// Any other file-system failure.
    Io,
    /// Writing an export or setting up logging failed.
    Output,
}

impl LoadError {
    /// Classifies the error into the broad [`ErrorKind`] it belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::MissingInput(_) => ErrorKind::FileNotFound,
            LoadError::Json(_) => ErrorKind::Parse,
            LoadError::InvalidResponse(_)
            | LoadError::ExcelRead(_)
            | LoadError::InvalidWorkbook(_) => ErrorKind::Schema,
            LoadError::InvalidBatchSize => ErrorKind::Usage,
            LoadError::Io(_) => ErrorKind::Io,
            LoadError::ExcelWrite(_) | LoadError::SheetLimit(_) | LoadError::Logging(_) => {
                ErrorKind::Output
            }
        }
    }
}
