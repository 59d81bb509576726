use thiserror::Error;

/// Errors that abort a bulletin run.
///
/// Missing data (no Bogotá columns, no Bogotá PDF) is not an error; those
/// outcomes live in [`crate::models::TableExtraction`] and
/// [`crate::models::DocumentText`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Network request failed, timed out or returned a non-success status
    #[error("Fetch error: {0}")]
    Fetch(String),
    /// Spreadsheet bytes could not be read as a workbook
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),
    /// Compressed archive is corrupt or unreadable
    #[error("Archive error: {0}")]
    Archive(String),
    /// PDF document or one of its pages is corrupt
    #[error("Document error: {0}")]
    Document(String),
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    Url(String),
    /// Invalid input or configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// CSV export failed
    #[error("Export error: {0}")]
    Export(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Url(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<zip::result::ZipError> for AppError {
    fn from(err: zip::result::ZipError) -> Self {
        AppError::Archive(err.to_string())
    }
}

impl From<lopdf::Error> for AppError {
    fn from(err: lopdf::Error) -> Self {
        AppError::Document(err.to_string())
    }
}

impl From<calamine::Error> for AppError {
    fn from(err: calamine::Error) -> Self {
        AppError::Spreadsheet(err.to_string())
    }
}

impl From<polars::prelude::PolarsError> for AppError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        AppError::Export(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
