//! Loader error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a tabular file.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// File extension is not one of csv, xls, xlsx.
    #[error("Unsupported file type: {} (expected .csv, .xls or .xlsx)", .path.display())]
    UnsupportedFileType {
        /// Offending path
        path: PathBuf,
    },

    /// File does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// IO failure while reading.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited text.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Unreadable spreadsheet.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Spreadsheet without any worksheet.
    #[error("Workbook has no worksheets: {}", .0.display())]
    EmptyWorkbook(PathBuf),
}
