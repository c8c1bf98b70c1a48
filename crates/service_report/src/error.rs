//! Export errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Workbook serialisation failed.
    #[error("Excel export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV serialisation failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Destination exists but has the wrong kind (file vs directory).
    #[error("Invalid export destination: {}", .0.display())]
    InvalidDestination(PathBuf),

    /// Unrecognised export format name.
    #[error("Unknown export format '{0}' (expected xlsx or csv)")]
    UnknownFormat(String),
}
