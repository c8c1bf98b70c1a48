//! # service_report: Reconciliation Export
//!
//! Turns a [`ReconciliationOutcome`](recon_core::pipeline::ReconciliationOutcome)
//! into named sheets and writes them to a destination.
//!
//! This module provides:
//! - [`ReportWorkbook`]: format-independent sheet layout
//! - [`ReportSink`]: output destination trait
//! - [`XlsxWorkbookWriter`]: one `.xlsx` file with a worksheet per sheet
//! - [`CsvDirWriter`]: one `<Sheet>.csv` file per sheet in a directory
//!
//! Sheets are `Matched`, `Qty_Match_Only`, `Fee_Match_Only`, `No_Match` and,
//! for pipelines with rate comparison, `Rate_Comparison`. Each sheet is
//! written exactly once.

mod csv_writer;
mod error;
mod sheets;
mod xlsx_writer;

pub use csv_writer::CsvDirWriter;
pub use error::ReportError;
pub use sheets::{Cell, ReportWorkbook, Sheet, BUCKET_COLUMNS, RATE_COLUMNS, RATE_COMPARISON_SHEET};
pub use xlsx_writer::{XlsxWorkbookWriter, DEFAULT_WORKBOOK_NAME};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Report output destination trait
pub trait ReportSink: Send + Sync {
    /// Write every sheet of the workbook, returning the paths produced.
    fn write(&self, workbook: &ReportWorkbook) -> Result<Vec<PathBuf>, ReportError>;
}

/// Export format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Single Excel workbook
    #[default]
    Xlsx,
    /// Directory of CSV files
    Csv,
}

impl ReportFormat {
    /// Get file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
        }
    }

    /// Get MIME type
    pub fn mime_type(&self) -> &'static str {
        match self {
            ReportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ReportFormat::Csv => "text/csv",
        }
    }

    /// Build the sink for this format.
    ///
    /// For [`ReportFormat::Xlsx`], `path` is the workbook file. For
    /// [`ReportFormat::Csv`], it is the output directory.
    pub fn sink(&self, path: impl AsRef<Path>) -> Box<dyn ReportSink> {
        match self {
            ReportFormat::Xlsx => Box::new(XlsxWorkbookWriter::new(path)),
            ReportFormat::Csv => Box::new(CsvDirWriter::new(path)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ReportFormat::Xlsx),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(ReportError::UnknownFormat(other.to_string())),
        }
    }
}
