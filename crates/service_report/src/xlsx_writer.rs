//! Excel workbook output.

use rust_xlsxwriter::{Workbook, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ReportError;
use crate::sheets::{Cell, ReportWorkbook, Sheet};
use crate::ReportSink;

/// File name used when only a directory is given.
pub const DEFAULT_WORKBOOK_NAME: &str = "reconciliation_summary.xlsx";

/// Writes all sheets into one `.xlsx` workbook.
#[derive(Debug, Clone)]
pub struct XlsxWorkbookWriter {
    path: PathBuf,
}

impl XlsxWorkbookWriter {
    /// Create a writer targeting `path`.
    ///
    /// An existing directory resolves to `<dir>/reconciliation_summary.xlsx`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let path = if path.is_dir() {
            path.join(DEFAULT_WORKBOOK_NAME)
        } else {
            path.to_path_buf()
        };
        Self { path }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialise the workbook in memory.
    pub fn to_buffer(workbook: &ReportWorkbook) -> Result<Vec<u8>, ReportError> {
        Ok(build(workbook)?.save_to_buffer()?)
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> Result<(), ReportError> {
    worksheet.set_name(&sheet.name)?;

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, header)?;
    }

    for (r, row) in sheet.rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(r, col, s)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(r, col, *n)?;
                }
                Cell::Blank => {}
            }
        }
    }

    Ok(())
}

fn build(workbook: &ReportWorkbook) -> Result<Workbook, ReportError> {
    let mut book = Workbook::new();
    for sheet in &workbook.sheets {
        let worksheet = book.add_worksheet();
        write_sheet(worksheet, sheet)?;
    }
    Ok(book)
}

impl ReportSink for XlsxWorkbookWriter {
    fn write(&self, workbook: &ReportWorkbook) -> Result<Vec<PathBuf>, ReportError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut book = build(workbook)?;
        book.save(&self.path)?;

        info!(
            path = %self.path.display(),
            sheets = workbook.sheets.len(),
            "Workbook written"
        );

        Ok(vec![self.path.clone()])
    }
}
