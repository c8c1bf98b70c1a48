//! CSV directory output.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ReportError;
use crate::sheets::ReportWorkbook;
use crate::ReportSink;

/// Writes each sheet to `<dir>/<Sheet>.csv`.
#[derive(Debug, Clone)]
pub struct CsvDirWriter {
    output_dir: PathBuf,
}

impl CsvDirWriter {
    /// Create a writer targeting `output_dir`.
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Get output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl ReportSink for CsvDirWriter {
    fn write(&self, workbook: &ReportWorkbook) -> Result<Vec<PathBuf>, ReportError> {
        if self.output_dir.is_file() {
            return Err(ReportError::InvalidDestination(self.output_dir.clone()));
        }
        fs::create_dir_all(&self.output_dir)?;

        let mut written = Vec::with_capacity(workbook.sheets.len());
        for sheet in &workbook.sheets {
            let path = self.output_dir.join(format!("{}.csv", sheet.name));
            let mut wtr = csv::Writer::from_path(&path)?;
            wtr.write_record(&sheet.headers)?;
            for row in &sheet.rows {
                wtr.write_record(row.iter().map(|c| c.to_text()))?;
            }
            wtr.flush()?;

            info!(path = %path.display(), rows = sheet.rows.len(), "Sheet written");
            written.push(path);
        }

        Ok(written)
    }
}
