//! # adapter_loader: Tabular Input Adapter
//!
//! Loads an uploaded trade file into a [`RawTable`] for the reconciliation
//! kernel. The format is chosen by file extension:
//!
//! - `.csv` → delimited text via the `csv` crate
//! - `.xls` / `.xlsx` → first worksheet via `calamine`
//! - anything else → [`LoaderError::UnsupportedFileType`]
//!
//! Header names are passed through untouched; trimming and case folding are
//! the normaliser's job.

mod csv_source;
mod error;
mod kind;
mod spreadsheet;

pub use csv_source::load_csv_reader;
pub use error::LoaderError;
pub use kind::FileKind;
pub use recon_core::table::RawTable;
pub use spreadsheet::load_spreadsheet;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Load a tabular file, dispatching on its extension.
pub fn load_table(path: impl AsRef<Path>) -> Result<RawTable, LoaderError> {
    let path = path.as_ref();
    let kind = FileKind::from_path(path)?;

    if !path.exists() {
        return Err(LoaderError::FileNotFound(path.to_path_buf()));
    }

    let table = match kind {
        FileKind::Csv => load_csv_reader(BufReader::new(File::open(path)?))?,
        FileKind::Spreadsheet => load_spreadsheet(path)?,
    };

    info!(
        path = %path.display(),
        kind = kind.name(),
        columns = table.headers().len(),
        rows = table.len(),
        "Loaded table"
    );

    Ok(table)
}
