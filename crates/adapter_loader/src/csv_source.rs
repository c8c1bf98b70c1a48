//! Delimited-text loading.

use recon_core::table::RawTable;
use std::io::Read;

use crate::error::LoaderError;

/// Read a CSV stream whose first record is the header.
///
/// Rows may vary in length. Rows whose cells are all blank are dropped.
///
/// # Examples
///
/// ```
/// use adapter_loader::load_csv_reader;
///
/// let table = load_csv_reader("TQTY,Acct\n5,A1\n\n7\n".as_bytes()).unwrap();
/// assert_eq!(table.headers(), &["TQTY".to_string(), "Acct".to_string()]);
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.cell(1, 1), "");
/// ```
pub fn load_csv_reader<R: Read>(reader: R) -> Result<RawTable, LoaderError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(headers, rows))
}
