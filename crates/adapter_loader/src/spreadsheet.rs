//! Excel workbook loading.
//!
//! Reads the first worksheet; its first row is the header. Cells are rendered
//! to text so both sources reach the normaliser in the same shape.

use calamine::{open_workbook_auto, Data, Reader};
use recon_core::table::RawTable;
use std::path::Path;

use crate::error::LoaderError;

/// Largest magnitude rendered as an integer without a fractional part.
const INTEGRAL_LIMIT: f64 = 1e15;

/// Render a float the way it was most likely typed.
///
/// Integral values lose their `.0` so `20240105.0` reads back as the 8-digit
/// trade date `20240105`, and numeric broker codes compare textually.
pub(crate) fn render_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < INTEGRAL_LIMIT {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => render_float(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Load the first worksheet of an `.xls`/`.xlsx` workbook.
pub fn load_spreadsheet(path: &Path) -> Result<RawTable, LoaderError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoaderError::EmptyWorkbook(path.to_path_buf()))??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(render_cell).collect(),
        None => Vec::new(),
    };

    let body = rows
        .map(|row| row.iter().map(render_cell).collect::<Vec<String>>())
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    Ok(RawTable::new(headers, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_float() {
        assert_eq!(render_float(20240105.0), "20240105");
        assert_eq!(render_float(-3.0), "-3");
        assert_eq!(render_float(0.5), "0.5");
        assert_eq!(render_float(-50.25), "-50.25");
    }

    #[test]
    fn test_render_cell() {
        assert_eq!(render_cell(&Data::Empty), "");
        assert_eq!(render_cell(&Data::String("AB1".to_string())), "AB1");
        assert_eq!(render_cell(&Data::Int(42)), "42");
        assert_eq!(render_cell(&Data::Float(100.0)), "100");
        assert_eq!(render_cell(&Data::Bool(true)), "true");
    }
}
