//! Raw tabular input as produced by a loader.
//!
//! A [`RawTable`] is the untrusted, source-shaped view of one uploaded file:
//! header names exactly as supplied and every cell rendered as text.

/// Header names plus rows of text cells.
///
/// Rows may be shorter than the header; missing trailing cells read as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Convenience constructor from string slices.
    ///
    /// # Examples
    ///
    /// ```
    /// use recon_core::table::RawTable;
    ///
    /// let table = RawTable::from_slices(&["A", "B"], &[&["1", "2"], &["3"]]);
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.cell(1, 1), "");
    /// ```
    pub fn from_slices(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    /// Header names as supplied.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text at `(row, column)`, empty when out of range.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Read a cell from a row slice, empty when the row is short.
#[inline]
pub(crate) fn cell_of(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}
