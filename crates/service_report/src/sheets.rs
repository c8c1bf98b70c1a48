//! Tabular layout of a reconciliation outcome.
//!
//! Builds the named sheets independently of any file format. Numbers keep
//! full precision; rounding only ever happens inside classification.

use recon_core::pipeline::ReconciliationOutcome;
use recon_core::rate::RateComparisonRow;
use recon_core::reconcile::{MatchStatus, ReconciliationRow};
use recon_core::types::GroupKey;

/// Sheet name of the rate view.
pub const RATE_COMPARISON_SHEET: &str = "Rate_Comparison";

/// Columns of the four bucket sheets.
pub const BUCKET_COLUMNS: [&str; 9] = [
    "CB",
    "Date",
    "Account",
    "Qty_Atlantis",
    "Fee_Atlantis",
    "Qty_GMI",
    "Fee_GMI",
    "Qty_Diff",
    "Fee_Diff",
];

/// Columns of the rate sheet.
pub const RATE_COLUMNS: [&str; 6] = ["CB", "Date", "Account", "Rate_Atlantis", "Rate_GMI", "Rate_Diff"];

/// One output cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// Text value
    Text(String),
    /// Numeric value at full precision
    Number(f64),
    /// Missing value
    Blank,
}

impl Cell {
    /// Text form used by delimited output.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Blank => String::new(),
        }
    }
}

/// A named table.
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    /// Sheet name
    pub name: String,
    /// Header row
    pub headers: Vec<String>,
    /// Data rows, each `headers.len()` wide
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    fn new(name: &str, headers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Ordered collection of sheets to export.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportWorkbook {
    /// Sheets in export order
    pub sheets: Vec<Sheet>,
}

fn key_cells(key: &GroupKey) -> [Cell; 3] {
    [
        Cell::Text(key.cb().to_string()),
        key.date()
            .map(|d| Cell::Text(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(Cell::Blank),
        key.account()
            .map(|a| Cell::Text(a.to_string()))
            .unwrap_or(Cell::Blank),
    ]
}

fn bucket_row(row: &ReconciliationRow) -> Vec<Cell> {
    let mut cells: Vec<Cell> = key_cells(&row.key).into_iter().collect();
    cells.extend(
        [
            row.qty_atlantis,
            row.fee_atlantis,
            row.qty_gmi,
            row.fee_gmi,
            row.qty_diff,
            row.fee_diff,
        ]
        .into_iter()
        .map(Cell::Number),
    );
    cells
}

fn rate_row(row: &RateComparisonRow) -> Vec<Cell> {
    let mut cells: Vec<Cell> = key_cells(row.key()).into_iter().collect();
    cells.extend(
        [row.rate_atlantis, row.rate_gmi, row.rate_diff]
            .into_iter()
            .map(Cell::Number),
    );
    cells
}

impl ReportWorkbook {
    /// Lay out an outcome: four bucket sheets, plus the rate sheet when present.
    ///
    /// # Examples
    ///
    /// ```
    /// use recon_core::prelude::*;
    /// use service_report::ReportWorkbook;
    ///
    /// let atlantis = RawTable::from_slices(&["RecordType", "ExchangeEBCode", "TradeDate", "Quantity", "GiveUpAmt", "ClearingAccount"], &[]);
    /// let gmi = RawTable::from_slices(&["TGIVF#", "TEDATE", "TQTY", "TFEE5", "Acct", "TGIVIO"], &[]);
    /// let outcome = Pipeline::preset(PipelineKind::Go).run(&atlantis, &gmi).unwrap();
    ///
    /// let workbook = ReportWorkbook::from_outcome(&outcome);
    /// let names: Vec<_> = workbook.sheets.iter().map(|s| s.name.as_str()).collect();
    /// assert_eq!(names, ["Matched", "Qty_Match_Only", "Fee_Match_Only", "No_Match"]);
    /// ```
    pub fn from_outcome(outcome: &ReconciliationOutcome) -> Self {
        let mut sheets: Vec<Sheet> = MatchStatus::ALL
            .iter()
            .map(|status| {
                let mut sheet = Sheet::new(status.sheet_name(), &BUCKET_COLUMNS);
                sheet.rows = outcome.buckets.get(*status).iter().map(bucket_row).collect();
                sheet
            })
            .collect();

        if let Some(rates) = &outcome.rate_comparison {
            let mut sheet = Sheet::new(RATE_COMPARISON_SHEET, &RATE_COLUMNS);
            sheet.rows = rates.iter().map(rate_row).collect();
            sheets.push(sheet);
        }

        Self { sheets }
    }

    /// Find a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
