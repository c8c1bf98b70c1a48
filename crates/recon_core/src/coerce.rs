//! Type coercion of normalised rows.
//!
//! Parsing never fails for the caller: a value that cannot be parsed becomes
//! `None` and is tallied in [`DataQuality`]. Missing quantities and fees count
//! as zero at aggregation time; missing dates and accounts stay `None` and act
//! as their own group-key value.

use chrono::NaiveDate;
use serde::Serialize;

use crate::schema::NormalizedRow;
use crate::types::{CanonicalRecord, Source};

/// Outcome of parsing one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Parsed<T> {
    Value(T),
    Blank,
    Invalid,
}

impl<T> Parsed<T> {
    fn value(self) -> Option<T> {
        match self {
            Parsed::Value(v) => Some(v),
            Parsed::Blank | Parsed::Invalid => None,
        }
    }
}

fn classify_date(raw: &str) -> Parsed<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return Parsed::Blank;
    }
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Parsed::Invalid;
    }
    let year = s[0..4].parse::<i32>();
    let month = s[4..6].parse::<u32>();
    let day = s[6..8].parse::<u32>();
    match (year, month, day) {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d)
            .map(Parsed::Value)
            .unwrap_or(Parsed::Invalid),
        _ => Parsed::Invalid,
    }
}

fn classify_number(raw: &str) -> Parsed<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Parsed::Blank;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Parsed::Value(v),
        _ => Parsed::Invalid,
    }
}

/// Parse an exact 8-digit `YYYYMMDD` trade date.
///
/// Wrong length, non-digits and impossible calendar dates yield `None`.
///
/// # Examples
///
/// ```
/// use recon_core::coerce::parse_trade_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_trade_date("20240105"), NaiveDate::from_ymd_opt(2024, 1, 5));
/// assert_eq!(parse_trade_date("20240230"), None);
/// assert_eq!(parse_trade_date("2024-01-05"), None);
/// ```
pub fn parse_trade_date(raw: &str) -> Option<NaiveDate> {
    classify_date(raw).value()
}

/// Parse a signed decimal number; empty, non-numeric and non-finite yield `None`.
///
/// # Examples
///
/// ```
/// use recon_core::coerce::parse_number;
///
/// assert_eq!(parse_number(" -50.25 "), Some(-50.25));
/// assert_eq!(parse_number("1,000"), None);
/// assert_eq!(parse_number("NaN"), None);
/// ```
pub fn parse_number(raw: &str) -> Option<f64> {
    classify_number(raw).value()
}

/// Account identifier, kept verbatim; an empty cell yields `None`.
///
/// Unlike the broker code, accounts are not trimmed: `"ACC1 "` and `"ACC1"`
/// group separately.
pub fn parse_account(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Per-source tally of fields that could not be typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DataQuality {
    /// Records coerced
    pub records: usize,
    /// Empty date cells
    pub blank_dates: usize,
    /// Non-empty date cells that are not a valid `YYYYMMDD` date
    pub invalid_dates: usize,
    /// Empty quantity cells
    pub blank_quantities: usize,
    /// Non-numeric quantity cells
    pub invalid_quantities: usize,
    /// Empty fee cells
    pub blank_fees: usize,
    /// Non-numeric fee cells
    pub invalid_fees: usize,
    /// Non-numeric rate cells (empty rate cells are not counted)
    pub invalid_rates: usize,
    /// Empty account cells
    pub blank_accounts: usize,
}

impl DataQuality {
    /// Whether any field had to be treated as missing.
    pub fn has_issues(&self) -> bool {
        self.total_issues() > 0
    }

    /// Sum of all tallied issues.
    pub fn total_issues(&self) -> usize {
        self.blank_dates
            + self.invalid_dates
            + self.blank_quantities
            + self.invalid_quantities
            + self.blank_fees
            + self.invalid_fees
            + self.invalid_rates
            + self.blank_accounts
    }

    /// Human-readable issue lines naming the source.
    pub fn messages(&self, side: Source) -> Vec<String> {
        [
            (self.blank_dates, "blank trade date(s), grouped as missing"),
            (self.invalid_dates, "unparseable trade date(s), grouped as missing"),
            (self.blank_quantities, "blank quantity value(s), summed as 0"),
            (self.invalid_quantities, "non-numeric quantity value(s), summed as 0"),
            (self.blank_fees, "blank fee value(s), summed as 0"),
            (self.invalid_fees, "non-numeric fee value(s), summed as 0"),
            (self.invalid_rates, "non-numeric rate value(s), excluded from the mean"),
            (self.blank_accounts, "blank account(s), grouped as missing"),
        ]
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, what)| format!("{}: {} {}", side, count, what))
        .collect()
    }

    fn tally_date(&mut self, parsed: &Parsed<NaiveDate>) {
        match parsed {
            Parsed::Blank => self.blank_dates += 1,
            Parsed::Invalid => self.invalid_dates += 1,
            Parsed::Value(_) => {}
        }
    }
}

/// Typed records of one source plus their data-quality tally.
#[derive(Clone, Debug, Default)]
pub struct CoercedRecords {
    /// Canonical records, one per normalised row
    pub records: Vec<CanonicalRecord>,
    /// Issues encountered while typing
    pub quality: DataQuality,
}

/// Coerce one normalised row.
pub fn coerce_row(row: &NormalizedRow<'_>, quality: &mut DataQuality) -> CanonicalRecord {
    let date = classify_date(row.date);
    quality.tally_date(&date);

    let qty = classify_number(row.qty);
    match qty {
        Parsed::Blank => quality.blank_quantities += 1,
        Parsed::Invalid => quality.invalid_quantities += 1,
        Parsed::Value(_) => {}
    }

    let fee = classify_number(row.fee);
    match fee {
        Parsed::Blank => quality.blank_fees += 1,
        Parsed::Invalid => quality.invalid_fees += 1,
        Parsed::Value(_) => {}
    }

    let rate = row.rate.map(classify_number);
    if let Some(Parsed::Invalid) = rate {
        quality.invalid_rates += 1;
    }

    let account = parse_account(row.account);
    if account.is_none() {
        quality.blank_accounts += 1;
    }

    quality.records += 1;

    CanonicalRecord {
        cb: row.cb.trim().to_string(),
        date: date.value(),
        qty: qty.value(),
        fee: fee.value(),
        account,
        rate: rate.and_then(Parsed::value),
    }
}

/// Coerce every normalised row of one source.
pub fn coerce_rows(rows: &[NormalizedRow<'_>]) -> CoercedRecords {
    let mut quality = DataQuality::default();
    let records = rows
        .iter()
        .map(|row| coerce_row(row, &mut quality))
        .collect();
    CoercedRecords { records, quality }
}
