//! Source identifiers and canonical records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::key::GroupKey;

/// The two independently produced datasets being reconciled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Front-office record
    Atlantis,
    /// Clearing-house record
    Gmi,
}

impl Source {
    /// Display name used in messages and column suffixes.
    pub fn name(&self) -> &'static str {
        match self {
            Source::Atlantis => "Atlantis",
            Source::Gmi => "GMI",
        }
    }

    /// Whether header matching for this source ignores case.
    ///
    /// GMI extracts arrive with inconsistently cased headers.
    pub fn case_insensitive_headers(&self) -> bool {
        matches!(self, Source::Gmi)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "atlantis" => Ok(Source::Atlantis),
            "gmi" => Ok(Source::Gmi),
            other => Err(format!("Unknown source: {}. Supported: atlantis, gmi", other)),
        }
    }
}

/// A normalised, typed trade record.
///
/// Every canonical record traces to exactly one raw row. Unparseable fields
/// are `None` rather than errors.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanonicalRecord {
    /// Give-up broker code, whitespace-trimmed
    pub cb: String,
    /// Trade date
    pub date: Option<NaiveDate>,
    /// Signed quantity
    pub qty: Option<f64>,
    /// Signed fee amount
    pub fee: Option<f64>,
    /// Clearing account identifier
    pub account: Option<String>,
    /// Give-up rate (Atlantis TP only)
    pub rate: Option<f64>,
}

impl CanonicalRecord {
    /// Key this record aggregates under.
    pub fn group_key(&self) -> GroupKey {
        GroupKey::new(&self.cb, self.date, self.account.clone())
    }

    /// Quantity with missing treated as zero.
    #[inline]
    pub fn qty_or_zero(&self) -> f64 {
        self.qty.unwrap_or(0.0)
    }

    /// Fee with missing treated as zero.
    #[inline]
    pub fn fee_or_zero(&self) -> f64 {
        self.fee.unwrap_or(0.0)
    }
}
