//! Per-source aggregation by group key.
//!
//! Records are partitioned by [`GroupKey`] and their quantities and fees
//! summed with missing values counted as zero. Sums use Neumaier compensated
//! summation so input order only affects the last bits of the result.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::{CanonicalRecord, GroupKey};

/// Neumaier (improved Kahan–Babuška) compensated sum.
///
/// # Examples
///
/// ```
/// use recon_core::aggregate::NeumaierSum;
///
/// let total: NeumaierSum = [1.0, 1e100, 1.0, -1e100].into_iter().collect();
/// assert_eq!(total.value(), 2.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NeumaierSum {
    sum: f64,
    compensation: f64,
}

impl NeumaierSum {
    /// Empty sum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one term.
    #[inline]
    pub fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    /// Compensated total.
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

impl Extend<f64> for NeumaierSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl FromIterator<f64> for NeumaierSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut sum = Self::new();
        sum.extend(iter);
        sum
    }
}

/// Summed quantity and fee for one group key of one source.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregateRow {
    /// Group key
    pub key: GroupKey,
    /// Sum of quantities (missing as 0)
    pub qty: f64,
    /// Sum of fees (missing as 0)
    pub fee: f64,
    /// Number of records in the group
    pub records: usize,
}

#[derive(Default)]
struct GroupAccumulator {
    qty: NeumaierSum,
    fee: NeumaierSum,
    records: usize,
}

/// Aggregate canonical records by (CB, Date, Account).
///
/// Grouping is total: every record lands in exactly one output row. Output is
/// sorted by key.
///
/// # Examples
///
/// ```
/// use recon_core::aggregate::aggregate;
/// use recon_core::types::CanonicalRecord;
///
/// let record = |qty| CanonicalRecord {
///     cb: "AB1".to_string(),
///     date: None,
///     qty,
///     fee: None,
///     account: Some("ACC1".to_string()),
///     rate: None,
/// };
/// let rows = aggregate(&[record(Some(10.0)), record(Some(-3.0)), record(None)]);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].qty, 7.0);
/// assert_eq!(rows[0].fee, 0.0);
/// ```
pub fn aggregate(records: &[CanonicalRecord]) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<GroupKey, GroupAccumulator> = BTreeMap::new();

    for record in records {
        let acc = groups.entry(record.group_key()).or_default();
        acc.qty.add(record.qty_or_zero());
        acc.fee.add(record.fee_or_zero());
        acc.records += 1;
    }

    groups
        .into_iter()
        .map(|(key, acc)| AggregateRow {
            key,
            qty: acc.qty.value(),
            fee: acc.fee.value(),
            records: acc.records,
        })
        .collect()
}
