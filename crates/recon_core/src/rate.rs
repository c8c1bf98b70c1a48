//! Give-up rate comparison.
//!
//! A secondary diagnostic view: the mean Atlantis give-up rate per group
//! against the rate implied by GMI's summed fee and quantity. Like fees, the
//! rates are sign-opposed, so `rate_diff` is a sum.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregate::NeumaierSum;
use crate::reconcile::ReconciliationRow;
use crate::types::{CanonicalRecord, GroupKey};

/// A reconciliation row with its rate comparison.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RateComparisonRow {
    /// Underlying reconciliation row
    pub row: ReconciliationRow,
    /// Mean Atlantis give-up rate (0 when the group has none)
    pub rate_atlantis: f64,
    /// `fee_gmi / qty_gmi`, 0 when `qty_gmi` is 0
    pub rate_gmi: f64,
    /// `rate_atlantis + rate_gmi`
    pub rate_diff: f64,
}

impl RateComparisonRow {
    /// Group key.
    pub fn key(&self) -> &GroupKey {
        &self.row.key
    }
}

/// Rate implied by GMI's fee and quantity; 0 when quantity is exactly 0.
#[inline]
pub fn implied_rate(fee: f64, qty: f64) -> f64 {
    if qty == 0.0 {
        0.0
    } else {
        fee / qty
    }
}

/// Mean rate per group over records that carry a rate.
///
/// Groups without any rate-bearing record are absent from the map.
pub fn mean_rates(records: &[CanonicalRecord]) -> BTreeMap<GroupKey, f64> {
    let mut sums: BTreeMap<GroupKey, (NeumaierSum, usize)> = BTreeMap::new();
    for record in records {
        if let Some(rate) = record.rate {
            let entry = sums.entry(record.group_key()).or_default();
            entry.0.add(rate);
            entry.1 += 1;
        }
    }
    sums.into_iter()
        .map(|(key, (sum, n))| (key, sum.value() / n as f64))
        .collect()
}

/// Left-join mean Atlantis rates onto every reconciliation row.
///
/// # Examples
///
/// ```
/// use recon_core::rate::compare_rates;
/// use recon_core::reconcile::ReconciliationRow;
/// use recon_core::types::{CanonicalRecord, GroupKey};
///
/// let key = GroupKey::new("AB1", None, Some("ACC1".to_string()));
/// let row = ReconciliationRow::new(key, 100.0, 50.0, 100.0, -50.0);
/// let record = CanonicalRecord {
///     cb: "AB1".to_string(),
///     date: None,
///     qty: Some(100.0),
///     fee: Some(50.0),
///     account: Some("ACC1".to_string()),
///     rate: Some(0.5),
/// };
/// let rates = compare_rates(&[record], &[row]);
/// assert_eq!(rates[0].rate_atlantis, 0.5);
/// assert_eq!(rates[0].rate_gmi, -0.5);
/// assert_eq!(rates[0].rate_diff, 0.0);
/// ```
pub fn compare_rates(
    atlantis_records: &[CanonicalRecord],
    rows: &[ReconciliationRow],
) -> Vec<RateComparisonRow> {
    let means = mean_rates(atlantis_records);
    rows.iter()
        .map(|row| {
            let rate_atlantis = means.get(&row.key).copied().unwrap_or(0.0);
            let rate_gmi = implied_rate(row.fee_gmi, row.qty_gmi);
            RateComparisonRow {
                row: row.clone(),
                rate_atlantis,
                rate_gmi,
                rate_diff: rate_atlantis + rate_gmi,
            }
        })
        .collect()
}
