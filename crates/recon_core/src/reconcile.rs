//! Outer join of both sources and match classification.
//!
//! Fees are compared as a *sum* (`fee_atlantis + fee_gmi`): the two feeds
//! report give-up fees with opposite signs, so agreement shows up as a zero
//! sum. Quantities carry the same sign on both sides and are subtracted.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::aggregate::AggregateRow;
use crate::types::GroupKey;

/// Sub-cent grid the value is snapped to before rounding (1e-6 of a cent).
const CENT_SNAP: f64 = 1e6;

/// Round to two decimals, half away from zero.
///
/// The value is first snapped to a fine decimal grid so representation
/// error cannot move a half-cent below the midpoint: `100.006 - 100.001`
/// is `0.004999999...` in binary and still rounds to `0.01`.
///
/// # Examples
///
/// ```
/// use recon_core::reconcile::round_to_cents;
///
/// assert_eq!(round_to_cents(100.004 - 100.001), 0.0);
/// assert_eq!(round_to_cents(100.006 - 100.001), 0.01);
/// assert_eq!(round_to_cents(0.005), 0.01);
/// assert_eq!(round_to_cents(-0.005), -0.01);
/// ```
#[inline]
pub fn round_to_cents(x: f64) -> f64 {
    let cents = (x * 100.0 * CENT_SNAP).round() / CENT_SNAP;
    cents.round() / 100.0
}

/// Whether a difference is zero after rounding to cents.
#[inline]
pub fn is_zero_at_cents(x: f64) -> bool {
    round_to_cents(x) == 0.0
}

/// Match state of one group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MatchStatus {
    /// Quantity and fee agree
    Matched,
    /// Quantity agrees, fee does not
    QtyMatchOnly,
    /// Fee agrees, quantity does not
    FeeMatchOnly,
    /// Neither agrees
    NoMatch,
}

impl MatchStatus {
    /// All states in report order.
    pub const ALL: [MatchStatus; 4] = [
        MatchStatus::Matched,
        MatchStatus::QtyMatchOnly,
        MatchStatus::FeeMatchOnly,
        MatchStatus::NoMatch,
    ];

    /// Classify from raw (unrounded) differences.
    pub fn classify(qty_diff: f64, fee_diff: f64) -> Self {
        match (is_zero_at_cents(qty_diff), is_zero_at_cents(fee_diff)) {
            (true, true) => MatchStatus::Matched,
            (true, false) => MatchStatus::QtyMatchOnly,
            (false, true) => MatchStatus::FeeMatchOnly,
            (false, false) => MatchStatus::NoMatch,
        }
    }

    /// Export sheet name.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            MatchStatus::Matched => "Matched",
            MatchStatus::QtyMatchOnly => "Qty_Match_Only",
            MatchStatus::FeeMatchOnly => "Fee_Match_Only",
            MatchStatus::NoMatch => "No_Match",
        }
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            MatchStatus::Matched => "Full Matches (Qty + Fee)",
            MatchStatus::QtyMatchOnly => "Qty Match Only (Fee mismatch)",
            MatchStatus::FeeMatchOnly => "Fee Match Only (Qty mismatch)",
            MatchStatus::NoMatch => "No Match (Qty + Fee mismatch)",
        }
    }

    /// Whether this state is a break.
    pub fn is_break(&self) -> bool {
        !matches!(self, MatchStatus::Matched)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

/// One group key joined across both sources.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReconciliationRow {
    /// Group key
    pub key: GroupKey,
    /// Atlantis quantity (0 when absent)
    pub qty_atlantis: f64,
    /// Atlantis fee (0 when absent)
    pub fee_atlantis: f64,
    /// GMI quantity (0 when absent)
    pub qty_gmi: f64,
    /// GMI fee (0 when absent)
    pub fee_gmi: f64,
    /// `qty_atlantis - qty_gmi`
    pub qty_diff: f64,
    /// `fee_atlantis + fee_gmi`
    pub fee_diff: f64,
    /// Classification
    pub status: MatchStatus,
}

impl ReconciliationRow {
    /// Build a row from both sides' sums, computing diffs and status.
    pub fn new(key: GroupKey, qty_atlantis: f64, fee_atlantis: f64, qty_gmi: f64, fee_gmi: f64) -> Self {
        let qty_diff = qty_atlantis - qty_gmi;
        let fee_diff = fee_atlantis + fee_gmi;
        Self {
            key,
            qty_atlantis,
            fee_atlantis,
            qty_gmi,
            fee_gmi,
            qty_diff,
            fee_diff,
            status: MatchStatus::classify(qty_diff, fee_diff),
        }
    }
}

#[derive(Default)]
struct JoinSlot {
    qty_atlantis: f64,
    fee_atlantis: f64,
    qty_gmi: f64,
    fee_gmi: f64,
}

/// Outer-join both sources' aggregates on group key and classify.
///
/// Exactly one row per key present in either input, sorted by key. A key
/// absent from one side gets zeros for that side.
pub fn reconcile(atlantis: &[AggregateRow], gmi: &[AggregateRow]) -> Vec<ReconciliationRow> {
    let mut joined: BTreeMap<&GroupKey, JoinSlot> = BTreeMap::new();

    for row in atlantis {
        let slot = joined.entry(&row.key).or_default();
        slot.qty_atlantis += row.qty;
        slot.fee_atlantis += row.fee;
    }
    for row in gmi {
        let slot = joined.entry(&row.key).or_default();
        slot.qty_gmi += row.qty;
        slot.fee_gmi += row.fee;
    }

    joined
        .into_iter()
        .map(|(key, s)| {
            ReconciliationRow::new(key.clone(), s.qty_atlantis, s.fee_atlantis, s.qty_gmi, s.fee_gmi)
        })
        .collect()
}

/// Reconciliation rows split by match state.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Buckets {
    /// Quantity and fee agree
    pub matched: Vec<ReconciliationRow>,
    /// Quantity agrees only
    pub qty_match_only: Vec<ReconciliationRow>,
    /// Fee agrees only
    pub fee_match_only: Vec<ReconciliationRow>,
    /// Neither agrees
    pub no_match: Vec<ReconciliationRow>,
}

impl Buckets {
    /// Partition rows by their status, preserving order within each bucket.
    pub fn split(rows: impl IntoIterator<Item = ReconciliationRow>) -> Self {
        let mut buckets = Self::default();
        for row in rows {
            buckets.bucket_mut(row.status).push(row);
        }
        buckets
    }

    fn bucket_mut(&mut self, status: MatchStatus) -> &mut Vec<ReconciliationRow> {
        match status {
            MatchStatus::Matched => &mut self.matched,
            MatchStatus::QtyMatchOnly => &mut self.qty_match_only,
            MatchStatus::FeeMatchOnly => &mut self.fee_match_only,
            MatchStatus::NoMatch => &mut self.no_match,
        }
    }

    /// Rows in one bucket.
    pub fn get(&self, status: MatchStatus) -> &[ReconciliationRow] {
        match status {
            MatchStatus::Matched => &self.matched,
            MatchStatus::QtyMatchOnly => &self.qty_match_only,
            MatchStatus::FeeMatchOnly => &self.fee_match_only,
            MatchStatus::NoMatch => &self.no_match,
        }
    }

    /// Buckets in report order.
    pub fn iter(&self) -> impl Iterator<Item = (MatchStatus, &[ReconciliationRow])> + '_ {
        MatchStatus::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    /// Total rows across all buckets.
    pub fn len(&self) -> usize {
        self.iter().map(|(_, rows)| rows.len()).sum()
    }

    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows not fully matched.
    pub fn breaks(&self) -> usize {
        self.iter()
            .filter(|(status, _)| status.is_break())
            .map(|(_, rows)| rows.len())
            .sum()
    }
}
