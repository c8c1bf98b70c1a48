//! Column resolution.
//!
//! Maps a source's raw header onto canonical fields, returning a typed
//! [`SchemaError`] listing every required column that could not be found.

use crate::config::PipelineConfig;
use crate::types::{SchemaError, Source};

/// A resolved source column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnRef {
    /// Position in the raw header
    pub index: usize,
    /// Header text as supplied (untrimmed)
    pub header: String,
}

/// Row filter: keep rows whose cell equals `expected` exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowFilter {
    /// Column holding the flag
    pub column: ColumnRef,
    /// Value a row must carry to be kept
    pub expected: String,
}

impl RowFilter {
    /// Whether a cell value passes the filter (exact, case-sensitive match).
    #[inline]
    pub fn accepts(&self, value: &str) -> bool {
        value == self.expected
    }
}

/// Canonical field bindings for one source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedColumns {
    /// Source these bindings belong to
    pub side: Source,
    /// Broker code
    pub cb: ColumnRef,
    /// Trade date
    pub date: ColumnRef,
    /// Quantity
    pub qty: ColumnRef,
    /// Fee
    pub fee: ColumnRef,
    /// Clearing account
    pub account: ColumnRef,
    /// Give-up rate, when the pipeline compares rates
    pub rate: Option<ColumnRef>,
    /// Record filter applied before projection
    pub filter: Option<RowFilter>,
}

impl ResolvedColumns {
    /// Canonical name / source column pairs, in canonical order.
    pub fn bindings(&self) -> Vec<(&'static str, &ColumnRef)> {
        let mut out = vec![
            ("CB", &self.cb),
            ("Date", &self.date),
            ("Qty", &self.qty),
            ("Fee", &self.fee),
            ("Account", &self.account),
        ];
        if let Some(rate) = &self.rate {
            out.push(("Rate", rate));
        }
        out
    }
}

/// Trimmed header lookup with per-source case sensitivity.
struct HeaderIndex<'a> {
    headers: &'a [String],
    case_insensitive: bool,
}

impl<'a> HeaderIndex<'a> {
    fn new(headers: &'a [String], side: Source) -> Self {
        Self {
            headers,
            case_insensitive: side.case_insensitive_headers(),
        }
    }

    /// First header matching `name` after trimming.
    fn find(&self, name: &str) -> Option<ColumnRef> {
        let wanted = name.trim();
        let wanted_lower = wanted.to_lowercase();
        self.headers
            .iter()
            .position(|h| {
                let h = h.trim();
                if self.case_insensitive {
                    h.to_lowercase() == wanted_lower
                } else {
                    h == wanted
                }
            })
            .map(|index| ColumnRef {
                index,
                header: self.headers[index].clone(),
            })
    }
}

/// A header lookup; the error carries the column name that was not found.
type Lookup<T> = Result<T, String>;

impl HeaderIndex<'_> {
    fn require(&self, name: &str) -> Lookup<ColumnRef> {
        self.find(name).ok_or_else(|| name.trim().to_string())
    }

    /// Required only when `enabled`; `Ok(None)` otherwise.
    fn require_if(&self, enabled: bool, name: &str) -> Lookup<Option<ColumnRef>> {
        if enabled {
            self.require(name).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Resolve a source header against the pipeline's column map.
///
/// Atlantis headers match case-sensitively, GMI headers case-insensitively;
/// both are trimmed first. The GMI account column is the preferred `Acct`
/// column when present, otherwise `Account`; if neither exists the error names
/// both.
///
/// # Examples
///
/// ```
/// use recon_core::config::PipelineConfig;
/// use recon_core::schema::resolve_columns;
/// use recon_core::types::Source;
///
/// let headers: Vec<String> = ["tgivf#", " TEDATE", "tqty", "TFee5", "ACCOUNT"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let resolved = resolve_columns(&headers, Source::Gmi, &PipelineConfig::tp()).unwrap();
/// assert_eq!(resolved.account.index, 4);
/// assert!(resolved.rate.is_none());
/// ```
pub fn resolve_columns(
    headers: &[String],
    side: Source,
    config: &PipelineConfig,
) -> Result<ResolvedColumns, SchemaError> {
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(SchemaError::EmptyHeader { side });
    }

    let index = HeaderIndex::new(headers, side);

    let (cb, date, qty, fee, account, rate, filter) = match side {
        Source::Atlantis => {
            let names = &config.atlantis;
            let filter = index.require(&names.record_type).map(|column| {
                Some(RowFilter {
                    column,
                    expected: config.record_type.trim().to_string(),
                })
            });
            (
                index.require(&names.cb),
                index.require(&names.date),
                index.require(&names.qty),
                index.require(&names.fee),
                index.require(&names.account),
                index.require_if(config.rate_comparison, &names.rate),
                filter,
            )
        }
        Source::Gmi => {
            let names = &config.gmi;
            let account = index
                .find(&names.account)
                .or_else(|| index.find(&names.account_fallback))
                .ok_or_else(|| {
                    format!(
                        "{} or {}",
                        names.account.trim(),
                        names.account_fallback.trim()
                    )
                });
            let filter = match &config.gmi_flag {
                Some(expected) => index.require(&names.flag).map(|column| {
                    Some(RowFilter {
                        column,
                        expected: expected.trim().to_string(),
                    })
                }),
                None => Ok(None),
            };
            (
                index.require(&names.cb),
                index.require(&names.date),
                index.require(&names.qty),
                index.require(&names.fee),
                account,
                Ok(None),
                filter,
            )
        }
    };

    match (cb, date, qty, fee, account, rate, filter) {
        (Ok(cb), Ok(date), Ok(qty), Ok(fee), Ok(account), Ok(rate), Ok(filter)) => {
            Ok(ResolvedColumns {
                side,
                cb,
                date,
                qty,
                fee,
                account,
                rate,
                filter,
            })
        }
        (cb, date, qty, fee, account, rate, filter) => {
            // RecordType leads the Atlantis list; TGIVIO trails the GMI one.
            let filter = filter.err();
            let (lead, trail) = match side {
                Source::Atlantis => (filter, None),
                Source::Gmi => (None, filter),
            };
            let columns: Vec<String> = [
                lead,
                cb.err(),
                date.err(),
                qty.err(),
                fee.err(),
                account.err(),
                rate.err(),
                trail,
            ]
            .into_iter()
            .flatten()
            .collect();
            Err(SchemaError::MissingColumns { side, columns })
        }
    }
}
