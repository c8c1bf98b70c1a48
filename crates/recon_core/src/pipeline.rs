//! End-to-end reconciliation pipeline.
//!
//! Stages run strictly forward, each returning a new value:
//!
//! ```text
//! RawTable ─normalize─▶ NormalizedTable ─coerce─▶ CanonicalRecord[]
//!          ─aggregate─▶ AggregateRow[] ─reconcile─▶ ReconciliationRow[]
//!          ─compare_rates─▶ RateComparisonRow[]   (when enabled)
//! ```
//!
//! Both sources are normalised before any aggregation, so a schema error on
//! either side aborts the run without producing tables.

use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::aggregate::aggregate;
use crate::coerce::{coerce_rows, DataQuality};
use crate::config::{PipelineConfig, PipelineKind};
use crate::rate::{compare_rates, RateComparisonRow};
use crate::reconcile::{reconcile, Buckets};
use crate::schema::{normalize, ResolvedColumns};
use crate::table::RawTable;
use crate::types::{CanonicalRecord, ReconError, SchemaError, Source};

/// One source after normalisation and coercion.
#[derive(Clone, Debug)]
pub struct PreparedSource {
    /// Which feed this is
    pub side: Source,
    /// Column bindings used
    pub columns: ResolvedColumns,
    /// Rows in the raw table before filtering
    pub rows_read: usize,
    /// Typed records after filtering
    pub records: Vec<CanonicalRecord>,
    /// Fields that had to be treated as missing
    pub quality: DataQuality,
}

/// Counts describing one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Atlantis rows read
    pub atlantis_rows_read: usize,
    /// Atlantis records kept by the filter
    pub atlantis_records: usize,
    /// Atlantis groups
    pub atlantis_groups: usize,
    /// GMI rows read
    pub gmi_rows_read: usize,
    /// GMI records kept by the filter
    pub gmi_records: usize,
    /// GMI groups
    pub gmi_groups: usize,
    /// Fully matched groups
    pub matched: usize,
    /// Quantity-only matches
    pub qty_match_only: usize,
    /// Fee-only matches
    pub fee_match_only: usize,
    /// Unmatched groups
    pub no_match: usize,
}

impl RunSummary {
    /// Reconciled groups across all buckets.
    pub fn total_groups(&self) -> usize {
        self.matched + self.qty_match_only + self.fee_match_only + self.no_match
    }

    /// Groups that are not fully matched.
    pub fn breaks(&self) -> usize {
        self.total_groups() - self.matched
    }
}

/// Complete result of one reconciliation run.
#[derive(Clone, Debug, Serialize)]
pub struct ReconciliationOutcome {
    /// Pipeline variant that produced this outcome
    pub kind: PipelineKind,
    /// Rows split by match state
    pub buckets: Buckets,
    /// Rate view, when the pipeline compares rates
    pub rate_comparison: Option<Vec<RateComparisonRow>>,
    /// Atlantis data-quality tally
    pub atlantis_quality: DataQuality,
    /// GMI data-quality tally
    pub gmi_quality: DataQuality,
    /// Run counts
    pub summary: RunSummary,
}

impl ReconciliationOutcome {
    /// Data-quality messages from both sources ("input errors").
    pub fn input_issues(&self) -> Vec<String> {
        let mut out = self.atlantis_quality.messages(Source::Atlantis);
        out.extend(self.gmi_quality.messages(Source::Gmi));
        out
    }
}

/// A configured reconciliation pipeline.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline, validating its configuration.
    pub fn new(config: PipelineConfig) -> Result<Self, ReconError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Pipeline for a preset variant.
    pub fn preset(kind: PipelineKind) -> Self {
        Self {
            config: PipelineConfig::preset(kind),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Normalise and coerce one source table.
    pub fn prepare(&self, table: &RawTable, side: Source) -> Result<PreparedSource, SchemaError> {
        let normalized = normalize(table, side, &self.config)?;
        let coerced = coerce_rows(&normalized.rows);

        if coerced.quality.has_issues() {
            for message in coerced.quality.messages(side) {
                warn!(side = %side, "{}", message);
            }
        }

        Ok(PreparedSource {
            side,
            columns: normalized.columns,
            rows_read: normalized.rows_read,
            records: coerced.records,
            quality: coerced.quality,
        })
    }

    /// Run the full reconciliation.
    ///
    /// # Errors
    ///
    /// [`ReconError::Schema`] when either source lacks a required column; no
    /// partial result is returned.
    pub fn run(&self, atlantis: &RawTable, gmi: &RawTable) -> Result<ReconciliationOutcome, ReconError> {
        let span = info_span!("reconcile", pipeline = %self.config.kind);
        let _guard = span.enter();

        let atlantis = self.prepare(atlantis, Source::Atlantis)?;
        let gmi = self.prepare(gmi, Source::Gmi)?;

        let atlantis_groups = aggregate(&atlantis.records);
        let gmi_groups = aggregate(&gmi.records);

        let rows = reconcile(&atlantis_groups, &gmi_groups);
        let rate_comparison = self
            .config
            .rate_comparison
            .then(|| compare_rates(&atlantis.records, &rows));
        let buckets = Buckets::split(rows);

        let summary = RunSummary {
            atlantis_rows_read: atlantis.rows_read,
            atlantis_records: atlantis.records.len(),
            atlantis_groups: atlantis_groups.len(),
            gmi_rows_read: gmi.rows_read,
            gmi_records: gmi.records.len(),
            gmi_groups: gmi_groups.len(),
            matched: buckets.matched.len(),
            qty_match_only: buckets.qty_match_only.len(),
            fee_match_only: buckets.fee_match_only.len(),
            no_match: buckets.no_match.len(),
        };

        info!(
            atlantis_records = summary.atlantis_records,
            gmi_records = summary.gmi_records,
            groups = summary.total_groups(),
            matched = summary.matched,
            breaks = summary.breaks(),
            "Reconciliation completed"
        );

        Ok(ReconciliationOutcome {
            kind: self.config.kind,
            buckets,
            rate_comparison,
            atlantis_quality: atlantis.quality,
            gmi_quality: gmi.quality,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlantis() -> RawTable {
        RawTable::from_slices(
            &[
                "RecordType",
                "ExchangeEBCode",
                "TradeDate",
                "Quantity",
                "GiveUpAmt",
                "ClearingAccount",
                "GiveUpRate",
            ],
            &[
                &["TP", "AB1", "20240105", "100", "50.00", "ACC1", "0.5"],
                &["TP", "CD2", "20240105", "10", "3", "ACC2", "0.3"],
                &["TR", "AB1", "20240105", "999", "999", "ACC1", ""],
            ],
        )
    }

    fn gmi() -> RawTable {
        RawTable::from_slices(
            &["tgivf#", "tedate", "tqty", "tfee5", "acct"],
            &[
                &["AB1", "20240105", "100", "-50.00", "ACC1"],
                &["CD2", "20240105", "12", "-3", "ACC2"],
                &["EF3", "bad", "1", "-1", "ACC3"],
            ],
        )
    }

    #[test]
    fn test_run_produces_all_buckets_and_rates() {
        let outcome = Pipeline::preset(PipelineKind::Tp).run(&atlantis(), &gmi()).unwrap();
        assert_eq!(outcome.summary.atlantis_rows_read, 3);
        assert_eq!(outcome.summary.atlantis_records, 2);
        assert_eq!(outcome.summary.matched, 1);
        assert_eq!(outcome.summary.fee_match_only, 1);
        assert_eq!(outcome.summary.no_match, 1);
        assert_eq!(outcome.summary.total_groups(), 3);
        assert_eq!(outcome.summary.breaks(), 2);
        assert_eq!(outcome.rate_comparison.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn test_input_issues_reported() {
        let outcome = Pipeline::preset(PipelineKind::Tp).run(&atlantis(), &gmi()).unwrap();
        let issues = outcome.input_issues();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].starts_with("GMI: 1 unparseable trade date"));
    }

    #[test]
    fn test_rate_comparison_can_be_disabled() {
        let pipeline = Pipeline::new(PipelineConfig::tp().with_rate_comparison(false)).unwrap();
        assert!(!pipeline.config().rate_comparison);
        assert_eq!(pipeline.config().record_type, "TP");
        let outcome = pipeline.run(&atlantis(), &gmi()).unwrap();
        assert!(outcome.rate_comparison.is_none());
    }

    #[test]
    fn test_schema_error_on_either_side_aborts() {
        let bad_gmi = RawTable::from_slices(&["TGIVF#", "TEDATE", "TQTY", "TFEE5"], &[]);
        let err = Pipeline::preset(PipelineKind::Tp).run(&atlantis(), &bad_gmi).unwrap_err();
        assert!(matches!(err, ReconError::Schema(SchemaError::MissingColumns { side: Source::Gmi, .. })));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PipelineConfig::go();
        config.record_type.clear();
        assert!(Pipeline::new(config).is_err());
    }
}
