//! Projection of raw rows onto the canonical schema.

use tracing::debug;

use super::columns::{resolve_columns, ResolvedColumns};
use crate::config::PipelineConfig;
use crate::table::{cell_of, RawTable};
use crate::types::{SchemaError, Source};

/// A raw row renamed onto canonical fields, still untyped.
///
/// Borrows from the [`RawTable`] it was projected from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizedRow<'a> {
    /// Broker code cell
    pub cb: &'a str,
    /// Trade date cell
    pub date: &'a str,
    /// Quantity cell
    pub qty: &'a str,
    /// Fee cell
    pub fee: &'a str,
    /// Account cell
    pub account: &'a str,
    /// Rate cell, when the pipeline compares rates
    pub rate: Option<&'a str>,
}

/// Result of normalising one source table.
#[derive(Clone, Debug)]
pub struct NormalizedTable<'a> {
    /// Column bindings used for the projection
    pub columns: ResolvedColumns,
    /// Rows passing the record filter, in input order
    pub rows: Vec<NormalizedRow<'a>>,
    /// Rows read before filtering
    pub rows_read: usize,
}

/// Normalise a raw table for one source.
///
/// Resolves the header, applies the source's record filter and projects each
/// remaining row onto the canonical fields. Never splits or merges rows.
pub fn normalize<'a>(
    table: &'a RawTable,
    side: Source,
    config: &PipelineConfig,
) -> Result<NormalizedTable<'a>, SchemaError> {
    let columns = resolve_columns(table.headers(), side, config)?;

    let rows: Vec<NormalizedRow<'a>> = table
        .rows()
        .iter()
        .filter(|row| {
            columns
                .filter
                .as_ref()
                .map_or(true, |f| f.accepts(cell_of(row, f.column.index)))
        })
        .map(|row| NormalizedRow {
            cb: cell_of(row, columns.cb.index),
            date: cell_of(row, columns.date.index),
            qty: cell_of(row, columns.qty.index),
            fee: cell_of(row, columns.fee.index),
            account: cell_of(row, columns.account.index),
            rate: columns.rate.as_ref().map(|r| cell_of(row, r.index)),
        })
        .collect();

    debug!(
        side = %side,
        rows_read = table.len(),
        rows_kept = rows.len(),
        "Normalised source table"
    );

    Ok(NormalizedTable {
        columns,
        rows,
        rows_read: table.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlantis_table() -> RawTable {
        RawTable::from_slices(
            &[
                "RecordType ",
                "ExchangeEBCode",
                "TradeDate",
                "Quantity",
                "GiveUpAmt",
                "ClearingAccount",
                "GiveUpRate",
            ],
            &[
                &["TP", "AB1", "20240105", "100", "50", "ACC1", "0.5"],
                &["TR", "AB1", "20240105", "7", "1", "ACC1", "0.1"],
                &["TP", "ZZ9", "20240105", "3"],
            ],
        )
    }

    #[test]
    fn test_filters_by_record_type() {
        let table = atlantis_table();
        let normalized = normalize(&table, Source::Atlantis, &PipelineConfig::tp()).unwrap();
        assert_eq!(normalized.rows_read, 3);
        assert_eq!(normalized.rows.len(), 2);
        assert_eq!(normalized.rows[0].cb, "AB1");
        assert_eq!(normalized.rows[0].rate, Some("0.5"));
    }

    #[test]
    fn test_short_rows_project_to_empty_cells() {
        let table = atlantis_table();
        let normalized = normalize(&table, Source::Atlantis, &PipelineConfig::tp()).unwrap();
        let short = normalized.rows[1];
        assert_eq!(short.qty, "3");
        assert_eq!(short.fee, "");
        assert_eq!(short.account, "");
    }

    #[test]
    fn test_go_selects_tr_rows_without_rate() {
        let table = atlantis_table();
        let normalized = normalize(&table, Source::Atlantis, &PipelineConfig::go()).unwrap();
        assert_eq!(normalized.rows.len(), 1);
        assert_eq!(normalized.rows[0].qty, "7");
        assert_eq!(normalized.rows[0].rate, None);
    }

    #[test]
    fn test_gmi_go_flag_filter() {
        let table = RawTable::from_slices(
            &["tgivf#", "tedate", "tqty", "tfee5", "acct", "TGIVIO"],
            &[
                &["AB1", "20240105", "5", "-1", "ACC1", "GO"],
                &["AB1", "20240105", "9", "-2", "ACC1", "GI"],
            ],
        );
        let normalized = normalize(&table, Source::Gmi, &PipelineConfig::go()).unwrap();
        assert_eq!(normalized.rows.len(), 1);
        assert_eq!(normalized.rows[0].qty, "5");
    }

    #[test]
    fn test_does_not_modify_input() {
        let table = atlantis_table();
        let before = table.clone();
        let _ = normalize(&table, Source::Atlantis, &PipelineConfig::tp()).unwrap();
        assert_eq!(table, before);
    }
}
