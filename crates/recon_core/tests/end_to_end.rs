//! End-to-end reconciliation scenarios.
//!
//! Drives the full pipeline from raw tables through to classified buckets
//! and the rate view.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use recon_core::prelude::*;

const ATLANTIS_HEADERS: &[&str] = &[
    "RecordType",
    "ExchangeEBCode",
    "TradeDate",
    "Quantity",
    "GiveUpAmt",
    "ClearingAccount",
    "GiveUpRate",
];

/// The canonical single-trade TP scenario reconciles to one matched row.
#[test]
fn test_single_trade_tp_scenario() {
    let atlantis = RawTable::from_slices(
        ATLANTIS_HEADERS,
        &[&["TP", "AB1", "20240105", "100", "50.00", "ACC1", "0.5"]],
    );
    let gmi = RawTable::from_slices(
        &["tgivf#", "tedate", "tqty", "tfee5", "acct"],
        &[&["AB1", "20240105", "100", "-50.00", "ACC1"]],
    );

    let outcome = Pipeline::preset(PipelineKind::Tp)
        .run(&atlantis, &gmi)
        .unwrap();

    assert_eq!(outcome.buckets.matched.len(), 1);
    assert!(outcome.buckets.qty_match_only.is_empty());
    assert!(outcome.buckets.fee_match_only.is_empty());
    assert!(outcome.buckets.no_match.is_empty());

    let row = &outcome.buckets.matched[0];
    assert_eq!(row.key.cb(), "AB1");
    assert_eq!(row.key.date(), NaiveDate::from_ymd_opt(2024, 1, 5));
    assert_eq!(row.key.account(), Some("ACC1"));
    assert_eq!(row.qty_diff, 0.0);
    assert_eq!(row.fee_diff, 0.0);

    let rates = outcome.rate_comparison.as_ref().expect("TP compares rates");
    assert_eq!(rates.len(), 1);
    assert_relative_eq!(rates[0].rate_atlantis, 0.5);
    assert_relative_eq!(rates[0].rate_gmi, -0.5);
    assert_relative_eq!(rates[0].rate_diff, 0.0);
}

/// A GMI table with no Acct/Account column aborts before any table exists.
#[test]
fn test_missing_gmi_account_aborts_run() {
    let atlantis = RawTable::from_slices(
        ATLANTIS_HEADERS,
        &[&["TP", "AB1", "20240105", "100", "50.00", "ACC1", "0.5"]],
    );
    let gmi = RawTable::from_slices(
        &["TGIVF#", "TEDATE", "TQTY", "TFEE5"],
        &[&["AB1", "20240105", "100", "-50.00"]],
    );

    let result = Pipeline::preset(PipelineKind::Tp).run(&atlantis, &gmi);

    match result {
        Err(ReconError::Schema(SchemaError::MissingColumns { side, columns })) => {
            assert_eq!(side, Source::Gmi);
            assert_eq!(columns, vec!["Acct or Account".to_string()]);
        }
        other => panic!("Expected schema error, got {:?}", other),
    }
}

/// GO pipeline: TR rows only, GMI filtered on TGIVIO, no rate view.
#[test]
fn test_go_pipeline() {
    let atlantis = RawTable::from_slices(
        &ATLANTIS_HEADERS[..6],
        &[
            &["TR", "AB1", "20240105", "40", "4", "ACC1"],
            &["TP", "AB1", "20240105", "60", "6", "ACC1"],
        ],
    );
    let gmi = RawTable::from_slices(
        &["TGIVF#", "TEDATE", "TQTY", "TFEE5", "Account", "TGIVIO"],
        &[
            &["AB1", "20240105", "40", "-4", "ACC1", "GO"],
            &["AB1", "20240105", "60", "-6", "ACC1", "GI"],
        ],
    );

    let outcome = Pipeline::preset(PipelineKind::Go)
        .run(&atlantis, &gmi)
        .unwrap();

    assert_eq!(outcome.kind, PipelineKind::Go);
    assert!(outcome.rate_comparison.is_none());
    assert_eq!(outcome.summary.atlantis_records, 1);
    assert_eq!(outcome.summary.gmi_records, 1);
    assert_eq!(outcome.buckets.matched.len(), 1);
    assert_eq!(outcome.buckets.matched[0].qty_atlantis, 40.0);
}

/// Numeric-looking broker codes with padding align across sources.
#[test]
fn test_padded_broker_codes_align() {
    let atlantis = RawTable::from_slices(
        ATLANTIS_HEADERS,
        &[&["TP", " 0042 ", "20240105", "5", "1", "ACC1", "0.2"]],
    );
    let gmi = RawTable::from_slices(
        &["TGIVF#", "TEDATE", "TQTY", "TFEE5", "ACCT"],
        &[&["0042", "20240105", "5", "-1", "ACC1"]],
    );

    let outcome = Pipeline::preset(PipelineKind::Tp)
        .run(&atlantis, &gmi)
        .unwrap();
    assert_eq!(outcome.summary.total_groups(), 1);
    assert_eq!(outcome.buckets.matched[0].key.cb(), "0042");
}

/// Bad field values degrade to missing and still reconcile.
#[test]
fn test_unparseable_fields_do_not_abort() {
    let atlantis = RawTable::from_slices(
        ATLANTIS_HEADERS,
        &[
            &["TP", "AB1", "2024-01-05", "abc", "10", "ACC1", "x"],
            &["TP", "AB1", "", "5", "", "ACC1", "0.1"],
        ],
    );
    let gmi = RawTable::from_slices(
        &["TGIVF#", "TEDATE", "TQTY", "TFEE5", "Acct"],
        &[&["AB1", "00000000", "5", "-10", "ACC1"]],
    );

    let outcome = Pipeline::preset(PipelineKind::Tp)
        .run(&atlantis, &gmi)
        .unwrap();

    // All three records share CB/Account and a missing date.
    assert_eq!(outcome.summary.total_groups(), 1);
    let row = &outcome.buckets.matched[0];
    assert_eq!(row.key.date(), None);
    assert_eq!(row.qty_atlantis, 5.0);
    assert_eq!(row.fee_atlantis, 10.0);

    let rates = outcome.rate_comparison.as_ref().unwrap();
    assert_relative_eq!(rates[0].rate_atlantis, 0.1);
    assert_relative_eq!(rates[0].rate_gmi, -2.0);

    assert_eq!(outcome.atlantis_quality.invalid_dates, 1);
    assert_eq!(outcome.atlantis_quality.blank_dates, 1);
    assert_eq!(outcome.atlantis_quality.invalid_quantities, 1);
    assert_eq!(outcome.atlantis_quality.blank_fees, 1);
    assert_eq!(outcome.atlantis_quality.invalid_rates, 1);
    assert_eq!(outcome.gmi_quality.invalid_dates, 1);
    assert_eq!(outcome.input_issues().len(), 6);
}

/// Rounding boundary on quantity differences.
#[test]
fn test_quantity_rounding_boundary() {
    let run = |qty_atlantis: &str| {
        let atlantis = RawTable::from_slices(
            ATLANTIS_HEADERS,
            &[&["TP", "AB1", "20240105", qty_atlantis, "1", "ACC1", "0.1"]],
        );
        let gmi = RawTable::from_slices(
            &["TGIVF#", "TEDATE", "TQTY", "TFEE5", "Acct"],
            &[&["AB1", "20240105", "100.001", "-1", "ACC1"]],
        );
        Pipeline::preset(PipelineKind::Tp)
            .run(&atlantis, &gmi)
            .unwrap()
    };

    assert_eq!(run("100.004").buckets.matched.len(), 1);
    let outcome = run("100.006");
    assert_eq!(outcome.buckets.fee_match_only.len(), 1);
    assert!(outcome.buckets.matched.is_empty());
}

/// A half-cent fee difference is a break even when binary noise puts it
/// just under the midpoint.
#[test]
fn test_half_cent_fee_difference_is_a_break() {
    let atlantis = RawTable::from_slices(
        ATLANTIS_HEADERS,
        &[&["TP", "AB1", "20240105", "10", "1.005", "ACC1", "0.1"]],
    );
    let gmi = RawTable::from_slices(
        &["TGIVF#", "TEDATE", "TQTY", "TFEE5", "Acct"],
        &[&["AB1", "20240105", "10", "-1", "ACC1"]],
    );

    let outcome = Pipeline::preset(PipelineKind::Tp)
        .run(&atlantis, &gmi)
        .unwrap();

    assert!(outcome.buckets.matched.is_empty());
    assert_eq!(outcome.buckets.qty_match_only.len(), 1);
    assert_relative_eq!(outcome.buckets.qty_match_only[0].fee_diff, 0.005, epsilon = 1e-9);
}
