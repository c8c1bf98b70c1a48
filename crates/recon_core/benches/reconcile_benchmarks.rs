//! Criterion benchmarks for the reconciliation pipeline.
//!
//! Measures aggregation and the full raw-table run across input sizes that
//! bracket a typical daily give-up file.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use recon_core::prelude::*;

/// Generate a pair of raw tables with `n` rows each over a bounded key space.
fn generate_tables(n: usize) -> (RawTable, RawTable) {
    let atlantis_headers = [
        "RecordType",
        "ExchangeEBCode",
        "TradeDate",
        "Quantity",
        "GiveUpAmt",
        "ClearingAccount",
        "GiveUpRate",
    ];
    let gmi_headers = ["TGIVF#", "TEDATE", "TQTY", "TFEE5", "Acct"];

    let mut atlantis_rows = Vec::with_capacity(n);
    let mut gmi_rows = Vec::with_capacity(n);
    for i in 0..n {
        let cb = format!("CB{}", i % 50);
        let date = format!("202401{:02}", 1 + i % 28);
        let account = format!("ACC{}", i % 20);
        let qty = (i % 17) as f64 + 1.0;
        let fee = qty * 0.35;
        atlantis_rows.push(vec![
            "TP".to_string(),
            cb.clone(),
            date.clone(),
            qty.to_string(),
            fee.to_string(),
            account.clone(),
            "0.35".to_string(),
        ]);
        gmi_rows.push(vec![cb, date, qty.to_string(), (-fee).to_string(), account]);
    }

    (
        RawTable::new(atlantis_headers.iter().map(|s| s.to_string()).collect(), atlantis_rows),
        RawTable::new(gmi_headers.iter().map(|s| s.to_string()).collect(), gmi_rows),
    )
}

/// Benchmark aggregation of prepared records.
fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let pipeline = Pipeline::preset(PipelineKind::Tp);

    for size in [1_000, 10_000, 100_000] {
        let (atlantis, _) = generate_tables(size);
        let prepared = pipeline.prepare(&atlantis, Source::Atlantis).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &prepared.records, |b, records| {
            b.iter(|| aggregate(black_box(records)));
        });
    }

    group.finish();
}

/// Benchmark the full run from raw tables.
fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");
    let pipeline = Pipeline::preset(PipelineKind::Tp);

    for size in [1_000, 10_000, 100_000] {
        let tables = generate_tables(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &tables, |b, (atlantis, gmi)| {
            b.iter(|| pipeline.run(black_box(atlantis), black_box(gmi)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_full_run);
criterion_main!(benches);
