//! Integration tests writing reports to disk and reading them back.

use calamine::{open_workbook_auto, Data, Reader};
use recon_core::prelude::*;
use service_report::{
    CsvDirWriter, ReportFormat, ReportSink, ReportWorkbook, XlsxWorkbookWriter, BUCKET_COLUMNS,
    DEFAULT_WORKBOOK_NAME,
};
use std::fs;
use tempfile::tempdir;

fn tp_outcome() -> ReconciliationOutcome {
    let atlantis = RawTable::from_slices(
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
            &["TP", "CD2", "20240106", "10", "4.00", "ACC2", "0.4"],
        ],
    );
    let gmi = RawTable::from_slices(
        &["TGIVF#", "TEDATE", "TQTY", "TFEE5", "Acct"],
        &[
            &["AB1", "20240105", "100", "-50.00", "ACC1"],
            &["CD2", "20240106", "9", "-4.00", "ACC2"],
        ],
    );
    Pipeline::preset(PipelineKind::Tp).run(&atlantis, &gmi).unwrap()
}

#[test]
fn test_xlsx_round_trip_through_calamine() {
    let dir = tempdir().unwrap();
    let workbook = ReportWorkbook::from_outcome(&tp_outcome());

    let writer = XlsxWorkbookWriter::new(dir.path());
    let written = writer.write(&workbook).unwrap();
    assert_eq!(written, vec![dir.path().join(DEFAULT_WORKBOOK_NAME)]);

    let mut book = open_workbook_auto(&written[0]).unwrap();
    assert_eq!(
        book.sheet_names(),
        vec![
            "Matched",
            "Qty_Match_Only",
            "Fee_Match_Only",
            "No_Match",
            "Rate_Comparison"
        ]
    );

    let matched = book.worksheet_range("Matched").unwrap();
    let header: Vec<String> = matched.rows().next().unwrap().iter().map(|c| c.to_string()).collect();
    assert_eq!(header, BUCKET_COLUMNS.to_vec());
    assert_eq!(matched.get_value((1, 0)), Some(&Data::String("AB1".to_string())));
    assert_eq!(matched.get_value((1, 1)), Some(&Data::String("2024-01-05".to_string())));
    assert_eq!(matched.get_value((1, 3)), Some(&Data::Float(100.0)));

    let fee_only = book.worksheet_range("Fee_Match_Only").unwrap();
    assert_eq!(fee_only.get_value((1, 7)), Some(&Data::Float(1.0)));

    let rates = book.worksheet_range("Rate_Comparison").unwrap();
    assert_eq!(rates.rows().count(), 3);
}

#[test]
fn test_csv_directory_has_one_file_per_sheet() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("recon");
    let workbook = ReportWorkbook::from_outcome(&tp_outcome());

    let writer = CsvDirWriter::new(&out);
    assert_eq!(writer.output_dir(), out.as_path());
    let written = writer.write(&workbook).unwrap();
    assert_eq!(written.len(), 5);
    assert!(written.iter().all(|p| p.parent() == Some(writer.output_dir())));

    let matched = fs::read_to_string(out.join("Matched.csv")).unwrap();
    let mut lines = matched.lines();
    assert_eq!(
        lines.next().unwrap(),
        "CB,Date,Account,Qty_Atlantis,Fee_Atlantis,Qty_GMI,Fee_GMI,Qty_Diff,Fee_Diff"
    );
    assert_eq!(lines.next().unwrap(), "AB1,2024-01-05,ACC1,100,50,100,-50,0,0");
    assert!(lines.next().is_none());

    let no_match = fs::read_to_string(out.join("No_Match.csv")).unwrap();
    assert_eq!(no_match.lines().count(), 1);
}

#[test]
fn test_csv_destination_that_is_a_file_is_rejected() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("taken");
    fs::write(&file, "x").unwrap();

    let sink = ReportFormat::Csv.sink(&file);
    assert!(sink.write(&ReportWorkbook::default()).is_err());
}
