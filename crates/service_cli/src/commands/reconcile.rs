//! Reconcile command implementation
//!
//! Loads both extracts, runs the configured pipeline, exports the sheets and
//! prints a run summary.

use recon_core::pipeline::{Pipeline, ReconciliationOutcome};
use recon_core::reconcile::MatchStatus;
use service_report::{ReportFormat, ReportWorkbook};
use std::path::PathBuf;
use tracing::info;

use super::resolve_pipeline;
use crate::config::ReconConfig;
use crate::{CliError, Result};

/// Summary output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    /// Box-drawn table
    Table,
    /// JSON document
    Json,
}

impl SummaryFormat {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "table" => Ok(SummaryFormat::Table),
            "json" => Ok(SummaryFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

/// Arguments of `gi-recon reconcile`.
#[derive(Debug, Clone)]
pub struct ReconcileArgs {
    /// Atlantis extract
    pub atlantis: PathBuf,
    /// GMI extract
    pub gmi: PathBuf,
    /// Pipeline name override
    pub pipeline: Option<String>,
    /// Export destination override
    pub output: Option<PathBuf>,
    /// Export format override
    pub export: Option<String>,
    /// Summary format
    pub format: String,
    /// Disable the rate comparison
    pub no_rate: bool,
}

/// Export destination: explicit argument, else the configured output.
///
/// A configured `.xlsx` path loses its extension when exporting CSV so the
/// sheets land in a directory of the same stem.
fn destination(config: &ReconConfig, format: ReportFormat, output: Option<PathBuf>) -> PathBuf {
    match output {
        Some(path) => path,
        None if format == ReportFormat::Csv
            && config.output.extension().is_some_and(|e| e == "xlsx") =>
        {
            config.output.with_extension("")
        }
        None => config.output.clone(),
    }
}

/// Run the reconcile command
pub fn run(config: &ReconConfig, args: ReconcileArgs) -> Result<()> {
    let kind = resolve_pipeline(config, args.pipeline.as_deref())?;
    let export = match args.export.as_deref() {
        Some(name) => name.parse::<ReportFormat>()?,
        None => config.export,
    };
    let summary_format = SummaryFormat::parse(&args.format)?;
    let output = destination(config, export, args.output);

    let mut pipeline_config = config.pipeline_config(kind);
    if args.no_rate {
        pipeline_config = pipeline_config.with_rate_comparison(false);
    }
    let pipeline = Pipeline::new(pipeline_config)?;

    info!(
        pipeline = %kind,
        rate_comparison = pipeline.config().rate_comparison,
        atlantis = %args.atlantis.display(),
        gmi = %args.gmi.display(),
        "Starting reconciliation"
    );

    let atlantis = adapter_loader::load_table(&args.atlantis)?;
    let gmi = adapter_loader::load_table(&args.gmi)?;
    let outcome = pipeline.run(&atlantis, &gmi)?;

    let workbook = ReportWorkbook::from_outcome(&outcome);
    let written = export.sink(&output).write(&workbook)?;

    match summary_format {
        SummaryFormat::Table => {
            print!("{}", render_table(&outcome));
            for issue in outcome.input_issues() {
                println!("warning: {}", issue);
            }
            for path in &written {
                println!("Exported: {}", path.display());
            }
        }
        SummaryFormat::Json => {
            println!("{}", render_json(&outcome, &written)?);
        }
    }

    info!(breaks = outcome.summary.breaks(), "Reconciliation complete");
    Ok(())
}

/// Box-drawn bucket counts.
pub(crate) fn render_table(outcome: &ReconciliationOutcome) -> String {
    let s = &outcome.summary;
    let mut out = String::new();

    out.push_str(&format!(
        "{} reconciliation: Atlantis {} rows → {} groups, GMI {} rows → {} groups\n",
        outcome.kind, s.atlantis_rows_read, s.atlantis_groups, s.gmi_rows_read, s.gmi_groups
    ));
    out.push_str("┌────────────────┬────────┬───────────────────────────────┐\n");
    out.push_str(&format!("│ {:<14} │ {:>6} │ {:<29} │\n", "Bucket", "Groups", "Description"));
    out.push_str("├────────────────┼────────┼───────────────────────────────┤\n");
    for status in MatchStatus::ALL {
        out.push_str(&format!(
            "│ {:<14} │ {:>6} │ {:<29} │\n",
            status.sheet_name(),
            outcome.buckets.get(status).len(),
            status.title()
        ));
    }
    out.push_str("├────────────────┼────────┼───────────────────────────────┤\n");
    out.push_str(&format!("│ {:<14} │ {:>6} │ {:<29} │\n", "Total", s.total_groups(), ""));
    out.push_str("└────────────────┴────────┴───────────────────────────────┘\n");

    if let Some(rates) = &outcome.rate_comparison {
        out.push_str(&format!("Rate comparison: {} groups\n", rates.len()));
    }
    out
}

/// JSON summary with the export paths.
pub(crate) fn render_json(outcome: &ReconciliationOutcome, written: &[PathBuf]) -> Result<String> {
    let exported: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
    let doc = serde_json::json!({
        "pipeline": outcome.kind,
        "summary": outcome.summary,
        "breaks": outcome.summary.breaks(),
        "rate_comparison_rows": outcome.rate_comparison.as_ref().map(Vec::len),
        "input_issues": outcome.input_issues(),
        "exported": exported,
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}
