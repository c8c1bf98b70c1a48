//! Columns command implementation
//!
//! Shows how a file's headers bind to the canonical reconciliation columns,
//! or which required columns are missing.

use recon_core::schema::{resolve_columns, ResolvedColumns};
use recon_core::types::Source;
use std::path::Path;
use tracing::info;

use super::resolve_pipeline;
use crate::config::ReconConfig;
use crate::{CliError, Result};

/// Run the columns command
pub fn run(config: &ReconConfig, file: &Path, source: &str, pipeline: Option<&str>) -> Result<()> {
    let side: Source = source.parse().map_err(CliError::InvalidArgument)?;
    let kind = resolve_pipeline(config, pipeline)?;

    let table = adapter_loader::load_table(file)?;
    let resolved = resolve_columns(table.headers(), side, &config.pipeline_config(kind))?;

    info!(source = %side, pipeline = %kind, "Columns resolved");
    print!("{}", render_mapping(&resolved));
    Ok(())
}

/// One line per binding, then the row filter if any.
pub(crate) fn render_mapping(resolved: &ResolvedColumns) -> String {
    let mut out = format!("{} columns:\n", resolved.side);
    for (canonical, column) in resolved.bindings() {
        out.push_str(&format!(
            "  {:<8} ← {} (column {})\n",
            canonical,
            column.header.trim(),
            column.index + 1
        ));
    }
    if let Some(filter) = &resolved.filter {
        out.push_str(&format!(
            "  filter   {} = {}\n",
            filter.column.header.trim(),
            filter.expected
        ));
    }
    out
}
