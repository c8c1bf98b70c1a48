//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod columns;
pub mod reconcile;

use recon_core::config::PipelineKind;

use crate::config::ReconConfig;
use crate::Result;

/// Pipeline from the command line, falling back to the configured one.
pub(crate) fn resolve_pipeline(config: &ReconConfig, arg: Option<&str>) -> Result<PipelineKind> {
    match arg {
        Some(name) => Ok(name.parse()?),
        None => Ok(config.pipeline),
    }
}
