//! Check command implementation
//!
//! Reports the effective configuration. Reaching this command means the
//! configuration already loaded and validated.

use std::path::Path;
use tracing::info;

use crate::config::ReconConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &ReconConfig, path: &Path) -> Result<()> {
    info!("Checking configuration...");

    let origin = if path.exists() {
        path.display().to_string()
    } else {
        format!("defaults ({} not found)", path.display())
    };

    println!("Configuration: {}", origin);
    println!("  pipeline:        {}", config.pipeline);
    println!("  output:          {}", config.output.display());
    println!("  export:          {}", config.export);
    println!("  rate_comparison: {}", config.rate_comparison);
    println!("  log_level:       {}", config.log_level);
    println!("OK");

    info!("Configuration valid");
    Ok(())
}
