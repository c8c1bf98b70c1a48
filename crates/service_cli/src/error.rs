//! CLI error type.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `gi-recon` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file could not be loaded.
    #[error(transparent)]
    Loader(#[from] adapter_loader::LoaderError),

    /// Reconciliation failed (schema or pipeline configuration).
    #[error(transparent)]
    Recon(#[from] recon_core::types::ReconError),

    /// Export failed.
    #[error(transparent)]
    Report(#[from] service_report::ReportError),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Summary could not be serialised.
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<recon_core::types::SchemaError> for CliError {
    fn from(err: recon_core::types::SchemaError) -> Self {
        CliError::Recon(err.into())
    }
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
