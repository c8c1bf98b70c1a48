//! Error types for structured error handling.
//!
//! This module provides:
//! - `SchemaError`: A source table cannot be mapped onto the canonical schema
//! - `ReconError`: Errors from a full reconciliation run
//!
//! Field-level data-quality problems (bad dates, non-numeric quantities) are
//! not errors: they become missing values and are tallied in
//! [`DataQuality`](crate::coerce::DataQuality).

use thiserror::Error;

use super::record::Source;

/// Schema resolution errors.
///
/// Fatal to a reconciliation run: no partial tables are produced once a
/// schema error is raised for either source.
///
/// # Examples
/// ```
/// use recon_core::types::{SchemaError, Source};
///
/// let err = SchemaError::MissingColumns {
///     side: Source::Gmi,
///     columns: vec!["Acct or Account".to_string()],
/// };
/// assert_eq!(
///     format!("{}", err),
///     "GMI file is missing required column(s): Acct or Account"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// One or more required columns are absent from the source header.
    #[error("{side} file is missing required column(s): {}", .columns.join(", "))]
    MissingColumns {
        /// Source whose header is incomplete
        side: Source,
        /// Names of the missing columns, as configured
        columns: Vec<String>,
    },

    /// The source table has no header row at all.
    #[error("{side} file has no header row")]
    EmptyHeader {
        /// Source with the empty header
        side: Source,
    },
}

impl SchemaError {
    /// Source the error refers to.
    pub fn side(&self) -> Source {
        match self {
            SchemaError::MissingColumns { side, .. } | SchemaError::EmptyHeader { side } => *side,
        }
    }
}

/// Reconciliation run errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconError {
    /// Schema error in one of the sources.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Pipeline configuration is unusable.
    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}

impl ReconError {
    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
