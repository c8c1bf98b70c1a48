//! Schema normalisation.
//!
//! - `columns`: resolves raw, inconsistently cased headers onto canonical fields
//! - `normalizer`: applies the record filter and projects rows onto those fields

pub mod columns;
pub mod normalizer;

pub use columns::{resolve_columns, ColumnRef, ResolvedColumns, RowFilter};
pub use normalizer::{normalize, NormalizedRow, NormalizedTable};
