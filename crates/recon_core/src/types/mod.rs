//! Core record, key and error types.
//!
//! This module provides:
//! - `record`: [`Source`] identifiers and the [`CanonicalRecord`] unit the pipeline operates on
//! - `key`: [`GroupKey`], the (CB, Date, Account) tuple used to align both sources
//! - `error`: Structured error types for schema resolution and pipeline runs
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod error;
pub mod key;
pub mod record;

pub use error::{ReconError, SchemaError};
pub use key::GroupKey;
pub use record::{CanonicalRecord, Source};
