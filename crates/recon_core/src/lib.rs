//! # recon_core: Give-Up Trade Reconciliation Kernel
//!
//! ## Role
//!
//! recon_core reconciles front-office ("Atlantis") against clearing-house
//! ("GMI") give-up records. It provides:
//! - Raw tabular input (`table`)
//! - Pipeline parameters for the give-up (TP) and give-up-only (GO) variants (`config`)
//! - Header resolution and row projection onto a canonical schema (`schema`)
//! - Field typing with missing-value tallies (`coerce`)
//! - Per-source grouping and compensated summation (`aggregate`)
//! - Outer join and four-way match classification (`reconcile`)
//! - Give-up rate comparison (`rate`)
//! - The end-to-end run (`pipeline`)
//!
//! ## I/O Free
//!
//! This crate never touches the filesystem. File loading lives in
//! `adapter_loader`, export in `service_report`.
//!
//! ## Usage Examples
//!
//! ```rust
//! use recon_core::prelude::*;
//!
//! let atlantis = RawTable::from_slices(
//!     &["RecordType", "ExchangeEBCode", "TradeDate", "Quantity", "GiveUpAmt", "ClearingAccount", "GiveUpRate"],
//!     &[&["TP", "AB1", "20240105", "100", "50.00", "ACC1", "0.5"]],
//! );
//! let gmi = RawTable::from_slices(
//!     &["tgivf#", "tedate", "tqty", "tfee5", "acct"],
//!     &[&["AB1", "20240105", "100", "-50.00", "ACC1"]],
//! );
//!
//! let outcome = Pipeline::preset(PipelineKind::Tp).run(&atlantis, &gmi).unwrap();
//! assert_eq!(outcome.buckets.matched.len(), 1);
//! assert_eq!(outcome.summary.breaks(), 0);
//! ```

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod aggregate;
pub mod coerce;
pub mod config;
pub mod pipeline;
pub mod rate;
pub mod reconcile;
pub mod schema;
pub mod table;
pub mod types;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aggregate::{aggregate, AggregateRow};
    pub use crate::coerce::DataQuality;
    pub use crate::config::{AtlantisColumns, GmiColumns, PipelineConfig, PipelineKind};
    pub use crate::pipeline::{Pipeline, ReconciliationOutcome, RunSummary};
    pub use crate::rate::RateComparisonRow;
    pub use crate::reconcile::{reconcile, Buckets, MatchStatus, ReconciliationRow};
    pub use crate::table::RawTable;
    pub use crate::types::{CanonicalRecord, GroupKey, ReconError, SchemaError, Source};
}
