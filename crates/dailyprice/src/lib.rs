#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/dailyprice/dailyprice/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # dailyprice
//!
//! `dailyprice` is an umbrella crate that re-exports the pipeline sub-crates
//! and adds the [`run`] orchestrator with its [`PipelineConfig`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use dailyprice::{Outcome, PipelineConfig, run};
//!
//! # fn main() -> dailyprice::Result<()> {
//! let config = PipelineConfig::new("./stock_files/");
//! let run = run(&config)?;
//!
//! match &run.outcome {
//!     Outcome::Written(written) => {
//!         println!("{} rows, correlation {:?}", written.corpus.len(), written.aggregates.correlation);
//!     }
//!     Outcome::NoData(reason) => println!("{reason}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Record types, [`DocumentExtractor`] and [`DailyPriceError`]
//! - [`ingest`] - Filename dates, extractors, row assembly and batch loading
//! - [`series`] - Cleaning, per-symbol returns and aggregation
//! - [`store`] - Snapshot and history files, JSON export
//!
//! ## Architecture
//!
//! 1. **Ingest** resolves each document's date and assembles its table rows
//! 2. **Clean** keeps symbol, close, volume and date, dropping invalid rows
//! 3. **Derive** folds each symbol's series into day index and returns
//! 4. **Aggregate** ranks symbols and correlates volume with price
//! 5. **Store** replaces the snapshot and appends the history

/// Version information for the dailyprice crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod pipeline;

pub use config::{DEFAULT_DATA_DIR, PipelineConfig};
pub use pipeline::{NoData, Outcome, PipelineRun, RunSummary, Written, run};

// ============================================================================
// Core Types
// ============================================================================

/// Record types, the extractor trait and the error type.
pub mod traits {
    pub use dailyprice_traits::*;
}

pub use dailyprice_traits::{
    AggregateRow, CleanRecord, Corpus, DailyPriceError, Date, DerivedRecord, DocumentExtractor,
    RawRecord, Result, Symbol,
};

// ============================================================================
// Stages
// ============================================================================

/// Document loading.
pub mod ingest {
    pub use dailyprice_ingest::*;
}

/// Cleaning, derivation and aggregation.
pub mod series {
    pub use dailyprice_series::*;
}

/// Persistence and export.
pub mod store {
    pub use dailyprice_store::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use dailyprice::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ingest::{BatchLoader, SourceFormat};
    pub use crate::series::Aggregates;
    pub use crate::{
        Corpus, DailyPriceError, DocumentExtractor, Outcome, PipelineConfig, Result, run,
    };
}
