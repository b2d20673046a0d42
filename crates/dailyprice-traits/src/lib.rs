#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/dailyprice/dailyprice/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the dailyprice price-list pipeline.
//!
//! This crate provides the record types each stage hands to the next, the
//! extractor abstraction that keeps document decoding out of the core, and
//! the shared error type.

/// The version of the dailyprice-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod extractor;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{DailyPriceError, Result};
pub use extractor::{DocumentExtractor, Page, Row};
pub use types::{
    AggregateRow, CE_TO_UNIX_EPOCH_DAYS, CleanRecord, Corpus, Date, DerivedRecord,
    PRICE_LIST_WIDTH, RawRecord, Symbol, columns,
};
