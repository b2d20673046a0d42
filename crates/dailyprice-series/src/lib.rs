//! Cleaning, return derivation and aggregation for dailyprice.
//!
//! This crate holds the three in-memory stages of the pipeline:
//! - [`clean`] coerces raw text rows into typed records and drops invalid ones
//! - [`derive`] computes each symbol's day index, percent change, growth and
//!   cumulative return
//! - [`aggregate`] ranks symbols by total volume and mean close and
//!   correlates the two
//!
//! # Example
//!
//! ```rust
//! use dailyprice_series::{aggregate, clean, derive};
//! use dailyprice_traits::RawRecord;
//!
//! let raw = vec![RawRecord {
//!     symbol: "ABC".to_string(),
//!     close: "10.00".to_string(),
//!     volume: "1,000".to_string(),
//!     date: "2024-05-20".to_string(),
//!     ..RawRecord::default()
//! }];
//!
//! let cleaned = clean(&raw);
//! let corpus = derive(cleaned.records);
//! let aggregates = aggregate(&corpus)?;
//!
//! assert_eq!(corpus.records()[0].day, 1);
//! assert_eq!(aggregates.table[0].total_volume, 1000);
//! # Ok::<(), dailyprice_traits::DailyPriceError>(())
//! ```

pub mod aggregate;
pub mod clean;
pub mod derive;

pub use aggregate::{Aggregates, MEAN_CLOSE, TOTAL_VOLUME, aggregate, volume_close_correlation};
pub use clean::{
    Cleaned, CleaningStats, GROUPING_SEPARATOR, RECORD_DATE_FORMAT, clean, parse_close,
    parse_date, parse_symbol, parse_volume, reclean,
};
pub use derive::{SeriesFold, derive, growth_factor, percent_change};
