//! Price-list document loading for dailyprice.
//!
//! This crate turns a directory of daily price-list documents into a flat,
//! ordered list of [`RawRecord`](dailyprice_traits::RawRecord)s:
//!
//! 1. [`DateResolver`] reads the trading date out of each document name.
//! 2. A [`DocumentExtractor`](dailyprice_traits::DocumentExtractor) returns
//!    the document's pages and tables.
//! 3. [`RecordAssembler`] drops header and footer rows and stamps the date.
//! 4. [`BatchLoader`] runs the above per document and concatenates results.
//!
//! # Usage
//!
//! ```rust,no_run
//! use dailyprice_ingest::{BatchLoader, SourceFormat};
//! use std::path::Path;
//!
//! let loader = BatchLoader::new(SourceFormat::Csv.extractor());
//! let batch = loader.load_dir(Path::new("./stock_files"))?;
//!
//! for failure in &batch.failures {
//!     eprintln!("Error processing {}: {failure}", failure.file().unwrap_or("?"));
//! }
//! println!("{} raw rows", batch.records.len());
//! # Ok::<(), dailyprice_traits::DailyPriceError>(())
//! ```

mod assemble;
mod extract;
mod filename;
mod loader;

pub use assemble::{AssembledDocument, AssemblyStats, DEFAULT_FOOTER_MARKER, RecordAssembler};
pub use extract::{CsvExtractor, JsonExtractor, SourceFormat};
pub use filename::{DATE_PATTERN, DEFAULT_PREFIX, DateResolver, file_name};
pub use loader::{Batch, BatchLoader, Candidates, DocumentSummary};
