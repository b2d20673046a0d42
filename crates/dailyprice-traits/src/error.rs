//! Error types for the dailyprice pipeline.
//!
//! Per-document failures ([`DailyPriceError::DateParse`],
//! [`DailyPriceError::Extraction`]) are recovered by the batch loader; the
//! remaining variants end the run.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for dailyprice operations.
#[derive(Debug, Error)]
pub enum DailyPriceError {
    /// The input directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// A document name does not carry a date in the expected pattern.
    #[error("Cannot resolve date from '{file}': {reason}")]
    DateParse {
        /// Offending document name.
        file: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The document extractor failed to open or read a document.
    #[error("Failed to extract '{file}': {reason}")]
    Extraction {
        /// Offending document name.
        file: String,
        /// Underlying failure.
        reason: String,
    },

    /// Cleaning left no valid rows.
    #[error("No valid price data remaining after cleaning")]
    EmptyCorpus,

    /// The existing history file was written with a different header.
    #[error("History file {} has header '{found}', expected '{expected}'", .path.display())]
    HistorySchema {
        /// History file location.
        path: PathBuf,
        /// Header line found on disk.
        found: String,
        /// Header line this version writes.
        expected: String,
    },

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error from the file system.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl DailyPriceError {
    /// Whether the batch may skip the offending document and carry on.
    #[must_use]
    pub const fn is_per_document(&self) -> bool {
        matches!(self, Self::DateParse { .. } | Self::Extraction { .. })
    }

    /// Name of the document the error refers to, if any.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::DateParse { file, .. } | Self::Extraction { file, .. } => Some(file),
            _ => None,
        }
    }

    /// Shorthand for an [`Extraction`](Self::Extraction) error.
    pub fn extraction(file: impl Into<String>, reason: impl ToString) -> Self {
        Self::Extraction {
            file: file.into(),
            reason: reason.to_string(),
        }
    }
}

/// A specialized Result type for dailyprice operations.
pub type Result<T> = std::result::Result<T, DailyPriceError>;
