//! Concrete [`DocumentExtractor`] implementations.
//!
//! Decoding the exchange's own document format stays outside this crate;
//! these extractors read tables that an external tool has already pulled out.

mod delimited;
mod json;

pub use delimited::CsvExtractor;
pub use json::JsonExtractor;

use dailyprice_traits::{DailyPriceError, DocumentExtractor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The on-disk format of the input documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// One comma-separated table per file.
    #[default]
    Csv,
    /// A JSON list of pages per file.
    Json,
}

impl SourceFormat {
    /// Every supported format.
    pub const ALL: [Self; 2] = [Self::Csv, Self::Json];

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// A boxed extractor for this format.
    pub fn extractor(&self) -> Box<dyn DocumentExtractor> {
        match self {
            Self::Csv => Box::new(CsvExtractor::default()),
            Self::Json => Box::new(JsonExtractor),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = DailyPriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DailyPriceError::InvalidData(format!(
                    "Unknown source format: '{s}'. Expected one of: csv, json"
                ))
            })
    }
}
