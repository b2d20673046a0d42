//! Delimited-text extractor: one document is one page holding one table.

use crate::filename::file_name;
use dailyprice_traits::{DailyPriceError, DocumentExtractor, Page, Result, Row};
use std::path::Path;

/// Reads price lists exported as comma (or other byte) separated text.
///
/// Rows may have different widths; blank cells stay empty strings. A file
/// with no rows yields a page without a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvExtractor {
    delimiter: u8,
}

impl CsvExtractor {
    /// Extractor for `delimiter`-separated files.
    pub const fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// The field delimiter.
    pub const fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl Default for CsvExtractor {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl DocumentExtractor for CsvExtractor {
    fn name(&self) -> &str {
        "csv"
    }

    fn extensions(&self) -> &[&str] {
        &["csv"]
    }

    fn extract(&self, path: &Path) -> Result<Vec<Page>> {
        let name = file_name(path);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(path)
            .map_err(|e| DailyPriceError::extraction(&name, e))?;

        let mut rows: Vec<Row> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DailyPriceError::extraction(&name, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        if rows.is_empty() {
            return Ok(vec![Page::empty()]);
        }
        Ok(vec![Page::with_table(rows)])
    }
}
