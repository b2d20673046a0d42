//! JSON extractor for documents pre-extracted by an external table reader.
//!
//! Expected layout, one object per document:
//!
//! ```json
//! {"pages": [{"table": [["S/N", "Symbol"], ["1", null]]}, {"table": null}]}
//! ```
//!
//! `null` cells become empty strings; a missing or `null` table means the page
//! had no table.

use crate::filename::file_name;
use dailyprice_traits::{DailyPriceError, DocumentExtractor, Page, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct JsonDocument {
    #[serde(default)]
    pages: Vec<JsonPage>,
}

#[derive(Debug, Deserialize)]
struct JsonPage {
    #[serde(default)]
    table: Option<Vec<Vec<Option<String>>>>,
}

impl From<JsonPage> for Page {
    fn from(page: JsonPage) -> Self {
        Self {
            table: page.table.map(|rows| {
                rows.into_iter()
                    .map(|row| row.into_iter().map(Option::unwrap_or_default).collect())
                    .collect()
            }),
        }
    }
}

/// Reads documents stored as JSON page lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonExtractor;

impl JsonExtractor {
    /// Parses a document from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`DailyPriceError::Extraction`] naming `name` if the text is
    /// not a valid document.
    pub fn parse(name: &str, text: &str) -> Result<Vec<Page>> {
        let doc: JsonDocument =
            serde_json::from_str(text).map_err(|e| DailyPriceError::extraction(name, e))?;
        Ok(doc.pages.into_iter().map(Page::from).collect())
    }
}

impl DocumentExtractor for JsonExtractor {
    fn name(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn extract(&self, path: &Path) -> Result<Vec<Page>> {
        let name = file_name(path);
        let text = fs::read_to_string(path).map_err(|e| DailyPriceError::extraction(&name, e))?;
        Self::parse(&name, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pages() {
        let pages = JsonExtractor::parse(
            "doc.json",
            r#"{"pages": [
                {"table": [["S/N", "Symbol"], ["1", null]]},
                {"table": null},
                {}
            ]}"#,
        )
        .unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(
            pages[0].table.as_ref().unwrap()[1],
            vec!["1".to_string(), String::new()]
        );
        assert!(pages[1].table.is_none());
        assert!(pages[2].table.is_none());
    }

    #[test]
    fn test_parse_no_pages() {
        assert!(JsonExtractor::parse("doc.json", "{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = JsonExtractor::parse("broken.json", "{\"pages\": [").unwrap_err();
        assert!(matches!(err, DailyPriceError::Extraction { .. }));
        assert_eq!(err.file(), Some("broken.json"));
    }
}
