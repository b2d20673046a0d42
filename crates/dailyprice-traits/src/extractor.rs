//! Document extractor trait.
//!
//! The pipeline never decodes documents itself. A [`DocumentExtractor`] opens
//! one document and hands back its pages, each of which may carry a table of
//! text cells. Everything downstream consumes only that shape.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One table row: a list of cell strings. Blank cells are empty strings.
pub type Row = Vec<String>;

/// One page of an extracted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// The table detected on the page, header row first, if any.
    #[serde(default)]
    pub table: Option<Vec<Row>>,
}

impl Page {
    /// A page carrying a table.
    pub const fn with_table(rows: Vec<Row>) -> Self {
        Self { table: Some(rows) }
    }

    /// A page with no detected table.
    pub const fn empty() -> Self {
        Self { table: None }
    }
}

/// Opens a price-list document and returns its pages.
///
/// Implementations must be thread-safe (`Send + Sync`) so documents can be
/// extracted in parallel.
///
/// # Example
///
/// ```no_run
/// use dailyprice_traits::{DocumentExtractor, Page, Result};
/// use std::path::Path;
///
/// struct FixedExtractor;
///
/// impl DocumentExtractor for FixedExtractor {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["txt"]
///     }
///
///     fn extract(&self, _path: &Path) -> Result<Vec<Page>> {
///         Ok(vec![Page::empty()])
///     }
/// }
/// ```
pub trait DocumentExtractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// File extensions (without the dot) this extractor reads.
    fn extensions(&self) -> &[&str];

    /// Whether `path` has one of [`extensions`](Self::extensions),
    /// compared case-insensitively.
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|supported| supported.eq_ignore_ascii_case(ext))
            })
    }

    /// Extracts every page of the document at `path`, in page order.
    ///
    /// # Errors
    ///
    /// Returns [`DailyPriceError::Extraction`](crate::DailyPriceError::Extraction)
    /// if the document cannot be opened or decoded.
    fn extract(&self, path: &Path) -> Result<Vec<Page>>;
}
