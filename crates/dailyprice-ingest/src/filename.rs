//! Resolves the trading date embedded in a price-list document name.
//!
//! Names look like `DAILY_PRICE_LIST_May_20_2024.pdf`: a fixed prefix token,
//! then `FullMonthName_Day_Year`, then the extension.

use chrono::NaiveDate;
use dailyprice_traits::{DailyPriceError, Date, Result};
use std::path::Path;

/// Prefix token carried by every price-list document name.
pub const DEFAULT_PREFIX: &str = "DAILY_PRICE_LIST";

/// `chrono` pattern of the date part, e.g. `May_20_2024`.
pub const DATE_PATTERN: &str = "%B_%d_%Y";

const SEPARATORS: [char; 3] = ['_', '-', ' '];

/// Parses document names into trading dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateResolver {
    prefix: String,
}

impl DateResolver {
    /// Resolver for names starting with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The prefix token stripped from names.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Resolves the date of the document called `file_name`.
    ///
    /// The prefix token and the extension are removed, leading separators are
    /// trimmed, and the rest must match [`DATE_PATTERN`].
    ///
    /// # Errors
    ///
    /// Returns [`DailyPriceError::DateParse`] naming the file when the
    /// remainder is not a valid date.
    ///
    /// # Example
    ///
    /// ```
    /// use dailyprice_ingest::DateResolver;
    ///
    /// let resolver = DateResolver::default();
    /// let date = resolver.resolve("DAILY_PRICE_LIST_May_20_2024.pdf").unwrap();
    /// assert_eq!(date.to_string(), "2024-05-20");
    /// ```
    pub fn resolve(&self, file_name: &str) -> Result<Date> {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);

        let stripped = if self.prefix.is_empty() {
            stem.to_string()
        } else {
            stem.replace(&self.prefix, "")
        };
        let remainder = stripped.trim_start_matches(SEPARATORS);

        NaiveDate::parse_from_str(remainder, DATE_PATTERN).map_err(|e| {
            DailyPriceError::DateParse {
                file: file_name.to_string(),
                reason: format!("'{remainder}' does not match {DATE_PATTERN} ({e})"),
            }
        })
    }
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

/// The final component of `path` as a display string.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_standard_name() {
        let resolver = DateResolver::default();
        assert_eq!(
            resolver.resolve("DAILY_PRICE_LIST_May_20_2024.pdf").unwrap(),
            ymd(2024, 5, 20)
        );
        assert_eq!(
            resolver.resolve("DAILY_PRICE_LIST_December_31_2023.csv").unwrap(),
            ymd(2023, 12, 31)
        );
    }

    #[test]
    fn test_resolve_without_extension() {
        let resolver = DateResolver::default();
        assert_eq!(
            resolver.resolve("DAILY_PRICE_LIST_January_02_2024").unwrap(),
            ymd(2024, 1, 2)
        );
    }

    #[test]
    fn test_resolve_trims_leading_separators() {
        let resolver = DateResolver::default();
        assert_eq!(
            resolver.resolve("DAILY_PRICE_LIST__-June_14_2024.json").unwrap(),
            ymd(2024, 6, 14)
        );
    }

    #[test]
    fn test_resolve_custom_prefix() {
        let resolver = DateResolver::new("NGX");
        assert_eq!(resolver.prefix(), "NGX");
        assert_eq!(resolver.resolve("NGX_March_01_2024.pdf").unwrap(), ymd(2024, 3, 1));
    }

    #[test]
    fn test_resolve_bad_name_reports_file() {
        let resolver = DateResolver::default();
        let err = resolver.resolve("DAILY_PRICE_LIST_2024-05-20.pdf").unwrap_err();
        assert!(matches!(err, DailyPriceError::DateParse { .. }));
        assert_eq!(err.file(), Some("DAILY_PRICE_LIST_2024-05-20.pdf"));
        assert!(err.to_string().contains("DAILY_PRICE_LIST_2024-05-20.pdf"));
    }

    #[test]
    fn test_resolve_invalid_calendar_date() {
        let resolver = DateResolver::default();
        assert!(resolver.resolve("DAILY_PRICE_LIST_February_30_2024.pdf").is_err());
    }

    #[test]
    fn test_resolve_from_file_name() {
        let resolver = DateResolver::default();
        let path = Path::new("stock_files").join("DAILY_PRICE_LIST_May_21_2024.pdf");
        assert_eq!(resolver.resolve(&file_name(&path)).unwrap(), ymd(2024, 5, 21));
        assert_eq!(file_name(&path), "DAILY_PRICE_LIST_May_21_2024.pdf");
    }
}
