//! Corpus cleaning: raw text rows to typed [`CleanRecord`]s.
//!
//! Each required field goes through a total coercion function returning
//! `Option`. A row survives only if all four coercions succeed; failures are
//! counted per field, never raised.

use chrono::NaiveDate;
use dailyprice_traits::{CleanRecord, Date, RawRecord, Symbol};
use serde::Serialize;

/// Thousands separator stripped from volume text.
pub const GROUPING_SEPARATOR: char = ',';

/// Format of the date stamped on raw records.
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Counts from one cleaning pass.
///
/// A row with several bad fields is counted once under each of them, so the
/// per-field counts may add up to more than [`rows_dropped`](Self::rows_dropped).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    /// Rows handed to the cleaner.
    pub rows_in: usize,
    /// Rows that became records.
    pub rows_kept: usize,
    /// Rows with an empty symbol.
    pub missing_symbol: usize,
    /// Rows whose close is empty or not a finite number.
    pub missing_close: usize,
    /// Rows whose volume is empty or not a non-negative integer.
    pub missing_volume: usize,
    /// Rows whose date is empty or not a calendar date.
    pub missing_date: usize,
}

impl CleaningStats {
    /// Rows that were dropped.
    pub const fn rows_dropped(&self) -> usize {
        self.rows_in - self.rows_kept
    }
}

/// Output of [`clean`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cleaned {
    /// Valid records, in input order.
    pub records: Vec<CleanRecord>,
    /// Counts.
    pub stats: CleaningStats,
}

fn present(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Coerces a symbol cell. Blank text is missing; surrounding whitespace is
/// removed.
pub fn parse_symbol(text: &str) -> Option<Symbol> {
    present(text).map(str::to_string)
}

/// Coerces a close cell to a finite decimal.
///
/// # Examples
///
/// ```
/// use dailyprice_series::parse_close;
///
/// assert_eq!(parse_close(" 10.50 "), Some(10.5));
/// assert_eq!(parse_close("-"), None);
/// assert_eq!(parse_close(""), None);
/// ```
pub fn parse_close(text: &str) -> Option<f64> {
    present(text)?.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerces a volume cell to a non-negative integer after removing every
/// grouping separator.
///
/// # Examples
///
/// ```
/// use dailyprice_series::parse_volume;
///
/// assert_eq!(parse_volume("12,345"), Some(12345));
/// assert_eq!(parse_volume("   "), None);
/// ```
pub fn parse_volume(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|&c| c != GROUPING_SEPARATOR).collect();
    present(&digits)?.parse::<u64>().ok()
}

/// Coerces a record date cell (`YYYY-MM-DD`).
pub fn parse_date(text: &str) -> Option<Date> {
    NaiveDate::parse_from_str(present(text)?, RECORD_DATE_FORMAT).ok()
}

/// Cleans raw records in one deterministic pass.
///
/// Only symbol, close, volume and date are kept. Any row with one of them
/// missing or invalid is dropped.
pub fn clean<'a, I>(rows: I) -> Cleaned
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let mut cleaned = Cleaned::default();

    for raw in rows {
        cleaned.stats.rows_in += 1;

        let symbol = parse_symbol(&raw.symbol);
        let close = parse_close(&raw.close);
        let volume = parse_volume(&raw.volume);
        let date = parse_date(&raw.date);

        cleaned.stats.missing_symbol += usize::from(symbol.is_none());
        cleaned.stats.missing_close += usize::from(close.is_none());
        cleaned.stats.missing_volume += usize::from(volume.is_none());
        cleaned.stats.missing_date += usize::from(date.is_none());

        if let (Some(symbol), Some(close), Some(volume), Some(date)) = (symbol, close, volume, date)
        {
            cleaned.records.push(CleanRecord {
                symbol,
                close,
                volume,
                date,
            });
        }
    }

    cleaned.stats.rows_kept = cleaned.records.len();
    cleaned
}

/// Runs [`clean`] over already-clean records rendered back to text.
///
/// Since every field of a [`CleanRecord`] is valid, the result always equals
/// the input.
pub fn reclean(records: &[CleanRecord]) -> Cleaned {
    let rendered: Vec<RawRecord> = records.iter().map(RawRecord::from).collect();
    clean(&rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(symbol: &str, close: &str, volume: &str, date: &str) -> RawRecord {
        RawRecord {
            serial: "1".to_string(),
            symbol: symbol.to_string(),
            close: close.to_string(),
            volume: volume.to_string(),
            date: date.to_string(),
            ..RawRecord::default()
        }
    }

    #[test]
    fn test_parse_volume() {
        assert_eq!(parse_volume("12,345"), Some(12345));
        assert_eq!(parse_volume("1,234,567"), Some(1_234_567));
        assert_eq!(parse_volume("0"), Some(0));
        assert_eq!(parse_volume(""), None);
        assert_eq!(parse_volume("  "), None);
        assert_eq!(parse_volume(","), None);
        assert_eq!(parse_volume("-5"), None);
        assert_eq!(parse_volume("n/a"), None);
    }

    #[test]
    fn test_parse_close() {
        assert_eq!(parse_close("10.00"), Some(10.0));
        assert_eq!(parse_close("0.2"), Some(0.2));
        assert_eq!(parse_close("NaN"), None);
        assert_eq!(parse_close("inf"), None);
        assert_eq!(parse_close("1,250.00"), None);
        assert_eq!(parse_close("\n"), None);
    }

    #[test]
    fn test_parse_symbol_and_date() {
        assert_eq!(parse_symbol(" ABC\n"), Some("ABC".to_string()));
        assert_eq!(parse_symbol(" "), None);
        assert_eq!(
            parse_date("2024-05-20"),
            NaiveDate::from_ymd_opt(2024, 5, 20)
        );
        assert_eq!(parse_date("May 20 2024"), None);
    }

    #[test]
    fn test_clean_projects_and_types() {
        let rows = vec![raw("ABC", "10.00", "1,000", "2024-05-20")];
        let cleaned = clean(&rows);

        assert_eq!(cleaned.records.len(), 1);
        let record = &cleaned.records[0];
        assert_eq!(record.symbol, "ABC");
        assert_eq!(record.close, 10.0);
        assert_eq!(record.volume, 1000);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 5, 20).unwrap());
    }

    #[test]
    fn test_clean_drops_rows_with_missing_fields() {
        let rows = vec![
            raw("ABC", "10.00", "1,000", "2024-05-20"),
            raw("", "10.00", "1,000", "2024-05-20"),
            raw("DEF", "", "1,000", "2024-05-20"),
            raw("GHI", "5.00", " ", "2024-05-20"),
            raw("JKL", "5.00", "100", "not a date"),
            raw("   ", "x", "", ""),
        ];
        let cleaned = clean(&rows);

        assert_eq!(cleaned.records.len(), 1);
        assert_eq!(cleaned.stats.rows_in, 6);
        assert_eq!(cleaned.stats.rows_kept, 1);
        assert_eq!(cleaned.stats.rows_dropped(), 5);
        assert_eq!(cleaned.stats.missing_symbol, 2);
        assert_eq!(cleaned.stats.missing_close, 2);
        assert_eq!(cleaned.stats.missing_volume, 2);
        assert_eq!(cleaned.stats.missing_date, 2);
    }

    #[test]
    fn test_clean_keeps_input_order() {
        let rows = vec![
            raw("XYZ", "1", "1", "2024-05-21"),
            raw("ABC", "2", "2", "2024-05-20"),
        ];
        let symbols: Vec<String> = clean(&rows).records.into_iter().map(|r| r.symbol).collect();
        assert_eq!(symbols, vec!["XYZ", "ABC"]);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let rows = vec![
            raw("ABC", "10.00", "1,000", "2024-05-20"),
            raw("ABC", "10.333333333333334", "12,345", "2024-05-21"),
            raw("DEF", "bad", "1", "2024-05-21"),
            raw(" XYZ ", "0.01", "0", "2024-05-22"),
        ];
        let first = clean(&rows);
        let second = reclean(&first.records);

        assert_eq!(second.records, first.records);
        assert_eq!(second.stats.rows_dropped(), 0);
    }
}
