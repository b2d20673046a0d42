//! Record types shared by every pipeline stage.
//!
//! Rows move through the pipeline as [`RawRecord`] (text, as extracted),
//! [`CleanRecord`] (typed and validated), [`DerivedRecord`] (with per-symbol
//! return fields) and finally [`AggregateRow`] (one row per symbol).

use crate::Result;
use chrono::Datelike;
use polars::prelude::{Column, DataFrame, DataType, NamedFrom, Series};
use serde::{Deserialize, Serialize};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A traded instrument identifier, e.g. `"DANGCEM"`.
pub type Symbol = String;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
pub const CE_TO_UNIX_EPOCH_DAYS: i32 = 719_163;

/// Number of cells in one price-list table row, before the date is stamped.
pub const PRICE_LIST_WIDTH: usize = 13;

/// Column names of the persisted corpus, in output order.
pub mod columns {
    /// Instrument identifier.
    pub const SYMBOL: &str = "Symbol";
    /// Closing price.
    pub const CLOSE: &str = "Close";
    /// Units traded.
    pub const VOLUME: &str = "Volume";
    /// Trading date.
    pub const DATE: &str = "Date";
    /// 1-based rank within the symbol's series.
    pub const DAY: &str = "Day";
    /// Close-to-close change in percent.
    pub const CLOSE_PCT_CHANGE: &str = "Close_pct_change";
    /// 1 + fractional change.
    pub const GROWTH: &str = "Growth";
    /// Compounded change since the first observation, in percent.
    pub const CUMULATIVE_RETURN: &str = "Cumulative_Return";

    /// Every column, in the order written to the snapshot and history files.
    pub const ALL: [&str; 8] = [
        SYMBOL,
        CLOSE,
        VOLUME,
        DATE,
        DAY,
        CLOSE_PCT_CHANGE,
        GROWTH,
        CUMULATIVE_RETURN,
    ];
}

/// One table row as extracted from a price-list page, plus the document date.
///
/// Every field is the raw cell text. Only the symbol, close, volume and date
/// survive cleaning; the rest is carried for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Serial number (`S/N`).
    pub serial: String,
    /// Instrument symbol.
    pub symbol: String,
    /// Previous close.
    pub prev_close: String,
    /// Opening price.
    pub open: String,
    /// Session high.
    pub high: String,
    /// Session low.
    pub low: String,
    /// Closing price.
    pub close: String,
    /// Absolute change.
    pub change: String,
    /// Percent change as printed.
    pub change_pct: String,
    /// Number of deals.
    pub deals: String,
    /// Units traded, possibly with grouping separators.
    pub volume: String,
    /// Traded value.
    pub value: String,
    /// Volume-weighted average price.
    pub vwap: String,
    /// Document date, ISO formatted.
    pub date: String,
}

impl RawRecord {
    /// Builds a record from a date-stamped row of exactly
    /// [`PRICE_LIST_WIDTH`] + 1 cells.
    ///
    /// Returns `None` when the row has any other width.
    pub fn from_row(row: Vec<String>) -> Option<Self> {
        let cells: [String; PRICE_LIST_WIDTH + 1] = row.try_into().ok()?;
        let [
            serial,
            symbol,
            prev_close,
            open,
            high,
            low,
            close,
            change,
            change_pct,
            deals,
            volume,
            value,
            vwap,
            date,
        ] = cells;
        Some(Self {
            serial,
            symbol,
            prev_close,
            open,
            high,
            low,
            close,
            change,
            change_pct,
            deals,
            volume,
            value,
            vwap,
            date,
        })
    }
}

impl From<&CleanRecord> for RawRecord {
    /// Renders a typed record back to text, leaving unused cells empty.
    fn from(record: &CleanRecord) -> Self {
        Self {
            symbol: record.symbol.clone(),
            close: record.close.to_string(),
            volume: record.volume.to_string(),
            date: record.date.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }
}

/// One symbol-day observation after typing and filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    /// Non-empty instrument symbol.
    pub symbol: Symbol,
    /// Finite closing price.
    pub close: f64,
    /// Units traded.
    pub volume: u64,
    /// Trading date.
    pub date: Date,
}

/// A [`CleanRecord`] extended with its position and returns within the
/// symbol's series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    /// Source observation, unchanged.
    #[serde(flatten)]
    pub record: CleanRecord,
    /// 1-based rank within the symbol's by-date series.
    pub day: u32,
    /// Percent change of close against the previous observation; `None` on
    /// the first observation of a symbol.
    pub pct_change: Option<f64>,
    /// `1 + pct_change / 100`, exactly `1.0` when `pct_change` is `None`.
    pub growth: f64,
    /// Compounded change since the first observation, in percent.
    pub cumulative_return: f64,
}

impl DerivedRecord {
    /// Instrument symbol.
    pub fn symbol(&self) -> &str {
        &self.record.symbol
    }
}

/// Per-symbol totals used for the cross-sectional analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Sum of volume over every observation.
    pub total_volume: u64,
    /// Arithmetic mean of close over every observation.
    pub mean_close: f64,
}

/// The derived corpus: the union of every symbol's series, ordered by
/// `(symbol, date)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<DerivedRecord>,
}

impl Corpus {
    /// Wraps records that are already ordered by `(symbol, date)`.
    pub const fn new(records: Vec<DerivedRecord>) -> Self {
        Self { records }
    }

    /// All records in `(symbol, date)` order.
    pub fn records(&self) -> &[DerivedRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the corpus holds no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over each symbol's series as a contiguous slice.
    pub fn series(&self) -> impl Iterator<Item = &[DerivedRecord]> + '_ {
        self.records.chunk_by(|a, b| a.symbol() == b.symbol())
    }

    /// Number of distinct symbols.
    pub fn symbol_count(&self) -> usize {
        self.series().count()
    }

    /// Converts the corpus into a DataFrame with [`columns::ALL`].
    pub fn to_frame(&self) -> Result<DataFrame> {
        let n = self.records.len();
        let mut symbols = Vec::with_capacity(n);
        let mut closes = Vec::with_capacity(n);
        let mut volumes = Vec::with_capacity(n);
        let mut dates = Vec::with_capacity(n);
        let mut days = Vec::with_capacity(n);
        let mut pct_changes = Vec::with_capacity(n);
        let mut growths = Vec::with_capacity(n);
        let mut cumulative = Vec::with_capacity(n);

        for row in &self.records {
            symbols.push(row.record.symbol.as_str());
            closes.push(row.record.close);
            volumes.push(row.record.volume);
            dates.push(row.record.date.num_days_from_ce() - CE_TO_UNIX_EPOCH_DAYS);
            days.push(row.day);
            pct_changes.push(row.pct_change);
            growths.push(row.growth);
            cumulative.push(row.cumulative_return);
        }

        let date_series = Series::new(columns::DATE.into(), dates).cast(&DataType::Date)?;

        let frame = DataFrame::new(vec![
            Column::from(Series::new(columns::SYMBOL.into(), symbols)),
            Column::from(Series::new(columns::CLOSE.into(), closes)),
            Column::from(Series::new(columns::VOLUME.into(), volumes)),
            Column::from(date_series),
            Column::from(Series::new(columns::DAY.into(), days)),
            Column::from(Series::new(columns::CLOSE_PCT_CHANGE.into(), pct_changes)),
            Column::from(Series::new(columns::GROWTH.into(), growths)),
            Column::from(Series::new(columns::CUMULATIVE_RETURN.into(), cumulative)),
        ])?;

        Ok(frame)
    }
}

impl From<Vec<DerivedRecord>> for Corpus {
    fn from(records: Vec<DerivedRecord>) -> Self {
        Self::new(records)
    }
}
