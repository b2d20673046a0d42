//! JSON export of the aggregate tables and per-symbol price series.

use dailyprice_series::Aggregates;
use dailyprice_traits::{AggregateRow, Corpus, Date, Result, Symbol};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Length of each ranking in the export.
pub const RANKING_LIMIT: usize = 10;

/// One observation of a symbol's series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// 1-based trading-day index.
    pub day: u32,
    /// Trading date.
    pub date: Date,
    /// Closing price.
    pub close: f64,
    /// Cumulative return in percent.
    pub cumulative_return: f64,
}

/// A symbol's series in day order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolSeries {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Observations, day 1 first.
    pub points: Vec<SeriesPoint>,
}

fn symbol_series(corpus: &Corpus) -> Vec<SymbolSeries> {
    corpus
        .series()
        .filter_map(|rows| {
            let first = rows.first()?;
            Some(SymbolSeries {
                symbol: first.record.symbol.clone(),
                points: rows
                    .iter()
                    .map(|row| SeriesPoint {
                        day: row.day,
                        date: row.record.date,
                        close: row.record.close,
                        cumulative_return: row.cumulative_return,
                    })
                    .collect(),
            })
        })
        .collect()
}

/// What an external plotter or notebook reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportPayload<'a> {
    /// Volume/close correlation, `null` when undefined.
    pub correlation: Option<f64>,
    /// Every symbol, by total volume descending.
    pub table: &'a [AggregateRow],
    /// Most traded symbols.
    pub top_by_volume: &'a [AggregateRow],
    /// Least traded symbols, ascending.
    pub bottom_by_volume: Vec<AggregateRow>,
    /// Highest mean close.
    pub top_by_mean_close: &'a [AggregateRow],
    /// Every symbol's closing-price series, by symbol.
    pub series: Vec<SymbolSeries>,
}

impl<'a> ExportPayload<'a> {
    /// Builds the payload from the derived corpus and its aggregate tables.
    pub fn new(corpus: &Corpus, aggregates: &'a Aggregates) -> Self {
        Self {
            correlation: aggregates.correlation,
            table: &aggregates.table,
            top_by_volume: aggregates.top_by_volume(RANKING_LIMIT),
            bottom_by_volume: aggregates.bottom_by_volume(RANKING_LIMIT),
            top_by_mean_close: aggregates.top_by_mean_close(RANKING_LIMIT),
            series: symbol_series(corpus),
        }
    }
}

/// Writes `aggregates` and the series of `corpus` to `path` as pretty-printed
/// JSON.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn export_json(corpus: &Corpus, aggregates: &Aggregates, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &ExportPayload::new(corpus, aggregates))
        .map_err(std::io::Error::from)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(path = %path.display(), symbols = aggregates.len(), "exported aggregates");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dailyprice_traits::{CleanRecord, DerivedRecord};
    use tempfile::TempDir;

    fn derived(symbol: &str, day: u32, close: f64, cumulative_return: f64) -> DerivedRecord {
        DerivedRecord {
            record: CleanRecord {
                symbol: symbol.to_string(),
                close,
                volume: 100,
                date: Date::from_ymd_opt(2024, 5, 19 + day).unwrap(),
            },
            day,
            pct_change: None,
            growth: 1.0,
            cumulative_return,
        }
    }

    fn row(symbol: &str, total_volume: u64, mean_close: f64) -> AggregateRow {
        AggregateRow {
            symbol: symbol.to_string(),
            total_volume,
            mean_close,
        }
    }

    #[test]
    fn test_export_json() {
        let table = vec![row("GHI", 9000, 1.0), row("ABC", 3000, 10.5)];
        let aggregates = Aggregates {
            by_mean_close: vec![table[1].clone(), table[0].clone()],
            table,
            correlation: Some(-1.0),
        };

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export/aggregates.json");
        let corpus = Corpus::new(vec![
            derived("ABC", 1, 10.0, 0.0),
            derived("ABC", 2, 11.0, 10.0),
            derived("GHI", 1, 1.0, 0.0),
        ]);
        export_json(&corpus, &aggregates, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["correlation"], -1.0);
        assert_eq!(value["table"][0]["symbol"], "GHI");
        assert_eq!(value["table"][1]["total_volume"], 3000);
        assert_eq!(value["bottom_by_volume"][0]["symbol"], "ABC");
        assert_eq!(value["top_by_mean_close"][0]["mean_close"], 10.5);

        let series = value["series"].as_array().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0]["symbol"], "ABC");
        assert_eq!(series[0]["points"][1]["day"], 2);
        assert_eq!(series[0]["points"][1]["close"], 11.0);
        assert_eq!(series[0]["points"][1]["date"], "2024-05-21");
        assert_eq!(series[1]["points"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_correlation_is_null() {
        let aggregates = Aggregates::default();
        let json = serde_json::to_value(ExportPayload::new(&Corpus::default(), &aggregates)).unwrap();

        assert!(json["correlation"].is_null());
        assert_eq!(json["table"].as_array().unwrap().len(), 0);
        assert_eq!(json["series"].as_array().unwrap().len(), 0);
    }
}
