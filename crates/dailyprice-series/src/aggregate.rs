//! Per-symbol aggregation and the volume/price correlation.

use dailyprice_traits::stats::pearson;
use dailyprice_traits::{AggregateRow, Corpus, DailyPriceError, Result, columns};
use ndarray::Array1;
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Column holding the summed volume of a symbol.
pub const TOTAL_VOLUME: &str = "Total_Volume";

/// Column holding the mean close of a symbol.
pub const MEAN_CLOSE: &str = "Mean_Close";

/// Aggregate tables over the derived corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    /// One row per symbol, by total volume descending then symbol ascending.
    pub table: Vec<AggregateRow>,
    /// The same rows by mean close descending then symbol ascending.
    pub by_mean_close: Vec<AggregateRow>,
    /// Pearson correlation between total volume and mean close across
    /// symbols. Missing with fewer than two symbols or zero variance.
    pub correlation: Option<f64>,
}

impl Aggregates {
    /// The `n` most traded symbols, most traded first.
    pub fn top_by_volume(&self, n: usize) -> &[AggregateRow] {
        &self.table[..n.min(self.table.len())]
    }

    /// The `n` least traded symbols, least traded first.
    pub fn bottom_by_volume(&self, n: usize) -> Vec<AggregateRow> {
        let mut bottom: Vec<AggregateRow> = self.table.iter().rev().take(n).cloned().collect();
        bottom.sort_by(|a, b| {
            a.total_volume
                .cmp(&b.total_volume)
                .then_with(|| a.symbol.cmp(&b.symbol))
        });
        bottom
    }

    /// The `n` symbols with the highest mean close.
    pub fn top_by_mean_close(&self, n: usize) -> &[AggregateRow] {
        &self.by_mean_close[..n.min(self.by_mean_close.len())]
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether there are no symbols.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn descending_then_symbol() -> SortMultipleOptions {
    SortMultipleOptions::default().with_order_descending_multi([true, false])
}

/// Groups the corpus by symbol and builds the ranked aggregate tables.
///
/// # Errors
///
/// Returns [`DailyPriceError::Polars`] if the frame operations fail.
pub fn aggregate(corpus: &Corpus) -> Result<Aggregates> {
    if corpus.is_empty() {
        return Ok(Aggregates::default());
    }

    let grouped = corpus
        .to_frame()?
        .lazy()
        .group_by([col(columns::SYMBOL)])
        .agg([
            col(columns::VOLUME).sum().alias(TOTAL_VOLUME),
            col(columns::CLOSE).mean().alias(MEAN_CLOSE),
        ]);

    let by_volume = grouped
        .clone()
        .select([col(columns::SYMBOL), col(TOTAL_VOLUME)])
        .sort_by_exprs([col(TOTAL_VOLUME), col(columns::SYMBOL)], descending_then_symbol());
    let by_close = grouped
        .select([col(columns::SYMBOL), col(MEAN_CLOSE)])
        .sort_by_exprs([col(MEAN_CLOSE), col(columns::SYMBOL)], descending_then_symbol());

    // Join output order is not guaranteed, so rank again afterwards.
    let joined = by_volume
        .join(
            by_close,
            [col(columns::SYMBOL)],
            [col(columns::SYMBOL)],
            JoinArgs::new(JoinType::Inner),
        )
        .sort_by_exprs([col(TOTAL_VOLUME), col(columns::SYMBOL)], descending_then_symbol())
        .collect()?;

    let table = rows(&joined)?;

    let mut by_mean_close = table.clone();
    by_mean_close.sort_by(|a, b| {
        b.mean_close
            .total_cmp(&a.mean_close)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    let correlation = volume_close_correlation(&table);
    debug!(symbols = table.len(), ?correlation, "aggregated corpus");

    Ok(Aggregates {
        table,
        by_mean_close,
        correlation,
    })
}

/// Pearson correlation between total volume and mean close of `rows`.
pub fn volume_close_correlation(rows: &[AggregateRow]) -> Option<f64> {
    let volumes: Array1<f64> = rows.iter().map(|r| r.total_volume as f64).collect();
    let closes: Array1<f64> = rows.iter().map(|r| r.mean_close).collect();
    pearson(&volumes, &closes)
}

fn rows(frame: &DataFrame) -> Result<Vec<AggregateRow>> {
    let symbols = frame.column(columns::SYMBOL)?.as_materialized_series().str()?;
    let volumes = frame.column(TOTAL_VOLUME)?.as_materialized_series().u64()?;
    let closes = frame.column(MEAN_CLOSE)?.as_materialized_series().f64()?;

    symbols
        .into_iter()
        .zip(volumes)
        .zip(closes)
        .map(|((symbol, volume), close)| match (symbol, volume, close) {
            (Some(symbol), Some(total_volume), Some(mean_close)) => Ok(AggregateRow {
                symbol: symbol.to_string(),
                total_volume,
                mean_close,
            }),
            _ => Err(DailyPriceError::InvalidData(
                "null value in aggregate table".to_string(),
            )),
        })
        .collect()
}
