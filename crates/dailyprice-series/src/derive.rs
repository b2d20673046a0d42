//! Per-symbol time-series derivation.
//!
//! Records are sorted by `(symbol, date)` and folded with a [`SeriesFold`],
//! which carries the running state of the current symbol: last close, day
//! count and the running product of growth factors.

use dailyprice_traits::{CleanRecord, Corpus, DerivedRecord, Symbol};

/// Running state of the symbol currently being folded.
#[derive(Debug, Clone, PartialEq)]
struct SeriesState {
    symbol: Symbol,
    last_close: f64,
    day: u32,
    product: f64,
}

/// Folds `(symbol, date)`-ordered records into [`DerivedRecord`]s.
///
/// The state resets whenever the symbol changes, so the first record of every
/// symbol gets day 1, no percent change, growth 1 and cumulative return 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesFold {
    state: Option<SeriesState>,
}

impl SeriesFold {
    /// A fold with no symbol in progress.
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Consumes the next record and returns it with its derived fields.
    pub fn push(&mut self, record: CleanRecord) -> DerivedRecord {
        if let Some(state) = self
            .state
            .as_mut()
            .filter(|state| state.symbol == record.symbol)
        {
            let pct_change = percent_change(state.last_close, record.close);
            let growth = growth_factor(pct_change);

            state.day += 1;
            state.product *= growth;
            state.last_close = record.close;

            return DerivedRecord {
                day: state.day,
                pct_change,
                growth,
                cumulative_return: (state.product - 1.0) * 100.0,
                record,
            };
        }

        self.state = Some(SeriesState {
            symbol: record.symbol.clone(),
            last_close: record.close,
            day: 1,
            product: 1.0,
        });

        DerivedRecord {
            day: 1,
            pct_change: None,
            growth: 1.0,
            cumulative_return: 0.0,
            record,
        }
    }
}

/// Percent change from `previous` to `current`.
///
/// `None` when `previous` is zero, where the change is undefined.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current / previous - 1.0) * 100.0)
}

/// `1 + pct_change / 100`, or exactly `1.0` without a percent change.
pub fn growth_factor(pct_change: Option<f64>) -> f64 {
    pct_change.map_or(1.0, |pct| 1.0 + pct / 100.0)
}

/// Sorts records by `(symbol, date)` and derives every symbol's series.
///
/// The sort is stable, so same-day records of a symbol keep their input order.
pub fn derive(mut records: Vec<CleanRecord>) -> Corpus {
    records.sort_by(|a, b| a.symbol.cmp(&b.symbol).then_with(|| a.date.cmp(&b.date)));

    let mut fold = SeriesFold::new();
    let derived = records.into_iter().map(|record| fold.push(record)).collect();

    Corpus::new(derived)
}
