//! Persistence for dailyprice.
//!
//! - [`Sink`] writes the derived corpus to a snapshot file, replaced on every
//!   run, and to a history file that grows by one batch per run.
//! - [`export_json`] writes the aggregate tables and every symbol's price
//!   series for external consumers.

mod export;
mod sink;

pub use export::{ExportPayload, RANKING_LIMIT, SeriesPoint, SymbolSeries, export_json};
pub use sink::{DEFAULT_HISTORY, DEFAULT_SNAPSHOT, HistoryWrite, Sink, SinkReport, history_header};
