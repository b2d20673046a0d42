//! End-to-end pipeline run.
//!
//! Stages run in a fixed order: load documents, clean, derive, aggregate,
//! persist. Only a missing source directory or a failed write ends the run
//! with an error; an empty result is a normal [`Outcome::NoData`].

use crate::config::PipelineConfig;
use dailyprice_ingest::{AssemblyStats, Batch};
use dailyprice_series::{Aggregates, CleaningStats, aggregate, clean, derive};
use dailyprice_store::{HistoryWrite, SinkReport};
use dailyprice_traits::{Corpus, DailyPriceError, Result};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Why a run ended without writing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoData {
    /// The directory had no readable document.
    NoDocuments,
    /// Documents were read but none carried a table row.
    NoRows,
    /// Every row was dropped while cleaning.
    EmptyCorpus,
}

impl fmt::Display for NoData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDocuments => f.write_str("No price list documents could be processed"),
            Self::NoRows => f.write_str("No price data found in the documents after extraction"),
            Self::EmptyCorpus => write!(f, "{}", DailyPriceError::EmptyCorpus),
        }
    }
}

/// Counts gathered over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Documents with a supported extension.
    pub documents_found: usize,
    /// Documents loaded.
    pub documents_processed: usize,
    /// Documents skipped for a bad name or an extraction failure.
    pub documents_skipped: usize,
    /// Files ignored for their extension.
    pub files_ignored: usize,
    /// Row counts from assembly.
    pub assembly: AssemblyStats,
    /// Row counts from cleaning.
    pub cleaning: CleaningStats,
    /// Distinct symbols in the derived corpus.
    pub symbols: usize,
    /// How the history file was written, if it was.
    pub history_write: Option<HistoryWrite>,
}

impl RunSummary {
    fn from_batch(batch: &Batch) -> Self {
        Self {
            documents_found: batch.attempted(),
            documents_processed: batch.documents.len(),
            documents_skipped: batch.failures.len(),
            files_ignored: batch.ignored,
            assembly: batch.stats(),
            ..Self::default()
        }
    }

    /// Records left after cleaning.
    pub const fn clean_rows(&self) -> usize {
        self.cleaning.rows_kept
    }
}

/// Products of a run that reached the sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Written {
    /// Derived corpus, as persisted.
    pub corpus: Corpus,
    /// Aggregate tables.
    pub aggregates: Aggregates,
    /// What the sink wrote.
    pub sink: SinkReport,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Both files were written.
    Written(Box<Written>),
    /// Nothing was written.
    NoData(NoData),
}

/// Result of [`run`].
#[derive(Debug)]
pub struct PipelineRun {
    /// How the run ended.
    pub outcome: Outcome,
    /// Counts.
    pub summary: RunSummary,
    /// Documents that were skipped, in file-name order.
    pub failures: Vec<DailyPriceError>,
}

impl PipelineRun {
    /// The written products, if the run reached the sink.
    pub fn written(&self) -> Option<&Written> {
        match &self.outcome {
            Outcome::Written(written) => Some(&**written),
            Outcome::NoData(_) => None,
        }
    }
}

/// Runs the pipeline described by `config`.
///
/// # Errors
///
/// Returns [`DailyPriceError::SourceMissing`] if the data directory does not
/// exist, [`DailyPriceError::HistorySchema`] if the history file has a
/// different header, and I/O or Polars errors from writing.
pub fn run(config: &PipelineConfig) -> Result<PipelineRun> {
    let batch = config.loader().load_dir(&config.data_dir)?;
    let mut summary = RunSummary::from_batch(&batch);
    let Batch {
        records, failures, ..
    } = batch;

    if summary.documents_processed == 0 {
        return Ok(no_data(NoData::NoDocuments, summary, failures));
    }
    if records.is_empty() {
        return Ok(no_data(NoData::NoRows, summary, failures));
    }

    let cleaned = clean(&records);
    summary.cleaning = cleaned.stats;
    info!(
        rows_in = cleaned.stats.rows_in,
        rows_kept = cleaned.stats.rows_kept,
        "cleaned corpus"
    );

    if cleaned.records.is_empty() {
        return Ok(no_data(NoData::EmptyCorpus, summary, failures));
    }

    let corpus = derive(cleaned.records);
    summary.symbols = corpus.symbol_count();

    let aggregates = aggregate(&corpus)?;
    let sink = config.sink().write(&corpus)?;
    summary.history_write = Some(sink.history_write);

    Ok(PipelineRun {
        outcome: Outcome::Written(Box::new(Written {
            corpus,
            aggregates,
            sink,
        })),
        summary,
        failures,
    })
}

fn no_data(reason: NoData, summary: RunSummary, failures: Vec<DailyPriceError>) -> PipelineRun {
    debug!(%reason, "nothing written");
    PipelineRun {
        outcome: Outcome::NoData(reason),
        summary,
        failures,
    }
}
