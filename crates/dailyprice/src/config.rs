//! Pipeline configuration.

use dailyprice_ingest::{
    BatchLoader, DEFAULT_FOOTER_MARKER, DEFAULT_PREFIX, DateResolver, RecordAssembler,
    SourceFormat,
};
use dailyprice_store::{DEFAULT_HISTORY, DEFAULT_SNAPSHOT, Sink};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default directory holding the price-list documents.
pub const DEFAULT_DATA_DIR: &str = "./stock_files/";

/// Everything a pipeline run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory of price-list documents.
    pub data_dir: PathBuf,
    /// Snapshot CSV, replaced on every run.
    pub snapshot: PathBuf,
    /// History CSV, appended on every run.
    pub history: PathBuf,
    /// Prefix token of document names.
    pub prefix: String,
    /// Rows containing this text are dropped. Empty disables the filter.
    pub footer_marker: String,
    /// Format of the documents in `data_dir`.
    pub format: SourceFormat,
    /// Extract documents on the rayon thread pool.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            snapshot: PathBuf::from(DEFAULT_SNAPSHOT),
            history: PathBuf::from(DEFAULT_HISTORY),
            prefix: DEFAULT_PREFIX.to_string(),
            footer_marker: DEFAULT_FOOTER_MARKER.to_string(),
            format: SourceFormat::default(),
            parallel: true,
        }
    }
}

impl PipelineConfig {
    /// Default configuration reading from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Sets the snapshot and history files.
    #[must_use]
    pub fn with_outputs(mut self, snapshot: impl Into<PathBuf>, history: impl Into<PathBuf>) -> Self {
        self.snapshot = snapshot.into();
        self.history = history.into();
        self
    }

    /// Sets the document format.
    #[must_use]
    pub const fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = format;
        self
    }

    /// Enables or disables parallel extraction.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Filename date resolver for this configuration.
    pub fn resolver(&self) -> DateResolver {
        DateResolver::new(self.prefix.as_str())
    }

    /// Batch loader for this configuration.
    pub fn loader(&self) -> BatchLoader {
        BatchLoader::new(self.format.extractor())
            .with_resolver(self.resolver())
            .with_assembler(RecordAssembler::new(self.footer_marker.as_str()))
            .with_parallel(self.parallel)
    }

    /// Persistence sink for this configuration.
    pub fn sink(&self) -> Sink {
        Sink::new(&self.snapshot, &self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./stock_files/"));
        assert_eq!(config.snapshot, PathBuf::from("output.csv"));
        assert_eq!(config.history, PathBuf::from("stock_history.csv"));
        assert_eq!(config.prefix, "DAILY_PRICE_LIST");
        assert_eq!(config.footer_marker, "NIGERIAN EXCHANGE");
        assert_eq!(config.format, SourceFormat::Csv);
        assert!(config.parallel);
    }

    #[test]
    fn test_builders() {
        let config = PipelineConfig::new("/data")
            .with_outputs("/out/snap.csv", "/out/hist.csv")
            .with_format(SourceFormat::Json)
            .with_parallel(false);

        assert_eq!(config.data_dir, PathBuf::from("/data"));
        assert_eq!(config.sink().snapshot(), PathBuf::from("/out/snap.csv"));
        assert_eq!(config.sink().history(), PathBuf::from("/out/hist.csv"));
        assert_eq!(config.format, SourceFormat::Json);
        assert!(!config.parallel);
        assert_eq!(config.resolver().prefix(), "DAILY_PRICE_LIST");
    }
}
