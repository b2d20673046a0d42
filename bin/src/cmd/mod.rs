//! CLI subcommand modules.

pub(crate) mod resolve;
pub(crate) mod run;

use clap::Args;
use dailyprice::PipelineConfig;
use dailyprice::ingest::{DEFAULT_PREFIX, SourceFormat};
use std::path::PathBuf;

/// Where the documents are and how they are named.
#[derive(Debug, Clone, Args)]
pub(crate) struct SourceArgs {
    /// Directory of price-list documents
    #[arg(short, long, env = "DAILYPRICE_DATA_DIR", default_value = dailyprice::DEFAULT_DATA_DIR)]
    pub(crate) data_dir: PathBuf,

    /// Document format (csv or json)
    #[arg(short, long, env = "DAILYPRICE_FORMAT", default_value = "csv")]
    pub(crate) format: SourceFormat,

    /// Prefix token of document names
    #[arg(long, env = "DAILYPRICE_PREFIX", default_value = DEFAULT_PREFIX)]
    pub(crate) prefix: String,
}

impl SourceArgs {
    /// Pipeline configuration with these source settings and default outputs.
    pub(crate) fn config(&self) -> PipelineConfig {
        PipelineConfig {
            prefix: self.prefix.clone(),
            ..PipelineConfig::new(&self.data_dir).with_format(self.format)
        }
    }
}
