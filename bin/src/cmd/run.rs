//! Pipeline run command implementation.

use super::SourceArgs;
use crate::report;
use anyhow::{Context, Result};
use clap::Args;
use dailyprice::ingest::DEFAULT_FOOTER_MARKER;
use dailyprice::store::{DEFAULT_HISTORY, DEFAULT_SNAPSHOT, export_json};
use dailyprice::{Outcome, PipelineConfig};
use std::path::PathBuf;
use tracing::debug;

/// Options of the `run` subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct RunArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Snapshot CSV, replaced on every run
    #[arg(long, env = "DAILYPRICE_SNAPSHOT", default_value = DEFAULT_SNAPSHOT)]
    snapshot: PathBuf,

    /// History CSV, appended on every run
    #[arg(long, env = "DAILYPRICE_HISTORY", default_value = DEFAULT_HISTORY)]
    history: PathBuf,

    /// Rows containing this text are dropped (empty disables the filter)
    #[arg(long, env = "DAILYPRICE_FOOTER_MARKER", default_value = DEFAULT_FOOTER_MARKER)]
    footer_marker: String,

    /// Extract documents one at a time
    #[arg(long, env = "DAILYPRICE_SEQUENTIAL")]
    sequential: bool,

    /// Rows shown in the combined analysis
    #[arg(long, default_value = "5")]
    top: usize,

    /// Write the aggregate tables to this JSON file
    #[arg(long)]
    export: Option<PathBuf>,
}

impl RunArgs {
    fn config(&self) -> PipelineConfig {
        PipelineConfig {
            footer_marker: self.footer_marker.clone(),
            ..self
                .source
                .config()
                .with_outputs(&self.snapshot, &self.history)
                .with_parallel(!self.sequential)
        }
    }
}

/// Runs the pipeline and prints the report.
pub(crate) fn execute(args: &RunArgs) -> Result<()> {
    let config = args.config();
    debug!(?config, "pipeline configuration");

    let run = dailyprice::run(&config)
        .with_context(|| format!("pipeline failed for '{}'", config.data_dir.display()))?;

    report::failures(&run.failures);

    let written = match &run.outcome {
        Outcome::Written(written) => written,
        Outcome::NoData(reason) => {
            println!("{}", report::no_data(*reason));
            return Ok(());
        }
    };

    report::analysis(written, args.top);
    report::saved(&written.sink);

    if let Some(path) = &args.export {
        export_json(&written.corpus, &written.aggregates, path)
            .with_context(|| format!("failed to export to '{}'", path.display()))?;
        println!("Aggregates exported to '{}'", path.display());
    }

    report::summary(&run.summary);

    Ok(())
}
