//! dailyprice CLI binary.
//!
//! Provides the command-line interface for the daily price-list pipeline.

mod cmd;
mod logging;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use logging::LogFormat;
use std::process;

#[derive(Parser)]
#[command(name = "dailyprice")]
#[command(about = "Daily stock-exchange price-list pipeline", long_about = None)]
#[command(version)]
struct Cli {
    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty, env = "DAILYPRICE_LOG_FORMAT")]
    log_format: LogFormat,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, clean, derive, aggregate and persist the price lists
    Run(cmd::run::RunArgs),

    /// Show the date resolved from each document name
    Resolve(cmd::SourceArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.log_format, cli.quiet)?;

    match cli.command {
        Commands::Run(args) => cmd::run::execute(&args)?,
        Commands::Resolve(args) => cmd::resolve::execute(&args)?,
    }

    Ok(())
}
