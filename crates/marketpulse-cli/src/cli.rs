//! CLI argument definitions for marketpulse.
//!
//! The CLI drives the batch analytics pipeline over market data collected by
//! the acquisition step and inspects previously written artifacts.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Run the full analytics pipeline and write the artifacts |
//! | `summary` | Render a previously written market summary |
//!
//! # Examples
//!
//! ```bash
//! # Analyze the default data directory
//! marketpulse analyze
//!
//! # Reproducible run with a frozen summary date
//! marketpulse analyze --input-dir data --out-dir data/analysis --as-of 2025-06-30
//!
//! # Inspect the result
//! marketpulse summary --out-dir data/analysis
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Batch analytics over daily price/volume series for market indices and
/// equities.
#[derive(Debug, Parser)]
#[command(
    name = "marketpulse",
    author,
    version,
    about = "Derive returns, trend, volatility, correlation and market summaries from collected price data"
)]
pub struct Cli {
    /// Pretty-print JSON artifacts and the run report.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the analytics pipeline over collected market data.
    ///
    /// Reads `indices_data.json`, `stocks_data.json` and (when present)
    /// `stocks_insights.json` from the input directory, then writes the six
    /// analysis artifacts to the output directory. A single instrument with
    /// unusable data is skipped and reported, never fatal.
    Analyze(AnalyzeArgs),

    /// Render a previously written market summary as a table.
    Summary(SummaryArgs),
}

/// Arguments for the `analyze` command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Directory holding the collected input documents.
    #[arg(long, default_value = "data")]
    pub input_dir: PathBuf,

    /// Directory the analysis artifacts are written to.
    #[arg(long, default_value = "data/analysis")]
    pub out_dir: PathBuf,

    /// Sector membership configuration (sector name -> member symbols).
    ///
    /// Defaults to `<input-dir>/sectors.json`; when the default file is
    /// absent the sector analysis is simply empty.
    #[arg(long)]
    pub sectors: Option<PathBuf>,

    /// Freeze the summary generation date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,
}

/// Arguments for the `summary` command.
#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Directory the artifacts were written to.
    #[arg(long, default_value = "data/analysis")]
    pub out_dir: PathBuf,
}
