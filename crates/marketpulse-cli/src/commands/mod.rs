mod analyze;
mod summary;

use serde::Serialize;
use uuid::Uuid;

use marketpulse_core::UtcDateTime;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Machine-readable report printed after an `analyze` run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub request_id: String,
    pub generated_at: UtcDateTime,
    pub indices_analyzed: usize,
    pub stocks_analyzed: usize,
    pub correlation_pairs: usize,
    pub regions: usize,
    pub sectors: usize,
    pub artifacts_dir: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl RunReport {
    pub fn new(artifacts_dir: String) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            generated_at: UtcDateTime::now(),
            indices_analyzed: 0,
            stocks_analyzed: 0,
            correlation_pairs: 0,
            regions: 0,
            sectors: 0,
            artifacts_dir,
            warnings: Vec::new(),
        }
    }
}

pub fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Analyze(args) => {
            let report = analyze::run(args, cli.pretty)?;
            crate::output::render_report(&report, cli.pretty)
        }
        Command::Summary(args) => summary::run(args),
    }
}
