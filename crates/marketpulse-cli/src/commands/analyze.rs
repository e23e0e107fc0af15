use tracing::{info, warn};

use marketpulse_analytics::{Pipeline, PipelineInput};
use marketpulse_core::{SectorMap, UtcDate};
use marketpulse_store::{load_insights, load_instruments, load_sectors, ArtifactStore};

use crate::cli::AnalyzeArgs;
use crate::error::CliError;

use super::RunReport;

const INDICES_DATA_FILE: &str = "indices_data.json";
const STOCKS_DATA_FILE: &str = "stocks_data.json";
const INSIGHTS_DATA_FILE: &str = "stocks_insights.json";
const SECTORS_CONFIG_FILE: &str = "sectors.json";

pub fn run(args: &AnalyzeArgs, pretty: bool) -> Result<RunReport, CliError> {
    let indices = load_instruments(&args.input_dir.join(INDICES_DATA_FILE))?;
    let equities = load_instruments(&args.input_dir.join(STOCKS_DATA_FILE))?;

    // Insight data is optional side input; a missing file is not an error.
    let insights_path = args.input_dir.join(INSIGHTS_DATA_FILE);
    let insights = if insights_path.is_file() {
        load_insights(&insights_path)?
    } else {
        info!(path = %insights_path.display(), "no insight data, equity insights will be null");
        Vec::new()
    };

    let sectors = match &args.sectors {
        Some(path) => load_sectors(path)?,
        None => {
            let default_path = args.input_dir.join(SECTORS_CONFIG_FILE);
            if default_path.is_file() {
                load_sectors(&default_path)?
            } else {
                warn!(
                    path = %default_path.display(),
                    "no sector configuration, sector analysis will be empty"
                );
                SectorMap::new()
            }
        }
    };

    let as_of = match &args.as_of {
        Some(raw) => UtcDate::parse(raw)?,
        None => UtcDate::today(),
    };

    let report = Pipeline::new().run(&PipelineInput {
        indices: &indices,
        equities: &equities,
        insights: &insights,
        sectors: &sectors,
        as_of,
    });

    let store = ArtifactStore::new(&args.out_dir);
    store.write_bundle(&report.bundle, pretty)?;

    let mut run_report = RunReport::new(store.root().display().to_string());
    run_report.indices_analyzed = report.bundle.indices.len();
    run_report.stocks_analyzed = report.bundle.equities.len();
    run_report.correlation_pairs = report.bundle.correlations.len();
    run_report.regions = report.bundle.regions.len();
    run_report.sectors = report.bundle.sectors.len();
    run_report.warnings = report
        .skipped
        .iter()
        .map(ToString::to_string)
        .collect();

    Ok(run_report)
}
