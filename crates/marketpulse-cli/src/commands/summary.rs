use marketpulse_store::ArtifactStore;

use crate::cli::SummaryArgs;
use crate::error::CliError;
use crate::output;

pub fn run(args: &SummaryArgs) -> Result<(), CliError> {
    let store = ArtifactStore::new(&args.out_dir);
    let summary = store.read_summary()?;
    output::render_summary(&summary)
}
