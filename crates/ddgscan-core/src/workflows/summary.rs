use super::loader::{ensure_parent, load_dataset};
use crate::analysis::config::SummaryConfig;
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::ProgressReporter;
use crate::analysis::summary::{PositionSummary, summarize};
use crate::core::io::table::{self, Delimiter};
use tracing::{info, instrument};

/// Writes a tab-separated summary row per position and returns the rows.
#[instrument(skip_all, name = "summary_workflow")]
pub fn run(config: &SummaryConfig) -> Result<Vec<PositionSummary>, AnalysisError> {
    config.validate()?;
    let dataset = load_dataset(&config.input, &ProgressReporter::new())?;
    let summaries = summarize(&dataset, config.threshold, config.exclude_wild_type);

    ensure_parent(&config.output)?;
    table::write_records(table::create(&config.output)?, Delimiter::Tab, &summaries)?;

    let destabilizing = summaries.iter().filter(|s| s.n_destabilizing > 0).count();
    info!(
        positions = summaries.len(),
        with_destabilizing = destabilizing,
        threshold = config.threshold,
        "Summary written."
    );
    Ok(summaries)
}
