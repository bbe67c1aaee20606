use super::loader::{chunk_path, ensure_parent, load_dataset};
use crate::analysis::config::DistributionConfig;
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::render::boxplot::{self, BoxData};
use crate::render::{Labels, svg_path};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Box plots of the average DDGs of every position.
#[instrument(skip_all, name = "distribution_workflow")]
pub fn run(config: &DistributionConfig, reporter: &ProgressReporter) -> Result<Vec<PathBuf>, AnalysisError> {
    config.plot.validate()?;
    let dataset = load_dataset(&config.input, reporter)?;
    let base = svg_path(&config.output);
    ensure_parent(&base)?;

    let chunks = dataset.chunks(config.splice);
    reporter.report(Progress::PhaseStart {
        name: "Rendering box plots",
    });
    reporter.report(Progress::TaskStart {
        total_steps: chunks.len() as u64,
    });
    let labels = Labels {
        title: "DDG distribution",
        x: "Position",
        y: "DDG (kcal/mol)",
    };
    let mut written = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let boxes: Vec<BoxData> = chunk
            .positions()
            .iter()
            .enumerate()
            .map(|(p, position)| BoxData::new(position.label(), chunk.averages(p)))
            .collect();
        let path = chunk_path(&base, i, chunks.len());
        written.push(boxplot::render(&path, &config.plot, &boxes, &labels)?);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    info!(figures = written.len(), "Distribution plots written.");
    Ok(written)
}
