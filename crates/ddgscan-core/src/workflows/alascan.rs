use super::loader::{chunk_path, ensure_parent, load_dataset, with_suffix};
use crate::analysis::config::ScanConfig;
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::render::bars::{self, Bar};
use crate::render::{Labels, svg_path};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Bar plots of one mutation type across positions, one set of figures per target.
///
/// Positions whose wild type already is the target are left out. With several targets
/// the output name gets a `_<target>` suffix.
#[instrument(skip_all, name = "alascan_workflow")]
pub fn run(config: &ScanConfig, reporter: &ProgressReporter) -> Result<Vec<PathBuf>, AnalysisError> {
    config.validate()?;
    let dataset = load_dataset(&config.input, reporter)?;
    let base = svg_path(&config.output);
    ensure_parent(&base)?;

    reporter.report(Progress::PhaseStart {
        name: "Rendering scan plots",
    });
    reporter.report(Progress::TaskStart {
        total_steps: config.targets.len() as u64,
    });
    let mut written = Vec::new();
    for &target in &config.targets {
        let column = dataset.column(target)?;
        let kept: Vec<usize> = (0..dataset.len())
            .filter(|&i| dataset.positions()[i].wild_type() != target)
            .collect();
        if kept.is_empty() {
            warn!("Every selected position already is '{}'; the scan figure will be empty.", target);
        }
        let target_base = if config.targets.len() > 1 {
            with_suffix(&base, &target.to_string(), "svg")
        } else {
            base.clone()
        };

        let chunks: Vec<&[usize]> = if config.splice == 0 || kept.is_empty() {
            vec![&kept[..]]
        } else {
            kept.chunks(config.splice).collect()
        };
        let title = format!("{} scan", target);
        for (i, chunk) in chunks.iter().enumerate() {
            let bars: Vec<Bar> = chunk
                .iter()
                .map(|&p| {
                    let value = column[p];
                    Bar::new(
                        dataset.positions()[p].label(),
                        value.avg,
                        config.error_bars.then_some(value.std),
                    )
                })
                .collect();
            let labels = Labels {
                title: &title,
                x: "Position",
                y: "DDG (kcal/mol)",
            };
            let path = chunk_path(&target_base, i, chunks.len());
            written.push(bars::render(&path, &config.plot, &bars, &labels)?);
        }
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    info!(figures = written.len(), "Scan plots written.");
    Ok(written)
}
