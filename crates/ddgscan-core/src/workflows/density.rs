use super::loader::{chunk_path, ensure_parent, load_dataset};
use crate::analysis::config::{DensityConfig, DensityKind};
use crate::analysis::dataset::DdgDataset;
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::core::io::table::{self, Delimiter};
use crate::core::stats::StatsError;
use crate::core::stats::histogram::Histogram;
use crate::core::stats::kde::GaussianKde;
use crate::render::density::{self, Series, step_points};
use crate::render::{Labels, svg_path};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct DensityResult {
    pub figures: Vec<PathBuf>,
    pub table: Option<PathBuf>,
    /// One curve per position that had enough data.
    pub series: Vec<Series>,
}

/// Distribution of each position's average DDGs, as a KDE curve or a histogram outline.
#[instrument(skip_all, name = "density_workflow")]
pub fn run(config: &DensityConfig, reporter: &ProgressReporter) -> Result<DensityResult, AnalysisError> {
    config.validate()?;
    let dataset = load_dataset(&config.input, reporter)?;
    let base = svg_path(&config.output);
    ensure_parent(&base)?;

    let chunks = dataset.chunks(config.splice);
    reporter.report(Progress::PhaseStart {
        name: "Rendering density plots",
    });
    reporter.report(Progress::TaskStart {
        total_steps: chunks.len() as u64,
    });

    let mut figures = Vec::with_capacity(chunks.len());
    let mut all_series = Vec::with_capacity(dataset.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let series = curves(chunk, config, reporter)?;
        let labels = Labels {
            title: match config.kind {
                DensityKind::Kde => "DDG density",
                DensityKind::Histogram => "DDG histogram",
            },
            x: "DDG (kcal/mol)",
            y: "Density",
        };
        let path = chunk_path(&base, i, chunks.len());
        figures.push(density::render(&path, &config.plot, &series, &labels)?);
        all_series.extend(series);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let table = match &config.table {
        Some(path) => {
            ensure_parent(path)?;
            write_table(path, &all_series)?;
            Some(path.clone())
        }
        None => None,
    };

    info!(figures = figures.len(), curves = all_series.len(), "Density estimation finished.");
    Ok(DensityResult {
        figures,
        table,
        series: all_series,
    })
}

fn curves(
    chunk: &DdgDataset,
    config: &DensityConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<Series>, AnalysisError> {
    let mut series = Vec::with_capacity(chunk.len());
    for (i, position) in chunk.positions().iter().enumerate() {
        let label = position.label();
        let values = chunk.averages(i);
        let points = match config.kind {
            DensityKind::Kde => match GaussianKde::new(&values) {
                Ok(kde) => kde.grid(config.points, None),
                Err(StatsError::DegenerateSample { n, std }) => {
                    warn!(n, std, "Cannot estimate a density for {}; skipping.", label);
                    reporter.report(Progress::Message(format!("Skipped {}: values too uniform for a density", label)));
                    continue;
                }
                Err(e) => return Err(AnalysisError::Stats { label, source: e }),
            },
            DensityKind::Histogram => {
                let histogram = Histogram::new(&values, config.bins, None)
                    .map_err(|e| AnalysisError::Stats { label: label.clone(), source: e })?;
                step_points(&histogram)
            }
        };
        series.push(Series::new(label, points));
    }
    Ok(series)
}

fn write_table(path: &std::path::Path, series: &[Series]) -> Result<(), AnalysisError> {
    let header = ["position", "ddg", "density"].map(String::from);
    let rows = series.iter().flat_map(|s| {
        s.points
            .iter()
            .map(|&(x, y)| vec![s.name.clone(), table::format_value(x), format!("{:.6}", y)])
    });
    table::write_rows(table::create(path)?, Delimiter::Tab, &header, rows)?;
    Ok(())
}
