use super::loader::{ensure_dir, load_dataset};
use crate::analysis::config::HistoConfig;
use crate::analysis::dataset::DdgDataset;
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::render::bars::{self, Bar};
use crate::render::Labels;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One bar chart per position: `<output_dir>/histogram_<label>.svg`.
#[instrument(skip_all, name = "histo_workflow")]
pub fn run(config: &HistoConfig, reporter: &ProgressReporter) -> Result<Vec<PathBuf>, AnalysisError> {
    config.plot.validate()?;
    let dataset = load_dataset(&config.input, reporter)?;
    ensure_dir(&config.output_dir)?;

    reporter.report(Progress::PhaseStart {
        name: "Rendering bar charts",
    });
    reporter.report(Progress::TaskStart {
        total_steps: dataset.len() as u64,
    });

    let indices: Vec<usize> = (0..dataset.len()).collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = indices.iter();

    #[cfg(feature = "parallel")]
    let iterator = indices.par_iter();

    let results: Vec<Result<PathBuf, AnalysisError>> = iterator
        .map(|&i| {
            let result = render_position(&dataset, i, config);
            reporter.report(Progress::TaskIncrement);
            result
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let written = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    info!(figures = written.len(), "Per-position histograms written.");
    Ok(written)
}

fn render_position(dataset: &DdgDataset, index: usize, config: &HistoConfig) -> Result<PathBuf, AnalysisError> {
    let label = dataset.positions()[index].label();
    let bars: Vec<Bar> = dataset
        .mutations()
        .iter()
        .zip(dataset.row(index))
        .map(|(m, value)| Bar::new(m.to_string(), value.avg, config.error_bars.then_some(value.std)))
        .collect();

    let path = config.output_dir.join(format!("histogram_{}.svg", label));
    debug!("Rendering {:?}", path);
    let labels = Labels {
        title: &label,
        x: "Mutation",
        y: "DDG (kcal/mol)",
    };
    Ok(bars::render(&path, &config.plot, &bars, &labels)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::config::PlotConfig;
    use crate::workflows::loader::tests::scan_fixture;

    #[test]
    fn writes_one_figure_per_position() {
        let fixture = scan_fixture();
        let config = HistoConfig {
            input: fixture.input.clone(),
            output_dir: fixture.path("histograms"),
            plot: PlotConfig::default(),
            error_bars: true,
        };
        let mut written = run(&config, &ProgressReporter::new()).unwrap();
        written.sort();
        let expected: Vec<PathBuf> = ["AA3", "KA2", "MA1"]
            .iter()
            .map(|l| fixture.path(&format!("histograms/histogram_{}.svg", l)))
            .collect();
        assert_eq!(written, expected);
        assert!(written.iter().all(|p| p.is_file()));
    }

    #[test]
    fn selection_limits_figures() {
        let mut fixture = scan_fixture();
        fixture.input.selection = Some("A1".parse().unwrap());
        let config = HistoConfig {
            input: fixture.input.clone(),
            output_dir: fixture.path("histograms"),
            plot: PlotConfig::default(),
            error_bars: false,
        };
        let written = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(written, vec![fixture.path("histograms/histogram_MA1.svg")]);
    }
}
