use super::loader::{chunk_path, ensure_parent, load_dataset};
use crate::analysis::config::HeatmapConfig;
use crate::analysis::dataset::DdgDataset;
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::render::heatmap::{self, HeatmapData};
use crate::render::palette::ColorScale;
use crate::render::{Labels, svg_path};
use std::path::PathBuf;
use tracing::{info, instrument};

#[instrument(skip_all, name = "heatmap_workflow")]
pub fn run(config: &HeatmapConfig, reporter: &ProgressReporter) -> Result<Vec<PathBuf>, AnalysisError> {
    config.validate()?;
    let dataset = load_dataset(&config.input, reporter)?;

    let all_values: Vec<f64> = (0..dataset.len()).flat_map(|i| dataset.averages(i)).collect();
    let scale = ColorScale::new(config.colormap, config.vmin, config.vmax, &all_values)?;

    let chunks = dataset.chunks(config.splice);
    let base = svg_path(&config.output);
    ensure_parent(&base)?;

    reporter.report(Progress::PhaseStart {
        name: "Rendering heatmaps",
    });
    reporter.report(Progress::TaskStart {
        total_steps: chunks.len() as u64,
    });
    let mut written = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let path = chunk_path(&base, i, chunks.len());
        written.push(render_chunk(chunk, config, &scale, &path)?);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    info!(figures = written.len(), "Heatmap rendering finished.");
    Ok(written)
}

fn render_chunk(
    chunk: &DdgDataset,
    config: &HeatmapConfig,
    scale: &ColorScale,
    path: &std::path::Path,
) -> Result<PathBuf, AnalysisError> {
    let positions = chunk.labels();
    let mutations: Vec<String> = chunk.mutations().iter().map(char::to_string).collect();
    let by_position: Vec<Vec<f64>> = (0..chunk.len()).map(|i| chunk.averages(i)).collect();

    let path = if config.transpose {
        let by_mutation: Vec<Vec<f64>> = (0..mutations.len())
            .map(|m| by_position.iter().map(|row| row[m]).collect())
            .collect();
        let data = HeatmapData {
            columns: &mutations,
            rows: &positions,
            values: &by_mutation,
        };
        let labels = Labels {
            title: "DDG heatmap",
            x: "Mutation",
            y: "Position",
        };
        heatmap::render(path, &config.plot, &data, scale, &labels)?
    } else {
        let data = HeatmapData {
            columns: &positions,
            rows: &mutations,
            values: &by_position,
        };
        let labels = Labels {
            title: "DDG heatmap",
            x: "Position",
            y: "Mutation",
        };
        heatmap::render(path, &config.plot, &data, scale, &labels)?
    };
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::config::{ColorMap, PlotConfig};
    use crate::render::RenderError;
    use crate::workflows::loader::tests::scan_fixture;
    use std::sync::Mutex;

    fn config(fixture: &crate::workflows::loader::tests::ScanFixture) -> HeatmapConfig {
        HeatmapConfig {
            input: fixture.input.clone(),
            output: fixture.path("figures/heatmap.pdf"),
            plot: PlotConfig::default(),
            colormap: ColorMap::Bwr,
            vmin: None,
            vmax: None,
            splice: 0,
            transpose: false,
        }
    }

    #[test]
    fn writes_single_svg_next_to_requested_output() {
        let fixture = scan_fixture();
        let written = run(&config(&fixture), &ProgressReporter::new()).unwrap();
        assert_eq!(written, vec![fixture.path("figures/heatmap.svg")]);
        let svg = std::fs::read_to_string(&written[0]).unwrap();
        assert!(svg.contains("KA2"));
    }

    #[test]
    fn splice_writes_numbered_figures_and_reports_progress() {
        let fixture = scan_fixture();
        let mut config = config(&fixture);
        config.splice = 2;
        config.transpose = true;
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        let written = run(&config, &reporter).unwrap();
        drop(reporter);
        assert_eq!(
            written,
            vec![fixture.path("figures/heatmap_0.svg"), fixture.path("figures/heatmap_1.svg")]
        );
        assert!(written.iter().all(|p| p.is_file()));
        let events: Vec<String> = events.into_inner().unwrap().iter().map(|e| format!("{:?}", e)).collect();
        assert_eq!(
            events,
            vec![
                "PhaseStart { name: \"Loading DDG data\" }",
                "PhaseFinish",
                "PhaseStart { name: \"Rendering heatmaps\" }",
                "TaskStart { total_steps: 2 }",
                "TaskIncrement",
                "TaskIncrement",
                "TaskFinish",
                "PhaseFinish",
            ]
        );
    }

    #[test]
    fn inverted_color_range_is_rejected() {
        let fixture = scan_fixture();
        let mut config = config(&fixture);
        config.vmin = Some(2.0);
        config.vmax = Some(1.0);
        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(AnalysisError::Config(_))));
    }

    #[test]
    fn lower_bound_above_all_values_is_rejected() {
        let fixture = scan_fixture();
        let mut config = config(&fixture);
        config.vmin = Some(100.0);
        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(AnalysisError::Render(RenderError::InvalidData(_)))));
        assert!(!fixture.path("figures/heatmap.svg").exists());
    }
}
