use super::{FONT_FAMILY, Labels, RenderError, canvas, caption, draw_notice, svg_path};
use crate::analysis::config::PlotConfig;
use crate::core::stats::histogram::Histogram;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Series beyond this count are drawn without a legend entry.
const LEGEND_LIMIT: usize = 20;

/// A named curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// Outline of a histogram as a step curve, normalised to density.
pub fn step_points(histogram: &Histogram) -> Vec<(f64, f64)> {
    let densities = histogram.densities();
    let mut points = Vec::with_capacity(densities.len() * 2 + 2);
    for ((lo, hi, _), density) in histogram.bins().zip(densities) {
        if points.is_empty() {
            points.push((lo, 0.0));
        }
        points.push((lo, density));
        points.push((hi, density));
    }
    if let Some(&(last_x, _)) = points.last() {
        points.push((last_x, 0.0));
    }
    points
}

fn bounds(series: &[Series]) -> Option<((f64, f64), f64)> {
    let mut points = series.iter().flat_map(|s| s.points.iter()).filter(|(x, y)| x.is_finite() && y.is_finite());
    let &(x0, y0) = points.next()?;
    let (mut x_lo, mut x_hi, mut y_hi) = (x0, x0, y0);
    for &(x, y) in points {
        x_lo = x_lo.min(x);
        x_hi = x_hi.max(x);
        y_hi = y_hi.max(y);
    }
    if x_hi - x_lo < f64::EPSILON {
        x_lo -= 0.5;
        x_hi += 0.5;
    }
    let y_hi = if y_hi > 0.0 { y_hi * 1.1 } else { 1.0 };
    Some(((x_lo, x_hi), y_hi))
}

/// Draws every series as a line over a shared x axis.
pub fn render(path: &Path, plot: &PlotConfig, series: &[Series], labels: &Labels<'_>) -> Result<PathBuf, RenderError> {
    let out = svg_path(path);
    draw(&out, plot, series, labels)?;
    Ok(out)
}

fn draw(out: &Path, plot: &PlotConfig, series: &[Series], labels: &Labels<'_>) -> Result<(), RenderError> {
    let root = canvas(out, plot)?;
    let Some(((x_lo, x_hi), y_hi)) = bounds(series) else {
        draw_notice(&root, plot, "No data")?;
        return Ok(());
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(caption(plot, labels), (FONT_FAMILY, plot.font_size + 6))
        .margin(20)
        .x_label_area_size(plot.font_size * 3)
        .y_label_area_size(plot.font_size * 5)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_hi)?;

    chart
        .configure_mesh()
        .x_label_style((FONT_FAMILY, plot.font_size))
        .y_label_style((FONT_FAMILY, plot.font_size))
        .x_desc(labels.x)
        .y_desc(labels.y)
        .draw()?;

    for (i, s) in series.iter().enumerate() {
        let color = Palette99::pick(i).mix(1.0);
        let anno = chart.draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))?;
        if i < LEGEND_LIMIT {
            anno.label(s.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .label_font((FONT_FAMILY, plot.font_size))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}
