use super::palette::ColorScale;
use super::{FONT_FAMILY, Labels, RenderError, canvas, caption, draw_notice, segment_label, svg_path, tick_font};
use crate::analysis::config::PlotConfig;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const MISSING_CELL: RGBColor = RGBColor(200, 200, 200);
const COLOR_BAR_STEPS: usize = 100;

/// Grid of values with one label per column and per row.
#[derive(Debug, Clone, Copy)]
pub struct HeatmapData<'a> {
    pub columns: &'a [String],
    pub rows: &'a [String],
    /// `values[column][row]`
    pub values: &'a [Vec<f64>],
}

impl HeatmapData<'_> {
    fn check(&self) -> Result<(), RenderError> {
        if self.values.len() != self.columns.len() {
            return Err(RenderError::InvalidData(format!(
                "{} columns of values for {} column labels",
                self.values.len(),
                self.columns.len()
            )));
        }
        if let Some(column) = self.values.iter().find(|c| c.len() != self.rows.len()) {
            return Err(RenderError::InvalidData(format!(
                "column with {} values for {} row labels",
                column.len(),
                self.rows.len()
            )));
        }
        Ok(())
    }
}

/// Draws `data` as coloured cells, first row at the top, with a colour bar on the right.
pub fn render(
    path: &Path,
    plot: &PlotConfig,
    data: &HeatmapData<'_>,
    scale: &ColorScale,
    labels: &Labels<'_>,
) -> Result<PathBuf, RenderError> {
    data.check()?;
    let out = svg_path(path);
    draw(&out, plot, data, scale, labels)?;
    Ok(out)
}

fn draw(
    out: &Path,
    plot: &PlotConfig,
    data: &HeatmapData<'_>,
    scale: &ColorScale,
    labels: &Labels<'_>,
) -> Result<(), RenderError> {
    let root = canvas(out, plot)?;
    if data.columns.is_empty() || data.rows.is_empty() {
        draw_notice(&root, plot, "No data")?;
        return Ok(());
    }

    let n_columns = data.columns.len();
    let n_rows = data.rows.len();
    let top_down: Vec<String> = data.rows.iter().rev().cloned().collect();

    let bar_width = (plot.width / 8).clamp(80, 140);
    let (main, legend) = root.split_horizontally(plot.width - bar_width);

    let mut chart = ChartBuilder::on(&main)
        .caption(caption(plot, labels), (FONT_FAMILY, plot.font_size + 6))
        .margin(20)
        .x_label_area_size(plot.font_size * 6)
        .y_label_area_size(plot.font_size * 4)
        .build_cartesian_2d((0..n_columns).into_segmented(), (0..n_rows).into_segmented())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n_columns)
        .y_labels(n_rows)
        .x_label_formatter(&|x| segment_label(x, data.columns))
        .y_label_formatter(&|y| segment_label(y, &top_down))
        .x_label_style(tick_font(plot, n_columns))
        .y_label_style((FONT_FAMILY, plot.font_size))
        .x_desc(labels.x)
        .y_desc(labels.y)
        .draw()?;

    chart.draw_series(data.values.iter().enumerate().flat_map(|(x, column)| {
        column.iter().enumerate().map(move |(row, &value)| {
            let y = n_rows - 1 - row;
            let color = if value.is_finite() {
                scale.color(value)
            } else {
                MISSING_CELL
            };
            Rectangle::new(
                [
                    (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                    (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                ],
                color.filled(),
            )
        })
    }))?;

    let (vmin, vmax) = scale.range();
    let mut bar = ChartBuilder::on(&legend)
        .margin_top(plot.font_size * 3 + 20)
        .margin_bottom(plot.font_size * 6 + 20)
        .margin_right(10)
        .y_label_area_size(plot.font_size * 4)
        .build_cartesian_2d(0.0..1.0, vmin..vmax)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_label_style((FONT_FAMILY, plot.font_size))
        .y_desc("kcal/mol")
        .draw()?;

    let step = (vmax - vmin) / COLOR_BAR_STEPS as f64;
    bar.draw_series((0..COLOR_BAR_STEPS).map(|i| {
        let lo = vmin + step * i as f64;
        Rectangle::new([(0.0, lo), (1.0, lo + step)], scale.color(lo + step / 2.0).filled())
    }))?;

    root.present()?;
    Ok(())
}
