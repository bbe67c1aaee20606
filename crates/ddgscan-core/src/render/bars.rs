use super::{FONT_FAMILY, Labels, RenderError, canvas, caption, draw_notice, segment_label, svg_path, tick_font, value_range};
use crate::analysis::config::PlotConfig;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const DESTABILIZING: RGBColor = RGBColor(214, 96, 77);
const STABILIZING: RGBColor = RGBColor(67, 147, 195);

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Half-length of the error bar, usually the standard deviation.
    pub error: Option<f64>,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: f64, error: Option<f64>) -> Self {
        Self {
            label: label.into(),
            value,
            error,
        }
    }
}

/// Bar chart of signed values around a zero line.
pub fn render(path: &Path, plot: &PlotConfig, bars: &[Bar], labels: &Labels<'_>) -> Result<PathBuf, RenderError> {
    let out = svg_path(path);
    draw(&out, plot, bars, labels)?;
    Ok(out)
}

fn draw(out: &Path, plot: &PlotConfig, bars: &[Bar], labels: &Labels<'_>) -> Result<(), RenderError> {
    let root = canvas(out, plot)?;
    if bars.is_empty() {
        draw_notice(&root, plot, "No data")?;
        return Ok(());
    }

    let n = bars.len();
    let names: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
    let (lo, hi) = value_range(bars.iter().flat_map(|b| {
        let e = b.error.unwrap_or(0.0).abs();
        [b.value - e, b.value + e]
    }));

    let mut chart = ChartBuilder::on(&root)
        .caption(caption(plot, labels), (FONT_FAMILY, plot.font_size + 6))
        .margin(20)
        .x_label_area_size(plot.font_size * if n > 12 { 6 } else { 3 })
        .y_label_area_size(plot.font_size * 5)
        .build_cartesian_2d((0..n).into_segmented(), lo..hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| segment_label(x, &names))
        .x_label_style(tick_font(plot, n))
        .y_label_style((FONT_FAMILY, plot.font_size))
        .x_desc(labels.x)
        .y_desc(labels.y)
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        let color = if bar.value >= 0.0 { DESTABILIZING } else { STABILIZING };
        let mut rect = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), bar.value),
            ],
            color.filled(),
        );
        rect.set_margin(0, 0, 2, 2);
        rect
    }))?;

    chart.draw_series(bars.iter().enumerate().filter_map(|(i, bar)| {
        bar.error.map(|e| {
            let e = e.abs();
            ErrorBar::new_vertical(
                SegmentValue::CenterOf(i),
                bar.value - e,
                bar.value,
                bar.value + e,
                BLACK.stroke_width(1),
                6,
            )
        })
    }))?;

    chart.draw_series(LineSeries::new(
        [(SegmentValue::Exact(0), 0.0), (SegmentValue::Exact(n), 0.0)],
        &BLACK,
    ))?;

    root.present()?;
    Ok(())
}
