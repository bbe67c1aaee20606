use super::{FONT_FAMILY, Labels, RenderError, canvas, caption, draw_notice, segment_label, svg_path, tick_font};
use crate::analysis::config::PlotConfig;
use crate::core::stats::descriptive::{Quartiles, quartiles};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const BOX_COLOR: RGBColor = RGBColor(67, 147, 195);

/// Values of one box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxData {
    pub label: String,
    pub values: Vec<f64>,
}

impl BoxData {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// One box per entry: quartiles, whiskers at the furthest values within 1.5 IQR
/// of the box and the points beyond them.
/// Entries without values keep their slot but draw nothing.
pub fn render(path: &Path, plot: &PlotConfig, boxes: &[BoxData], labels: &Labels<'_>) -> Result<PathBuf, RenderError> {
    let out = svg_path(path);
    draw(&out, plot, boxes, labels)?;
    Ok(out)
}

fn draw(out: &Path, plot: &PlotConfig, boxes: &[BoxData], labels: &Labels<'_>) -> Result<(), RenderError> {
    let root = canvas(out, plot)?;
    if boxes.iter().all(|b| b.values.is_empty()) {
        draw_notice(&root, plot, "No data")?;
        return Ok(());
    }

    let n = boxes.len();
    let names: Vec<String> = boxes.iter().map(|b| b.label.clone()).collect();
    let stats: Vec<Option<(Quartiles, (f64, f64))>> = boxes
        .iter()
        .map(|b| quartiles(&b.values).map(|q| (q, q.whiskers(&b.values))))
        .collect();

    let (lo, hi) = boxes
        .iter()
        .flat_map(|b| b.values.iter().copied())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let pad = ((hi - lo) * 0.05).max(0.1);

    let segment = (plot.width as usize / (n + 1)) as u32;
    let side_margin = segment / 5;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption(plot, labels), (FONT_FAMILY, plot.font_size + 6))
        .margin(20)
        .x_label_area_size(plot.font_size * if n > 12 { 6 } else { 3 })
        .y_label_area_size(plot.font_size * 5)
        .build_cartesian_2d((0..n).into_segmented(), (lo - pad)..(hi + pad))?;

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

    chart.draw_series(stats.iter().enumerate().filter_map(|(i, s)| {
        s.map(|(q, (low, high))| {
            ErrorBar::new_vertical(
                SegmentValue::CenterOf(i),
                low,
                q.median,
                high,
                BLACK.stroke_width(1),
                (segment / 4).clamp(2, 20),
            )
        })
    }))?;

    let boxed = |i: usize, bottom: f64, top: f64, style: ShapeStyle| {
        let mut rect = Rectangle::new([(SegmentValue::Exact(i), bottom), (SegmentValue::Exact(i + 1), top)], style);
        rect.set_margin(0, 0, side_margin, side_margin);
        rect
    };
    chart.draw_series(
        stats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|(q, _)| boxed(i, q.q1, q.q3, BOX_COLOR.filled()))),
    )?;
    chart.draw_series(stats.iter().enumerate().filter_map(|(i, s)| {
        s.map(|(q, _)| boxed(i, q.q1, q.q3, BLACK.stroke_width(1)))
    }))?;
    chart.draw_series(stats.iter().enumerate().filter_map(|(i, s)| {
        s.map(|(q, _)| boxed(i, q.median, q.median, BLACK.stroke_width(2)))
    }))?;

    chart.draw_series(boxes.iter().zip(&stats).enumerate().flat_map(|(i, (b, s))| {
        let whiskers = s.map(|(_, w)| w);
        b.values
            .iter()
            .copied()
            .filter(move |&v| whiskers.is_some_and(|(low, high)| v < low || v > high))
            .map(move |v| Circle::new((SegmentValue::CenterOf(i), v), 3, BLACK.filled()))
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::assert_svg;

    const LABELS: Labels<'static> = Labels {
        title: "Distribution",
        x: "Position",
        y: "DDG (kcal/mol)",
    };

    #[test]
    fn renders_boxes_and_outliers() {
        let dir = tempfile::tempdir().unwrap();
        let boxes = vec![
            BoxData::new("MA1", vec![0.1, 0.2, 0.3, 0.4, 9.0]),
            BoxData::new("KA2", vec![-1.0, 0.5, 2.0]),
            BoxData::new("GA3", Vec::new()),
        ];
        let out = render(&dir.path().join("box.svg"), &PlotConfig::default(), &boxes, &LABELS).unwrap();
        assert_svg(&out);
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("GA3"));
    }

    #[test]
    fn values_inside_the_whiskers_are_not_drawn_as_points() {
        let dir = tempfile::tempdir().unwrap();
        let boxes = vec![BoxData::new("MA1", vec![1.0, 2.0, 3.0, 4.0])];
        let out = render(&dir.path().join("tight.svg"), &PlotConfig::default(), &boxes, &LABELS).unwrap();
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("<rect"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn all_empty_gets_a_notice() {
        let dir = tempfile::tempdir().unwrap();
        let boxes = vec![BoxData::new("MA1", Vec::new())];
        let out = render(&dir.path().join("none.svg"), &PlotConfig::default(), &boxes, &LABELS).unwrap();
        assert!(std::fs::read_to_string(out).unwrap().contains("No data"));
    }
}
