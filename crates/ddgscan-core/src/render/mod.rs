//! # Render Module
//!
//! SVG figures for the scan tools, drawn with the plotters SVG backend.
//!
//! Every renderer takes plain data plus a [`PlotConfig`](crate::analysis::config::PlotConfig),
//! writes one file and returns the path actually written. Requested `.png` and `.pdf`
//! paths are written as `.svg`. Empty input produces a figure with a centred notice
//! instead of an error.

pub mod bars;
pub mod boxplot;
pub mod density;
pub mod heatmap;
pub mod palette;

use crate::analysis::config::PlotConfig;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub(crate) const FONT_FAMILY: &str = "sans-serif";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Invalid figure data: {0}")]
    InvalidData(String),
}

impl<E: Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(err.to_string())
    }
}

/// Output path with the extension forced to `.svg`.
pub fn svg_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => path.to_path_buf(),
        _ => path.with_extension("svg"),
    }
}

pub(crate) type Canvas<'a> = DrawingArea<SVGBackend<'a>, Shift>;

pub(crate) fn canvas<'a>(path: &'a Path, plot: &PlotConfig) -> Result<Canvas<'a>, RenderError> {
    let root = SVGBackend::new(path, (plot.width, plot.height)).into_drawing_area();
    root.fill(&WHITE)?;
    Ok(root)
}

/// Draws `message` in the middle of an otherwise blank figure and saves it.
pub(crate) fn draw_notice(root: &Canvas<'_>, plot: &PlotConfig, message: &str) -> Result<(), RenderError> {
    let (width, height) = root.dim_in_pixel();
    let style = (FONT_FAMILY, plot.font_size + 6)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        message.to_string(),
        ((width / 2) as i32, (height / 2) as i32),
        style,
    ))?;
    root.present()?;
    Ok(())
}

/// Title and axis descriptions of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels<'a> {
    pub title: &'a str,
    pub x: &'a str,
    pub y: &'a str,
}

/// Chart title: the configured title, or the figure's own.
pub(crate) fn caption(plot: &PlotConfig, labels: &Labels<'_>) -> String {
    plot.title.clone().unwrap_or_else(|| labels.title.to_string())
}

pub(crate) fn segment_label(value: &SegmentValue<usize>, names: &[String]) -> String {
    match value {
        SegmentValue::CenterOf(idx) => names.get(*idx).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

/// Tick label font, turned on its side when there are too many ticks to fit flat.
pub(crate) fn tick_font(plot: &PlotConfig, ticks: usize) -> FontDesc<'static> {
    let font = (FONT_FAMILY, plot.font_size).into_font();
    if ticks > 12 {
        font.transform(FontTransform::Rotate90)
    } else {
        font
    }
}

/// Padded `(min, max)` of `values` that always includes zero.
pub(crate) fn value_range<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if hi - lo < f64::EPSILON {
        return (-1.0, 1.0);
    }
    let pad = (hi - lo) * 0.1;
    (lo - if lo < 0.0 { pad } else { 0.0 }, hi + if hi > 0.0 { pad } else { 0.0 })
}
