use super::RenderError;
use crate::analysis::config::ColorMap;
use plotters::style::RGBColor;

// Sampled from the matplotlib viridis map at 0, 0.25, 0.5, 0.75 and 1.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

/// Blue (0) to white (0.5) to red (1).
fn bwr(v: f64) -> RGBColor {
    if v < 0.5 {
        let t = v * 2.0;
        RGBColor(lerp(0, 255, t), lerp(0, 255, t), 255)
    } else {
        let t = (v - 0.5) * 2.0;
        RGBColor(255, lerp(255, 0, t), lerp(255, 0, t))
    }
}

fn viridis(v: f64) -> RGBColor {
    let scaled = v * (VIRIDIS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let t = scaled - i as f64;
    let (a, b) = (VIRIDIS[i], VIRIDIS[i + 1]);
    RGBColor(lerp(a.0, b.0, t), lerp(a.1, b.1, t), lerp(a.2, b.2, t))
}

/// White (0) to black (1).
fn greys(v: f64) -> RGBColor {
    let level = lerp(255, 0, v);
    RGBColor(level, level, level)
}

/// Maps DDG values onto a colour map over `[vmin, vmax]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    map: ColorMap,
    vmin: f64,
    vmax: f64,
}

impl ColorScale {
    /// Builds a scale. Missing bounds default to the extremes of `values`.
    ///
    /// A range that collapses because the data is constant is widened to one unit
    /// around it. A range that collapses because of an explicit bound is an error.
    pub fn new(map: ColorMap, vmin: Option<f64>, vmax: Option<f64>, values: &[f64]) -> Result<Self, RenderError> {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let data_min = finite.clone().fold(f64::INFINITY, f64::min);
        let data_max = finite.fold(f64::NEG_INFINITY, f64::max);
        let lo = vmin.unwrap_or(if data_min.is_finite() { data_min } else { 0.0 });
        let hi = vmax.unwrap_or(if data_max.is_finite() { data_max } else { 1.0 });
        if !(lo.is_finite() && hi.is_finite()) {
            return Err(RenderError::InvalidData(format!("colour range {}..{} is not finite", lo, hi)));
        }
        if hi > lo {
            return Ok(Self { map, vmin: lo, vmax: hi });
        }
        match (vmin, vmax) {
            (None, None) => Ok(Self {
                map,
                vmin: lo - 0.5,
                vmax: lo + 0.5,
            }),
            (Some(_), None) => Err(RenderError::InvalidData(format!(
                "vmin {} is not below the largest value {}; set vmax as well",
                lo, hi
            ))),
            (None, Some(_)) => Err(RenderError::InvalidData(format!(
                "vmax {} is not above the smallest value {}; set vmin as well",
                hi, lo
            ))),
            (Some(_), Some(_)) => Err(RenderError::InvalidData(format!("vmin {} is not below vmax {}", lo, hi))),
        }
    }

    pub fn range(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }

    /// Position of `value` on the map, in `[0, 1]`.
    ///
    /// The diverging map puts 0 kcal/mol at white whenever the range spans zero.
    pub fn normalize(&self, value: f64) -> f64 {
        let v = value.clamp(self.vmin, self.vmax);
        let t = if self.map == ColorMap::Bwr && self.vmin < 0.0 && self.vmax > 0.0 {
            if v < 0.0 {
                0.5 * (v - self.vmin) / -self.vmin
            } else {
                0.5 + 0.5 * v / self.vmax
            }
        } else {
            (v - self.vmin) / (self.vmax - self.vmin)
        };
        t.clamp(0.0, 1.0)
    }

    pub fn color(&self, value: f64) -> RGBColor {
        let t = self.normalize(value);
        match self.map {
            ColorMap::Bwr => bwr(t),
            ColorMap::Viridis => viridis(t),
            ColorMap::Greys => greys(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bwr_is_centred_on_zero_for_diverging_ranges() {
        let scale = ColorScale::new(ColorMap::Bwr, Some(-1.0), Some(4.0), &[]).unwrap();
        assert_eq!(scale.color(0.0), RGBColor(255, 255, 255));
        assert_eq!(scale.color(-1.0), RGBColor(0, 0, 255));
        assert_eq!(scale.color(4.0), RGBColor(255, 0, 0));
        assert!((scale.normalize(2.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn one_sided_ranges_are_linear() {
        let scale = ColorScale::new(ColorMap::Greys, Some(1.0), Some(3.0), &[]).unwrap();
        assert_eq!(scale.normalize(2.0), 0.5);
        assert_eq!(scale.color(1.0), RGBColor(255, 255, 255));
        assert_eq!(scale.color(10.0), RGBColor(0, 0, 0));
    }

    #[test]
    fn bounds_default_to_data_extremes() {
        let scale = ColorScale::new(ColorMap::Viridis, None, None, &[0.5, -2.0, 3.0, f64::NAN]).unwrap();
        assert_eq!(scale.range(), (-2.0, 3.0));
        assert_eq!(scale.color(-2.0), RGBColor(68, 1, 84));
        assert_eq!(scale.color(3.0), RGBColor(253, 231, 37));
    }

    #[test]
    fn constant_data_still_gives_a_usable_range() {
        let scale = ColorScale::new(ColorMap::Bwr, None, None, &[1.0, 1.0]).unwrap();
        assert_eq!(scale.range(), (0.5, 1.5));
        let empty = ColorScale::new(ColorMap::Bwr, None, None, &[]).unwrap();
        assert_eq!(empty.range(), (0.0, 1.0));
    }

    #[test]
    fn one_explicit_bound_past_the_data_is_rejected() {
        let values = [-1.0, 0.5, 3.0];
        let result = ColorScale::new(ColorMap::Bwr, Some(5.0), None, &values);
        assert!(matches!(result, Err(RenderError::InvalidData(msg)) if msg.contains("vmin 5")));
        let result = ColorScale::new(ColorMap::Bwr, None, Some(-2.0), &values);
        assert!(matches!(result, Err(RenderError::InvalidData(msg)) if msg.contains("vmax -2")));
        let scale = ColorScale::new(ColorMap::Bwr, Some(1.0), None, &values).unwrap();
        assert_eq!(scale.range(), (1.0, 3.0));
    }

    #[test]
    fn inverted_or_non_finite_bounds_are_rejected() {
        assert!(ColorScale::new(ColorMap::Greys, Some(2.0), Some(2.0), &[]).is_err());
        assert!(ColorScale::new(ColorMap::Greys, Some(f64::NAN), None, &[1.0, 2.0]).is_err());
    }
}
