use super::StatsError;
use super::descriptive::std_dev;
use std::f64::consts::PI;

/// Bandwidths of padding added on each side of the sample range when building a grid.
const GRID_PADDING_BANDWIDTHS: f64 = 3.0;

/// One-dimensional Gaussian kernel density estimate with Scott's rule bandwidth.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Builds the estimate. The bandwidth is the sample standard deviation scaled by `n^(-1/5)`.
    pub fn new(samples: &[f64]) -> Result<Self, StatsError> {
        let n = samples.len();
        let std = std_dev(samples).unwrap_or(0.0);
        if n < 2 || std <= 0.0 || !std.is_finite() {
            return Err(StatsError::DegenerateSample { n, std });
        }
        Ok(Self {
            samples: samples.to_vec(),
            bandwidth: std * (n as f64).powf(-0.2),
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = self.samples.len() as f64 * h * (2.0 * PI).sqrt();
        self.samples
            .iter()
            .map(|xi| (-0.5 * ((x - xi) / h).powi(2)).exp())
            .sum::<f64>()
            / norm
    }

    /// Sample range extended by three bandwidths on either side.
    pub fn support(&self) -> (f64, f64) {
        let lo = self.samples.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let pad = GRID_PADDING_BANDWIDTHS * self.bandwidth;
        (lo - pad, hi + pad)
    }

    /// Evaluates the density on `points` evenly spaced points over `range`, or over
    /// [`GaussianKde::support`] when no range is given.
    pub fn grid(&self, points: usize, range: Option<(f64, f64)>) -> Vec<(f64, f64)> {
        let (lo, hi) = range.unwrap_or_else(|| self.support());
        match points {
            0 => Vec::new(),
            1 => vec![(lo, self.evaluate(lo))],
            _ => {
                let step = (hi - lo) / (points - 1) as f64;
                (0..points)
                    .map(|i| {
                        let x = lo + step * i as f64;
                        (x, self.evaluate(x))
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_single_value_and_constant_samples() {
        assert!(matches!(
            GaussianKde::new(&[1.0]),
            Err(StatsError::DegenerateSample { n: 1, .. })
        ));
        assert!(matches!(
            GaussianKde::new(&[2.0, 2.0, 2.0]),
            Err(StatsError::DegenerateSample { n: 3, .. })
        ));
    }

    #[test]
    fn bandwidth_follows_scotts_rule() {
        let samples = [0.0, 1.0, 2.0, 3.0];
        let kde = GaussianKde::new(&samples).unwrap();
        let std = (5.0f64 / 3.0).sqrt();
        let expected = std * 4.0f64.powf(-0.2);
        assert!((kde.bandwidth() - expected).abs() < 1e-12);
    }

    #[test]
    fn density_integrates_to_one() {
        let kde = GaussianKde::new(&[-1.0, 0.5, 0.7, 2.0, 3.5]).unwrap();
        let grid = kde.grid(2000, Some((-15.0, 20.0)));
        let dx = grid[1].0 - grid[0].0;
        let area: f64 = grid.iter().map(|(_, y)| y * dx).sum();
        assert!((area - 1.0).abs() < 1e-3, "area was {}", area);
    }

    #[test]
    fn density_is_symmetric_for_symmetric_sample() {
        let kde = GaussianKde::new(&[-1.0, 1.0]).unwrap();
        assert!((kde.evaluate(0.3) - kde.evaluate(-0.3)).abs() < 1e-12);
    }

    #[test]
    fn grid_spans_padded_support() {
        let kde = GaussianKde::new(&[0.0, 1.0]).unwrap();
        let (lo, hi) = kde.support();
        let grid = kde.grid(5, None);
        assert_eq!(grid.len(), 5);
        assert!((grid[0].0 - lo).abs() < 1e-12);
        assert!((grid[4].0 - hi).abs() < 1e-12);
        assert!(lo < 0.0 && hi > 1.0);
    }

    #[test]
    fn grid_handles_zero_and_one_point() {
        let kde = GaussianKde::new(&[0.0, 1.0]).unwrap();
        assert!(kde.grid(0, None).is_empty());
        assert_eq!(kde.grid(1, Some((0.5, 2.0))).len(), 1);
    }
}
