use super::StatsError;

/// Equal-width histogram. Every bin is half-open except the last, which is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width bins over `range`, or over the data range.
    ///
    /// Values outside an explicit range are not counted. When all values are equal the
    /// range is widened by 0.5 on either side.
    pub fn new(values: &[f64], bins: usize, range: Option<(f64, f64)>) -> Result<Self, StatsError> {
        if bins == 0 {
            return Err(StatsError::InvalidBins);
        }
        let (mut lo, mut hi) = match range {
            Some(r) => r,
            None => {
                if values.is_empty() {
                    return Err(StatsError::EmptySample);
                }
                let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (lo, hi)
            }
        };
        if !(lo.is_finite() && hi.is_finite()) || hi < lo {
            return Err(StatsError::InvalidRange(lo, hi));
        }
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0; bins];
        for &v in values {
            if v < lo || v > hi {
                continue;
            }
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Ok(Self { edges, counts })
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Counts normalised so the histogram integrates to one.
    pub fn densities(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.counts.len()];
        }
        let scale = 1.0 / (total as f64 * self.bin_width());
        self.counts.iter().map(|&c| c as f64 * scale).collect()
    }

    /// (left edge, right edge, count) for every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| (w[0], w[1], c))
    }
}
