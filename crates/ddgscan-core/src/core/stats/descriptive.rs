/// Quartiles of a sample, interpolated linearly between order statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Quartiles {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Furthest values of `values` that lie within 1.5 IQR of the box.
    /// Values outside this range are outliers.
    pub fn whiskers(&self, values: &[f64]) -> (f64, f64) {
        let reach = 1.5 * self.iqr();
        let (lo_fence, hi_fence) = (self.q1 - reach, self.q3 + reach);
        let inside = values.iter().copied().filter(|v| (lo_fence..=hi_fence).contains(v));
        let low = inside.clone().fold(self.q1, f64::min);
        let high = inside.fold(self.q3, f64::max);
        (low, high)
    }
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Sample standard deviation (n - 1 in the denominator).
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

/// Quantile `q` in [0, 1] with linear interpolation.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    quantile_sorted(&sorted(values), q)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

pub fn quartiles(values: &[f64]) -> Option<Quartiles> {
    let sorted = sorted(values);
    Some(Quartiles {
        q1: quantile_sorted(&sorted, 0.25)?,
        median: quantile_sorted(&sorted, 0.5)?,
        q3: quantile_sorted(&sorted, 0.75)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn empty_input_yields_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(quartiles(&[]), None);
    }

    #[test]
    fn mean_min_max_of_simple_sample() {
        let v = [2.0, -1.0, 4.0, 3.0];
        assert!((mean(&v).unwrap() - 2.0).abs() < EPS);
        assert_eq!(min(&v), Some(-1.0));
        assert_eq!(max(&v), Some(4.0));
    }

    #[test]
    fn std_dev_uses_sample_denominator() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = (32.0f64 / 7.0).sqrt();
        assert!((std_dev(&v).unwrap() - expected).abs() < EPS);
        assert_eq!(std_dev(&[1.0]), None);
    }

    #[test]
    fn median_interpolates_for_even_length() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn quartiles_follow_linear_interpolation() {
        let q = quartiles(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((q.q1 - 1.75).abs() < EPS);
        assert!((q.median - 2.5).abs() < EPS);
        assert!((q.q3 - 3.25).abs() < EPS);
    }

    #[test]
    fn whiskers_stop_at_the_last_value_inside_the_fences() {
        let v = [0.1, 0.2, 0.3, 0.4, 9.0];
        let q = quartiles(&v).unwrap();
        assert!((q.iqr() - 0.2).abs() < EPS);
        let (low, high) = q.whiskers(&v);
        assert_eq!(low, 0.1);
        assert_eq!(high, 0.4);
    }

    #[test]
    fn whiskers_of_a_single_value_collapse_onto_it() {
        let q = quartiles(&[2.0]).unwrap();
        assert_eq!(q.whiskers(&[2.0]), (2.0, 2.0));
    }

    #[test]
    fn quantile_clamps_out_of_range_q() {
        let v = [5.0, 1.0, 3.0];
        assert_eq!(quantile(&v, -1.0), Some(1.0));
        assert_eq!(quantile(&v, 2.0), Some(5.0));
    }
}
