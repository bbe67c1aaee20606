//! Statistics behind the summaries and figures: descriptive statistics over a
//! position's DDG values, Gaussian kernel density estimation and histograms.

pub mod descriptive;
pub mod histogram;
pub mod kde;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("Cannot compute statistics of an empty sample")]
    EmptySample,
    #[error("Density estimate needs at least two distinct values (got {n} value(s), std {std})")]
    DegenerateSample { n: usize, std: f64 },
    #[error("Number of bins must be positive")]
    InvalidBins,
    #[error("Invalid range [{0}, {1}]")]
    InvalidRange(f64, f64),
}
