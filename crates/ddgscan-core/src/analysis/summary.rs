use crate::core::io::table::rounded_opt;
use crate::core::stats::descriptive;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::config::ConfigError;
use super::dataset::DdgDataset;

/// Reduction applied over the mutations of one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Statistic {
    #[default]
    Mean,
    Median,
    Min,
    Max,
}

impl Statistic {
    pub const ALL: [Statistic; 4] = [
        Statistic::Mean,
        Statistic::Median,
        Statistic::Min,
        Statistic::Max,
    ];

    pub fn apply(self, values: &[f64]) -> Option<f64> {
        match self {
            Statistic::Mean => descriptive::mean(values),
            Statistic::Median => descriptive::median(values),
            Statistic::Min => descriptive::min(values),
            Statistic::Max => descriptive::max(values),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::Min => "min",
            Statistic::Max => "max",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Statistic {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" | "average" | "avg" => Ok(Statistic::Mean),
            "median" => Ok(Statistic::Median),
            "min" => Ok(Statistic::Min),
            "max" => Ok(Statistic::Max),
            other => Err(ConfigError::InvalidValue {
                name: "statistic",
                reason: format!("'{}' (expected mean, median, min or max)", other),
            }),
        }
    }
}

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionSummary {
    pub label: String,
    pub n_destabilizing: usize,
    pub n_neutral: usize,
    pub n_stabilizing: usize,
    #[serde(serialize_with = "rounded_opt")]
    pub mean: Option<f64>,
    #[serde(serialize_with = "rounded_opt")]
    pub median: Option<f64>,
    #[serde(serialize_with = "rounded_opt")]
    pub min: Option<f64>,
    #[serde(serialize_with = "rounded_opt")]
    pub max: Option<f64>,
}

impl PositionSummary {
    /// Classifies `values` against `threshold`: `>= t` destabilizing, `<= -t`
    /// stabilizing, neutral otherwise.
    pub fn from_values(label: String, values: &[f64], threshold: f64) -> Self {
        let n_destabilizing = values.iter().filter(|&&v| v >= threshold).count();
        let n_stabilizing = values.iter().filter(|&&v| v <= -threshold).count();
        // With a zero threshold a 0.0 value would be counted twice.
        let n_stabilizing = if threshold == 0.0 {
            values.iter().filter(|&&v| v < 0.0).count()
        } else {
            n_stabilizing
        };
        Self {
            label,
            n_destabilizing,
            n_neutral: values.len() - n_destabilizing - n_stabilizing,
            n_stabilizing,
            mean: Statistic::Mean.apply(values),
            median: Statistic::Median.apply(values),
            min: Statistic::Min.apply(values),
            max: Statistic::Max.apply(values),
        }
    }
}

/// Summaries for every position of `dataset`, in dataset order.
pub fn summarize(dataset: &DdgDataset, threshold: f64, exclude_wild_type: bool) -> Vec<PositionSummary> {
    dataset
        .positions()
        .iter()
        .enumerate()
        .map(|(i, position)| {
            PositionSummary::from_values(
                position.label(),
                &dataset.averages_filtered(i, exclude_wild_type),
                threshold,
            )
        })
        .collect()
}
