use super::summary::Statistic;
use crate::core::utils::mutations::Mutation;
use crate::core::utils::selection::Selection;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        reason: reason.into(),
    }
}

/// Where a scan's files live and how positions are formed and filtered.
#[derive(Debug, Clone, PartialEq)]
pub struct InputConfig {
    pub structure_path: PathBuf,
    pub data_dir: PathBuf,
    pub mutation_list_path: PathBuf,
    pub multimers: bool,
    pub skip_missing: bool,
    pub selection: Option<Selection>,
    pub lenient_selection: bool,
}

#[derive(Default)]
pub struct InputConfigBuilder {
    structure_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    mutation_list_path: Option<PathBuf>,
    multimers: Option<bool>,
    skip_missing: Option<bool>,
    selection: Option<Selection>,
    lenient_selection: Option<bool>,
}

impl InputConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structure_path(mut self, path: PathBuf) -> Self {
        self.structure_path = Some(path);
        self
    }
    pub fn data_dir(mut self, path: PathBuf) -> Self {
        self.data_dir = Some(path);
        self
    }
    pub fn mutation_list_path(mut self, path: PathBuf) -> Self {
        self.mutation_list_path = Some(path);
        self
    }
    pub fn multimers(mut self, multimers: bool) -> Self {
        self.multimers = Some(multimers);
        self
    }
    pub fn skip_missing(mut self, skip: bool) -> Self {
        self.skip_missing = Some(skip);
        self
    }
    pub fn selection(mut self, selection: Option<Selection>) -> Self {
        self.selection = selection;
        self
    }
    pub fn lenient_selection(mut self, lenient: bool) -> Self {
        self.lenient_selection = Some(lenient);
        self
    }

    pub fn build(self) -> Result<InputConfig, ConfigError> {
        Ok(InputConfig {
            structure_path: self
                .structure_path
                .ok_or(ConfigError::MissingParameter("structure_path"))?,
            data_dir: self
                .data_dir
                .ok_or(ConfigError::MissingParameter("data_dir"))?,
            mutation_list_path: self
                .mutation_list_path
                .ok_or(ConfigError::MissingParameter("mutation_list_path"))?,
            multimers: self.multimers.unwrap_or(true),
            skip_missing: self.skip_missing.unwrap_or(false),
            selection: self.selection,
            lenient_selection: self.lenient_selection.unwrap_or(false),
        })
    }
}

/// Canvas settings shared by every figure.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    pub title: Option<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            font_size: 14,
            title: None,
        }
    }
}

impl PlotConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 200 || self.height < 200 {
            return Err(invalid(
                "plot size",
                format!("{}x{} is smaller than 200x200", self.width, self.height),
            ));
        }
        if self.font_size == 0 {
            return Err(invalid("font size", "must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMap {
    #[default]
    Bwr,
    Viridis,
    Greys,
}

impl FromStr for ColorMap {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bwr" => Ok(ColorMap::Bwr),
            "viridis" => Ok(ColorMap::Viridis),
            "greys" | "grays" => Ok(ColorMap::Greys),
            other => Err(invalid(
                "colormap",
                format!("'{}' (expected bwr, viridis or greys)", other),
            )),
        }
    }
}

impl fmt::Display for ColorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ColorMap::Bwr => "bwr",
                ColorMap::Viridis => "viridis",
                ColorMap::Greys => "greys",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapConfig {
    pub input: InputConfig,
    pub output: PathBuf,
    pub plot: PlotConfig,
    pub colormap: ColorMap,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    /// Positions per figure; 0 puts every position in one figure.
    pub splice: usize,
    pub transpose: bool,
}

impl HeatmapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.plot.validate()?;
        if let (Some(lo), Some(hi)) = (self.vmin, self.vmax) {
            if lo >= hi {
                return Err(invalid("color range", format!("vmin {} >= vmax {}", lo, hi)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoConfig {
    pub input: InputConfig,
    pub output_dir: PathBuf,
    pub plot: PlotConfig,
    pub error_bars: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub input: InputConfig,
    pub output: PathBuf,
    pub plot: PlotConfig,
    pub targets: Vec<char>,
    pub splice: usize,
    pub error_bars: bool,
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.plot.validate()?;
        if self.targets.is_empty() {
            return Err(ConfigError::MissingParameter("targets"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DensityKind {
    #[default]
    Kde,
    Histogram,
}

impl FromStr for DensityKind {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kde" | "density" => Ok(DensityKind::Kde),
            "histogram" | "hist" => Ok(DensityKind::Histogram),
            other => Err(invalid(
                "density kind",
                format!("'{}' (expected kde or histogram)", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DensityConfig {
    pub input: InputConfig,
    pub output: PathBuf,
    pub plot: PlotConfig,
    pub kind: DensityKind,
    pub points: usize,
    pub bins: usize,
    pub splice: usize,
    pub table: Option<PathBuf>,
}

impl DensityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.plot.validate()?;
        if self.points < 2 {
            return Err(invalid("points", "at least 2 grid points are required"));
        }
        if self.bins == 0 {
            return Err(invalid("bins", "must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionConfig {
    pub input: InputConfig,
    pub output: PathBuf,
    pub plot: PlotConfig,
    pub splice: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryConfig {
    pub input: InputConfig,
    pub output: PathBuf,
    pub threshold: f64,
    pub exclude_wild_type: bool,
}

impl SummaryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.threshold >= 0.0) {
            return Err(invalid("threshold", "must be a non-negative number"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub input: InputConfig,
    pub output: PathBuf,
    pub with_std: bool,
    pub transpose: bool,
}

/// Which b-factor files the `pdb` tool writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdbOutput {
    /// One file per mutation type.
    PerMutation,
    /// One file holding a per-position statistic.
    Statistic(Statistic),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdbConfig {
    pub input: InputConfig,
    pub output_prefix: PathBuf,
    pub output: PdbOutput,
    pub exclude_wild_type: bool,
    pub missing_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationsConfig {
    pub input: InputConfig,
    pub mutations: Vec<Mutation>,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelsConfig {
    pub structure_path: PathBuf,
    pub multimers: bool,
}
