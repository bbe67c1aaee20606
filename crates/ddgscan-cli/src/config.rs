pub mod builder;
pub mod defaults;

use crate::error::{CliError, Result};
use crate::utils::parser;
use ddgscan::analysis::config::{ColorMap, DensityKind};
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FilePlotConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub font_size: Option<u32>,
    pub title: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileHeatmapConfig {
    #[serde(default, deserialize_with = "from_str_opt")]
    pub colormap: Option<ColorMap>,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    pub splice: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileDensityConfig {
    #[serde(default, deserialize_with = "from_str_opt")]
    pub kind: Option<DensityKind>,
    pub points: Option<usize>,
    pub bins: Option<usize>,
    pub splice: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSummaryConfig {
    pub threshold: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileInputConfig {
    pub multimers: Option<bool>,
    pub skip_missing: Option<bool>,
}

/// Settings read from the `--config` file. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub plot: FilePlotConfig,
    #[serde(default)]
    pub heatmap: FileHeatmapConfig,
    #[serde(default)]
    pub density: FileDensityConfig,
    #[serde(default)]
    pub summary: FileSummaryConfig,
    #[serde(default)]
    pub input: FileInputConfig,
}

fn from_str_opt<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| s.parse().map_err(serde::de::Error::custom))
        .transpose()
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the optional config file and applies the `-S` overrides on top of it.
    pub fn load(path: Option<&Path>, set_values: &[String]) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_set_values(set_values)?;
        Ok(config)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = parser::split_key_value(kv_pair)
                .map_err(|e| CliError::Config(e.to_string()))?;
            debug!("Applying override {} = {}", key, value_str);

            match key {
                "plot.width" => self.plot.width = Some(parse_value(key, value_str)?),
                "plot.height" => self.plot.height = Some(parse_value(key, value_str)?),
                "plot.font-size" => self.plot.font_size = Some(parse_value(key, value_str)?),
                "plot.title" => self.plot.title = Some(value_str.to_string()),
                "heatmap.colormap" => self.heatmap.colormap = Some(parse_value(key, value_str)?),
                "heatmap.vmin" => self.heatmap.vmin = Some(parse_value(key, value_str)?),
                "heatmap.vmax" => self.heatmap.vmax = Some(parse_value(key, value_str)?),
                "heatmap.splice" => self.heatmap.splice = Some(parse_value(key, value_str)?),
                "density.kind" => self.density.kind = Some(parse_value(key, value_str)?),
                "density.points" => self.density.points = Some(parse_value(key, value_str)?),
                "density.bins" => self.density.bins = Some(parse_value(key, value_str)?),
                "density.splice" => self.density.splice = Some(parse_value(key, value_str)?),
                "summary.threshold" => {
                    self.summary.threshold = Some(parse_value(key, value_str)?)
                }
                "input.multimers" => self.input.multimers = Some(parse_value(key, value_str)?),
                "input.skip-missing" => {
                    self.input.skip_missing = Some(parse_value(key, value_str)?)
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T>(key: &str, value_str: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value_str.trim().parse().map_err(|e| {
        CliError::Config(format!("Invalid value for {}: '{}' ({})", key, value_str, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn set(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_load_sections_from_file() {
        let path = write_config_file(
            "full.toml",
            r#"
            [plot]
            width = 1600
            font-size = 10
            title = "Scan of 1ABC"

            [heatmap]
            colormap = "viridis"
            vmin = -2.5
            splice = 40

            [density]
            kind = "histogram"
            bins = 15

            [summary]
            threshold = 0.5

            [input]
            multimers = false
            skip-missing = true
            "#,
        );

        let config = FileConfig::from_file(&path).unwrap();
        assert_eq!(config.plot.width, Some(1600));
        assert_eq!(config.plot.height, None);
        assert_eq!(config.plot.font_size, Some(10));
        assert_eq!(config.plot.title.as_deref(), Some("Scan of 1ABC"));
        assert_eq!(config.heatmap.colormap, Some(ColorMap::Viridis));
        assert_eq!(config.heatmap.vmin, Some(-2.5));
        assert_eq!(config.heatmap.splice, Some(40));
        assert_eq!(config.density.kind, Some(DensityKind::Histogram));
        assert_eq!(config.density.bins, Some(15));
        assert_eq!(config.summary.threshold, Some(0.5));
        assert_eq!(config.input.multimers, Some(false));
        assert_eq!(config.input.skip_missing, Some(true));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let path = write_config_file("partial.toml", "[summary]\nthreshold = 2.0\n");
        let config = FileConfig::from_file(&path).unwrap();
        assert_eq!(config.summary.threshold, Some(2.0));
        assert_eq!(config.plot, FilePlotConfig::default());
        assert_eq!(config.input, FileInputConfig::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let path = write_config_file("unknown.toml", "[plot]\ndpi = 300\n");
        let result = FileConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn test_invalid_colormap_is_rejected() {
        let path = write_config_file("colormap.toml", "[heatmap]\ncolormap = \"jet\"\n");
        let result = FileConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = FileConfig::from_file(&TEST_DIR.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_set_value_overrides_file() {
        let path = write_config_file(
            "override.toml",
            "[heatmap]\ncolormap = \"greys\"\n\n[plot]\nwidth = 900\n",
        );
        let config = FileConfig::load(
            Some(&path),
            &set(&["heatmap.colormap=bwr", "plot.height=500", "input.skip-missing=true"]),
        )
        .unwrap();
        assert_eq!(config.heatmap.colormap, Some(ColorMap::Bwr));
        assert_eq!(config.plot.width, Some(900));
        assert_eq!(config.plot.height, Some(500));
        assert_eq!(config.input.skip_missing, Some(true));
    }

    #[test]
    fn test_set_value_without_file() {
        let config =
            FileConfig::load(None, &set(&["summary.threshold=0.25", "plot.title=A = B"])).unwrap();
        assert_eq!(config.summary.threshold, Some(0.25));
        assert_eq!(config.plot.title.as_deref(), Some("A = B"));
    }

    #[test]
    fn test_set_value_errors() {
        let unknown = FileConfig::load(None, &set(&["plot.dpi=300"]));
        assert!(matches!(unknown, Err(CliError::Config(msg)) if msg.contains("plot.dpi")));

        let malformed = FileConfig::load(None, &set(&["plot.width"]));
        assert!(matches!(malformed, Err(CliError::Config(_))));

        let unparsable = FileConfig::load(None, &set(&["density.points=many"]));
        assert!(matches!(unparsable, Err(CliError::Config(msg)) if msg.contains("density.points")));
    }
}
