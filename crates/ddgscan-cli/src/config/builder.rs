use super::FileConfig;
use super::defaults::DefaultsConfig;
use crate::cli::{
    AlascanArgs, DensityArgs, DistributionArgs, HeatmapArgs, HistoArgs, InputArgs, LabelsArgs,
    MultimerFlags, MutationsArgs, PdbArgs, PlotArgs, SummaryArgs, TableArgs,
};
use crate::error::{CliError, Result};
use crate::utils::parser;
use ddgscan::analysis::config::{
    ConfigError, DensityConfig, DistributionConfig, HeatmapConfig,
    HistoConfig, InputConfig, InputConfigBuilder, LabelsConfig, MutationsConfig, PdbConfig,
    PdbOutput, PlotConfig, ScanConfig, SummaryConfig, TableConfig,
};
use ddgscan::core::utils::mutations::read_mutations;
use std::path::{Path, PathBuf};
use tracing::debug;

fn config_error(e: ConfigError) -> CliError {
    CliError::Config(e.to_string())
}

fn resolve_multimers(flags: MultimerFlags, file_val: Option<bool>, default: bool) -> bool {
    match (flags.multimers, flags.no_multimers) {
        (true, false) => true,
        (false, true) => false,
        _ => file_val.unwrap_or(default),
    }
}

fn output_or_default(cli_arg: Option<&Path>, default: &str) -> PathBuf {
    cli_arg.map_or_else(|| PathBuf::from(default), Path::to_path_buf)
}

fn build_input(
    args: &InputArgs,
    file_config: &FileConfig,
    defaults: &DefaultsConfig,
) -> Result<InputConfig> {
    let multimers = resolve_multimers(
        args.multimers,
        file_config.input.multimers,
        defaults.multimers,
    );
    let skip_missing = args.skip_missing
        || file_config
            .input
            .skip_missing
            .unwrap_or(defaults.skip_missing);

    InputConfigBuilder::new()
        .structure_path(args.pdb.clone())
        .data_dir(args.data.clone())
        .mutation_list_path(args.mutation_list.clone())
        .multimers(multimers)
        .skip_missing(skip_missing)
        .selection(args.select.clone())
        .lenient_selection(args.lenient_selection)
        .build()
        .map_err(config_error)
}

fn build_plot(
    args: &PlotArgs,
    file_config: &FileConfig,
    defaults: &DefaultsConfig,
) -> Result<PlotConfig> {
    let file_plot = &file_config.plot;
    let plot = PlotConfig {
        width: args.width.or(file_plot.width).unwrap_or(defaults.width),
        height: args.height.or(file_plot.height).unwrap_or(defaults.height),
        font_size: args
            .font_size
            .or(file_plot.font_size)
            .unwrap_or(defaults.font_size),
        title: args.title.clone().or_else(|| file_plot.title.clone()),
    };
    plot.validate().map_err(config_error)?;
    Ok(plot)
}

pub fn build_labels_config(args: &LabelsArgs, file_config: &FileConfig) -> LabelsConfig {
    let defaults = DefaultsConfig::default();
    LabelsConfig {
        structure_path: args.pdb.clone(),
        multimers: resolve_multimers(
            args.multimers,
            file_config.input.multimers,
            defaults.multimers,
        ),
    }
}

pub fn build_heatmap_config(args: &HeatmapArgs, file_config: &FileConfig) -> Result<HeatmapConfig> {
    let defaults = DefaultsConfig::default();
    let file_heatmap = &file_config.heatmap;

    let colormap = match args.colormap.or(file_heatmap.colormap) {
        Some(colormap) => colormap,
        None => defaults.colormap.parse().map_err(config_error)?,
    };

    let config = HeatmapConfig {
        input: build_input(&args.input, file_config, &defaults)?,
        output: output_or_default(args.output.as_deref(), &defaults.heatmap_output),
        plot: build_plot(&args.plot, file_config, &defaults)?,
        colormap,
        vmin: args.vmin.or(file_heatmap.vmin),
        vmax: args.vmax.or(file_heatmap.vmax),
        splice: args
            .splice
            .or(file_heatmap.splice)
            .unwrap_or(defaults.splice),
        transpose: args.transpose,
    };
    config.validate().map_err(config_error)?;
    debug!("Heatmap configuration: {:?}", config);
    Ok(config)
}

pub fn build_histo_config(args: &HistoArgs, file_config: &FileConfig) -> Result<HistoConfig> {
    let defaults = DefaultsConfig::default();
    Ok(HistoConfig {
        input: build_input(&args.input, file_config, &defaults)?,
        output_dir: output_or_default(args.output_dir.as_deref(), &defaults.histo_output_dir),
        plot: build_plot(&args.plot, file_config, &defaults)?,
        error_bars: !args.no_error_bars,
    })
}

pub fn build_scan_config(args: &AlascanArgs, file_config: &FileConfig) -> Result<ScanConfig> {
    let defaults = DefaultsConfig::default();

    let targets = match &args.targets {
        Some(codes) => {
            parser::parse_targets(codes).map_err(|e| CliError::Argument(e.to_string()))?
        }
        None => defaults.targets.clone(),
    };

    let config = ScanConfig {
        input: build_input(&args.input, file_config, &defaults)?,
        output: output_or_default(args.output.as_deref(), &defaults.alascan_output),
        plot: build_plot(&args.plot, file_config, &defaults)?,
        targets,
        splice: args.splice.unwrap_or(defaults.splice),
        error_bars: !args.no_error_bars,
    };
    config.validate().map_err(config_error)?;
    Ok(config)
}

pub fn build_density_config(args: &DensityArgs, file_config: &FileConfig) -> Result<DensityConfig> {
    let defaults = DefaultsConfig::default();
    let file_density = &file_config.density;

    let kind = match args.kind.or(file_density.kind) {
        Some(kind) => kind,
        None => defaults.density_kind.parse().map_err(config_error)?,
    };

    let config = DensityConfig {
        input: build_input(&args.input, file_config, &defaults)?,
        output: output_or_default(args.output.as_deref(), &defaults.density_output),
        plot: build_plot(&args.plot, file_config, &defaults)?,
        kind,
        points: args
            .points
            .or(file_density.points)
            .unwrap_or(defaults.density_points),
        bins: args
            .bins
            .or(file_density.bins)
            .unwrap_or(defaults.density_bins),
        splice: args
            .splice
            .or(file_density.splice)
            .unwrap_or(defaults.splice),
        table: args.table.clone(),
    };
    config.validate().map_err(config_error)?;
    Ok(config)
}

pub fn build_distribution_config(
    args: &DistributionArgs,
    file_config: &FileConfig,
) -> Result<DistributionConfig> {
    let defaults = DefaultsConfig::default();
    Ok(DistributionConfig {
        input: build_input(&args.input, file_config, &defaults)?,
        output: output_or_default(args.output.as_deref(), &defaults.distribution_output),
        plot: build_plot(&args.plot, file_config, &defaults)?,
        splice: args.splice.unwrap_or(defaults.splice),
    })
}

pub fn build_summary_config(args: &SummaryArgs, file_config: &FileConfig) -> Result<SummaryConfig> {
    let defaults = DefaultsConfig::default();
    let config = SummaryConfig {
        input: build_input(&args.input, file_config, &defaults)?,
        output: output_or_default(args.output.as_deref(), &defaults.summary_output),
        threshold: args
            .threshold
            .or(file_config.summary.threshold)
            .unwrap_or(defaults.threshold),
        exclude_wild_type: args.exclude_wild_type,
    };
    config.validate().map_err(config_error)?;
    Ok(config)
}

pub fn build_table_config(args: &TableArgs, file_config: &FileConfig) -> Result<TableConfig> {
    let defaults = DefaultsConfig::default();
    Ok(TableConfig {
        input: build_input(&args.input, file_config, &defaults)?,
        output: output_or_default(args.output.as_deref(), &defaults.table_output),
        with_std: args.with_std,
        transpose: args.transpose,
    })
}

pub fn build_pdb_config(args: &PdbArgs, file_config: &FileConfig) -> Result<PdbConfig> {
    let defaults = DefaultsConfig::default();
    let output = match args.statistic {
        Some(statistic) => PdbOutput::Statistic(statistic),
        None => PdbOutput::PerMutation,
    };
    Ok(PdbConfig {
        input: build_input(&args.input, file_config, &defaults)?,
        output_prefix: output_or_default(args.output.as_deref(), &defaults.pdb_prefix),
        output,
        exclude_wild_type: args.exclude_wild_type,
        missing_value: args.missing_value.unwrap_or(defaults.missing_value),
    })
}

pub fn build_mutations_config(
    args: &MutationsArgs,
    file_config: &FileConfig,
) -> Result<MutationsConfig> {
    let defaults = DefaultsConfig::default();

    let mut mutations = match &args.mutations_file {
        Some(path) => read_mutations(path).map_err(|e| CliError::FileParsing {
            path: path.clone(),
            source: e.into(),
        })?,
        None => Vec::new(),
    };
    mutations.extend(args.mutations.iter().copied());
    if mutations.is_empty() {
        return Err(CliError::Argument(
            "No mutations given. Pass them as arguments or with --mutations-file.".to_string(),
        ));
    }

    Ok(MutationsConfig {
        input: build_input(&args.input, file_config, &defaults)?,
        mutations,
        output: output_or_default(args.output.as_deref(), &defaults.mutations_output),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use ddgscan::analysis::config::{ColorMap, DensityKind};
    use ddgscan::analysis::summary::Statistic;

    const INPUT: [&str; 6] = ["-p", "model.pdb", "-d", "final_averages", "-l", "mutation_list.txt"];

    fn parse(command: &str, extra: &[&str]) -> Commands {
        let mut args = vec!["ddgscan", command];
        args.extend(INPUT);
        args.extend(extra);
        Cli::parse_from(args).command
    }

    fn file_config(content: &str) -> FileConfig {
        toml::from_str(content).expect("valid test config")
    }

    #[test]
    fn heatmap_uses_defaults_without_file_or_flags() {
        let Commands::Heatmap(args) = parse("heatmap", &[]) else {
            panic!("Expected 'heatmap' subcommand");
        };
        let config = build_heatmap_config(&args, &FileConfig::default()).unwrap();

        assert_eq!(config.output, PathBuf::from("heatmap.svg"));
        assert_eq!(config.colormap, ColorMap::Bwr);
        assert_eq!(config.splice, 0);
        assert_eq!(config.vmin, None);
        assert_eq!(config.plot, PlotConfig::default());
        assert!(config.input.multimers);
        assert!(!config.input.skip_missing);
        assert_eq!(config.input.structure_path, PathBuf::from("model.pdb"));
        assert_eq!(config.input.data_dir, PathBuf::from("final_averages"));
    }

    #[test]
    fn heatmap_flags_override_file_values() {
        let Commands::Heatmap(args) = parse(
            "heatmap",
            &["--colormap", "greys", "--vmin", "-3", "--width", "800", "-o", "out.svg"],
        ) else {
            panic!("Expected 'heatmap' subcommand");
        };
        let file = file_config(
            r#"
            [plot]
            width = 1600
            height = 900

            [heatmap]
            colormap = "viridis"
            vmin = -1.0
            vmax = 4.0
            splice = 30
            "#,
        );
        let config = build_heatmap_config(&args, &file).unwrap();

        assert_eq!(config.colormap, ColorMap::Greys);
        assert_eq!(config.vmin, Some(-3.0));
        assert_eq!(config.vmax, Some(4.0));
        assert_eq!(config.splice, 30);
        assert_eq!(config.plot.width, 800);
        assert_eq!(config.plot.height, 900);
        assert_eq!(config.output, PathBuf::from("out.svg"));
    }

    #[test]
    fn heatmap_rejects_inverted_color_range() {
        let Commands::Heatmap(args) = parse("heatmap", &["--vmin", "2", "--vmax", "1"]) else {
            panic!("Expected 'heatmap' subcommand");
        };
        let result = build_heatmap_config(&args, &FileConfig::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn multimer_flags_override_file_setting() {
        let file = file_config("[input]\nmultimers = false\nskip-missing = true\n");

        let Commands::Table(args) = parse("table", &[]) else {
            panic!("Expected 'table' subcommand");
        };
        let config = build_table_config(&args, &file).unwrap();
        assert!(!config.input.multimers);
        assert!(config.input.skip_missing);

        let Commands::Table(args) = parse("table", &["--multimers"]) else {
            panic!("Expected 'table' subcommand");
        };
        assert!(build_table_config(&args, &file).unwrap().input.multimers);

        let Commands::Table(args) = parse("table", &["--no-multimers"]) else {
            panic!("Expected 'table' subcommand");
        };
        assert!(!build_table_config(&args, &FileConfig::default()).unwrap().input.multimers);
    }

    #[test]
    fn conflicting_multimer_flags_are_rejected_by_parser() {
        let mut args = vec!["ddgscan", "table"];
        args.extend(INPUT);
        args.extend(["--multimers", "--no-multimers"]);
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn selection_is_parsed_from_arguments() {
        let Commands::Summary(args) = parse("summary", &["-s", "A1-2", "--lenient-selection"]) else {
            panic!("Expected 'summary' subcommand");
        };
        let config = build_summary_config(&args, &FileConfig::default()).unwrap();
        assert_eq!(config.input.selection, Some("A1-2".parse().unwrap()));
        assert!(config.input.lenient_selection);
        assert_eq!(config.threshold, 1.0);
        assert_eq!(config.output, PathBuf::from("summary.tsv"));
    }

    #[test]
    fn summary_threshold_precedence() {
        let file = file_config("[summary]\nthreshold = 0.5\n");

        let Commands::Summary(args) = parse("summary", &[]) else {
            panic!("Expected 'summary' subcommand");
        };
        assert_eq!(build_summary_config(&args, &file).unwrap().threshold, 0.5);

        let Commands::Summary(args) = parse("summary", &["-T", "2"]) else {
            panic!("Expected 'summary' subcommand");
        };
        assert_eq!(build_summary_config(&args, &file).unwrap().threshold, 2.0);
    }

    #[test]
    fn density_merges_kind_and_grid() {
        let Commands::Density(args) = parse("density", &["--bins", "8"]) else {
            panic!("Expected 'density' subcommand");
        };
        let file = file_config("[density]\nkind = \"hist\"\npoints = 50\nbins = 30\n");
        let config = build_density_config(&args, &file).unwrap();
        assert_eq!(config.kind, DensityKind::Histogram);
        assert_eq!(config.points, 50);
        assert_eq!(config.bins, 8);
        assert_eq!(config.table, None);

        let Commands::Density(args) = parse("density", &["--points", "1"]) else {
            panic!("Expected 'density' subcommand");
        };
        assert!(build_density_config(&args, &FileConfig::default()).is_err());
    }

    #[test]
    fn scan_targets_default_to_alanine() {
        let Commands::Alascan(args) = parse("alascan", &[]) else {
            panic!("Expected 'alascan' subcommand");
        };
        let config = build_scan_config(&args, &FileConfig::default()).unwrap();
        assert_eq!(config.targets, vec!['A']);
        assert!(config.error_bars);

        let Commands::Alascan(args) = parse("alascan", &["-t", "A,G", "--no-error-bars"]) else {
            panic!("Expected 'alascan' subcommand");
        };
        let config = build_scan_config(&args, &FileConfig::default()).unwrap();
        assert_eq!(config.targets, vec!['A', 'G']);
        assert!(!config.error_bars);

        let Commands::Alascan(args) = parse("alascan", &["-t", "1"]) else {
            panic!("Expected 'alascan' subcommand");
        };
        assert!(matches!(
            build_scan_config(&args, &FileConfig::default()),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn pdb_output_mode_follows_statistic_flag() {
        let Commands::Pdb(args) = parse("pdb", &[]) else {
            panic!("Expected 'pdb' subcommand");
        };
        let config = build_pdb_config(&args, &FileConfig::default()).unwrap();
        assert_eq!(config.output, PdbOutput::PerMutation);
        assert_eq!(config.output_prefix, PathBuf::from("ddg"));
        assert_eq!(config.missing_value, 0.0);

        let Commands::Pdb(args) = parse("pdb", &["--statistic", "median", "--missing-value", "-1"])
        else {
            panic!("Expected 'pdb' subcommand");
        };
        let config = build_pdb_config(&args, &FileConfig::default()).unwrap();
        assert_eq!(config.output, PdbOutput::Statistic(Statistic::Median));
        assert_eq!(config.missing_value, -1.0);
    }

    #[test]
    fn mutations_combine_file_and_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("wanted.txt");
        std::fs::write(&list, "MA1W\n# comment\nKA2G\n").unwrap();
        let list_arg = list.to_str().unwrap().to_string();

        let Commands::Mutations(args) = parse("mutations", &["-m", list_arg.as_str(), "AA3W"]) else {
            panic!("Expected 'mutations' subcommand");
        };
        let config = build_mutations_config(&args, &FileConfig::default()).unwrap();
        let names: Vec<String> = config.mutations.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["MA1W", "KA2G", "AA3W"]);
        assert_eq!(config.output, PathBuf::from("mutations.csv"));
    }

    #[test]
    fn mutations_require_at_least_one_mutation() {
        let Commands::Mutations(args) = parse("mutations", &[]) else {
            panic!("Expected 'mutations' subcommand");
        };
        assert!(matches!(
            build_mutations_config(&args, &FileConfig::default()),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn invalid_mutation_argument_is_rejected_by_parser() {
        let mut args = vec!["ddgscan", "mutations"];
        args.extend(INPUT);
        args.push("KA2");
        assert!(Cli::try_parse_from(args).is_err());
    }
}
