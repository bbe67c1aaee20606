use clap::{Args, Parser, Subcommand};
use ddgscan::analysis::config::{ColorMap, DensityKind};
use ddgscan::analysis::summary::Statistic;
use ddgscan::core::utils::mutations::Mutation;
use ddgscan::core::utils::selection::Selection;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "ddgscan developers",
    version,
    about = "ddgscan - Figures and tables from MutateX saturation mutagenesis scans.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel figure generation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S heatmap.colormap=viridis
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the position labels of a structure, one per line.
    Labels(LabelsArgs),
    /// Draw a heatmap of DDG values, positions against mutation types.
    Heatmap(HeatmapArgs),
    /// Draw one bar chart of all mutations per position.
    Histo(HistoArgs),
    /// Draw the DDG of one mutation type (alanine by default) across positions.
    Alascan(AlascanArgs),
    /// Draw the density of DDG values per position.
    Density(DensityArgs),
    /// Draw box plots of DDG values per position.
    Distribution(DistributionArgs),
    /// Write per-position statistics and stabilizing/destabilizing counts.
    Summary(SummaryArgs),
    /// Write the DDG matrix as CSV.
    Table(TableArgs),
    /// Write structures with DDG values in the b-factor column.
    Pdb(PdbArgs),
    /// Extract the DDG values of specific mutations.
    Mutations(MutationsArgs),
}

/// Arguments that locate a scan, shared by every data command.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the structure the scan was run on (PDB format).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub pdb: PathBuf,

    /// Directory of per-position DDG files (e.g., results/mutation_ddgs/final_averages).
    #[arg(short, long, required = true, value_name = "DIR")]
    pub data: PathBuf,

    /// Path to the mutation list used for the scan.
    #[arg(short = 'l', long, required = true, value_name = "PATH")]
    pub mutation_list: PathBuf,

    /// Override `input.multimers` from the config file.
    #[command(flatten)]
    pub multimers: MultimerFlags,

    /// Skip positions without a DDG file instead of failing.
    #[arg(long)]
    pub skip_missing: bool,

    /// Restrict the analysis to a residue selection (e.g., 'A10-20,B5').
    #[arg(short, long, value_name = "SELECTION")]
    pub select: Option<Selection>,

    /// Ignore selection entries that match no position.
    #[arg(long)]
    pub lenient_selection: bool,
}

/// A group to handle mutually exclusive flags for multimer position grouping.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct MultimerFlags {
    /// Treat identical residues of identical chains as one position.
    #[arg(long)]
    pub multimers: bool,
    /// Treat every chain separately.
    #[arg(long)]
    pub no_multimers: bool,
}

/// Figure geometry shared by every plotting command.
#[derive(Args, Debug, Clone, Default)]
pub struct PlotArgs {
    /// Figure width in pixels.
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Figure height in pixels.
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,

    /// Base font size in points.
    #[arg(long, value_name = "PT")]
    pub font_size: Option<u32>,

    /// Figure title.
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,
}

/// Arguments for the `labels` subcommand.
#[derive(Args, Debug)]
pub struct LabelsArgs {
    /// Path to the structure (PDB format).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub pdb: PathBuf,

    /// Write the labels to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub multimers: MultimerFlags,
}

/// Arguments for the `heatmap` subcommand.
#[derive(Args, Debug)]
pub struct HeatmapArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Output figure path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Colour map: bwr, viridis or greys.
    #[arg(long, value_name = "NAME")]
    pub colormap: Option<ColorMap>,

    /// Lower end of the colour range.
    #[arg(long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub vmin: Option<f64>,

    /// Upper end of the colour range.
    #[arg(long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub vmax: Option<f64>,

    /// Number of positions per figure (0 draws all positions in one figure).
    #[arg(long, value_name = "INT")]
    pub splice: Option<usize>,

    /// Put mutation types on the x axis and positions on the y axis.
    #[arg(long)]
    pub transpose: bool,
}

/// Arguments for the `histo` subcommand.
#[derive(Args, Debug)]
pub struct HistoArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Directory for the per-position figures.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not draw standard deviation error bars.
    #[arg(long)]
    pub no_error_bars: bool,
}

/// Arguments for the `alascan` subcommand.
#[derive(Args, Debug)]
pub struct AlascanArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Output figure path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Mutation types to plot, as one-letter codes (e.g., 'A' or 'A,G').
    #[arg(short, long, value_name = "CODES")]
    pub targets: Option<String>,

    /// Number of positions per figure (0 draws all positions in one figure).
    #[arg(long, value_name = "INT")]
    pub splice: Option<usize>,

    /// Do not draw standard deviation error bars.
    #[arg(long)]
    pub no_error_bars: bool,
}

/// Arguments for the `density` subcommand.
#[derive(Args, Debug)]
pub struct DensityArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Output figure path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Estimate kind: kde or histogram.
    #[arg(long, value_name = "KIND")]
    pub kind: Option<DensityKind>,

    /// Number of grid points for the density curves.
    #[arg(long, value_name = "INT")]
    pub points: Option<usize>,

    /// Number of histogram bins.
    #[arg(long, value_name = "INT")]
    pub bins: Option<usize>,

    /// Number of positions per figure (0 draws all positions in one figure).
    #[arg(long, value_name = "INT")]
    pub splice: Option<usize>,

    /// Also write the evaluated curves as TSV.
    #[arg(long, value_name = "PATH")]
    pub table: Option<PathBuf>,
}

/// Arguments for the `distribution` subcommand.
#[derive(Args, Debug)]
pub struct DistributionArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Output figure path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of positions per figure (0 draws all positions in one figure).
    #[arg(long, value_name = "INT")]
    pub splice: Option<usize>,
}

/// Arguments for the `summary` subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output TSV path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// DDG magnitude (kcal/mol) separating neutral from (de)stabilizing mutations.
    #[arg(short = 'T', long, value_name = "FLOAT")]
    pub threshold: Option<f64>,

    /// Leave out mutations to the wild-type residue.
    #[arg(long)]
    pub exclude_wild_type: bool,
}

/// Arguments for the `table` subcommand.
#[derive(Args, Debug)]
pub struct TableArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output CSV path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Add a standard deviation column after each value column.
    #[arg(long)]
    pub with_std: bool,

    /// One row per mutation type instead of one row per position.
    #[arg(long)]
    pub transpose: bool,
}

/// Arguments for the `pdb` subcommand.
#[derive(Args, Debug)]
pub struct PdbArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Prefix of the output structure files.
    #[arg(short, long, value_name = "PREFIX")]
    pub output: Option<PathBuf>,

    /// Write one structure with this statistic (mean, median, min, max)
    /// instead of one structure per mutation type.
    #[arg(long, value_name = "STAT")]
    pub statistic: Option<Statistic>,

    /// Leave out mutations to the wild-type residue when computing the statistic.
    #[arg(long)]
    pub exclude_wild_type: bool,

    /// B-factor written for residues without DDG data.
    #[arg(long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub missing_value: Option<f64>,
}

/// Arguments for the `mutations` subcommand.
#[derive(Args, Debug)]
pub struct MutationsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output CSV path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// File with one mutation per line (e.g., 'KA2G').
    #[arg(short = 'm', long, value_name = "PATH")]
    pub mutations_file: Option<PathBuf>,

    /// Mutations to extract (e.g., 'KA2G MA1W').
    #[arg(value_name = "MUTATION")]
    pub mutations: Vec<Mutation>,
}
