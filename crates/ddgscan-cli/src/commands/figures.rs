use super::print_outputs;
use crate::cli::{AlascanArgs, DensityArgs, DistributionArgs, HeatmapArgs, HistoArgs};
use crate::config::FileConfig;
use crate::config::builder;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use ddgscan::analysis::progress::ProgressReporter;
use ddgscan::workflows;
use tracing::info;

pub fn run_heatmap(args: HeatmapArgs, file_config: &FileConfig) -> Result<()> {
    let config = builder::build_heatmap_config(&args, file_config)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the heatmap workflow...");
    let figures = workflows::heatmap::run(&config, &reporter)?;
    print_outputs("heatmap figure(s)", &figures);
    Ok(())
}

pub fn run_histo(args: HistoArgs, file_config: &FileConfig) -> Result<()> {
    let config = builder::build_histo_config(&args, file_config)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the histogram workflow...");
    let figures = workflows::histo::run(&config, &reporter)?;
    println!(
        "✓ {} histogram(s) written to: {}",
        figures.len(),
        config.output_dir.display()
    );
    Ok(())
}

pub fn run_alascan(args: AlascanArgs, file_config: &FileConfig) -> Result<()> {
    let config = builder::build_scan_config(&args, file_config)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!(targets = ?config.targets, "Invoking the scan workflow...");
    let figures = workflows::alascan::run(&config, &reporter)?;
    print_outputs("scan figure(s)", &figures);
    Ok(())
}

pub fn run_density(args: DensityArgs, file_config: &FileConfig) -> Result<()> {
    let config = builder::build_density_config(&args, file_config)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the density workflow...");
    let result = workflows::density::run(&config, &reporter)?;
    print_outputs("density figure(s)", &result.figures);
    if let Some(table) = &result.table {
        println!("✓ Density curves written to: {}", table.display());
    }
    Ok(())
}

pub fn run_distribution(args: DistributionArgs, file_config: &FileConfig) -> Result<()> {
    let config = builder::build_distribution_config(&args, file_config)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the distribution workflow...");
    let figures = workflows::distribution::run(&config, &reporter)?;
    print_outputs("distribution figure(s)", &figures);
    Ok(())
}
