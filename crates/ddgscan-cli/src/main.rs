mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::FileConfig;
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("ddgscan CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    let file_config = FileConfig::load(cli.config.as_deref(), &cli.set_values)?;

    let command_result = match cli.command {
        Commands::Labels(args) => commands::tables::run_labels(args, &file_config),
        Commands::Heatmap(args) => {
            info!("Dispatching to 'heatmap' command.");
            commands::figures::run_heatmap(args, &file_config)
        }
        Commands::Histo(args) => {
            info!("Dispatching to 'histo' command.");
            commands::figures::run_histo(args, &file_config)
        }
        Commands::Alascan(args) => {
            info!("Dispatching to 'alascan' command.");
            commands::figures::run_alascan(args, &file_config)
        }
        Commands::Density(args) => {
            info!("Dispatching to 'density' command.");
            commands::figures::run_density(args, &file_config)
        }
        Commands::Distribution(args) => {
            info!("Dispatching to 'distribution' command.");
            commands::figures::run_distribution(args, &file_config)
        }
        Commands::Summary(args) => {
            info!("Dispatching to 'summary' command.");
            commands::tables::run_summary(args, &file_config)
        }
        Commands::Table(args) => {
            info!("Dispatching to 'table' command.");
            commands::tables::run_table(args, &file_config)
        }
        Commands::Pdb(args) => {
            info!("Dispatching to 'pdb' command.");
            commands::structure::run_pdb(args, &file_config)
        }
        Commands::Mutations(args) => {
            info!("Dispatching to 'mutations' command.");
            commands::tables::run_mutations(args, &file_config)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}
