use super::print_outputs;
use crate::cli::PdbArgs;
use crate::config::FileConfig;
use crate::config::builder;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use ddgscan::analysis::config::PdbOutput;
use ddgscan::analysis::progress::ProgressReporter;
use ddgscan::workflows;
use tracing::info;

pub fn run_pdb(args: PdbArgs, file_config: &FileConfig) -> Result<()> {
    let config = builder::build_pdb_config(&args, file_config)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    match config.output {
        PdbOutput::PerMutation => info!("Writing one structure per mutation type..."),
        PdbOutput::Statistic(statistic) => {
            info!("Writing one structure with the {} DDG per position...", statistic)
        }
    }
    let structures = workflows::pdb::run(&config, &reporter)?;
    print_outputs("structure(s)", &structures);
    Ok(())
}
