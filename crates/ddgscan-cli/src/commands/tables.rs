use crate::cli::{LabelsArgs, MutationsArgs, SummaryArgs, TableArgs};
use crate::config::FileConfig;
use crate::config::builder;
use crate::error::Result;
use ddgscan::workflows;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::info;

pub fn run_labels(args: LabelsArgs, file_config: &FileConfig) -> Result<()> {
    let config = builder::build_labels_config(&args, file_config);
    let labels = workflows::labels::run(&config)?;

    match &args.output {
        Some(path) => {
            write_labels(BufWriter::new(File::create(path)?), &labels)?;
            println!("✓ {} label(s) written to: {}", labels.len(), path.display());
        }
        None => write_labels(io::stdout().lock(), &labels)?,
    }
    Ok(())
}

fn write_labels<W: Write>(mut writer: W, labels: &[String]) -> io::Result<()> {
    for label in labels {
        writeln!(writer, "{}", label)?;
    }
    writer.flush()
}

pub fn run_summary(args: SummaryArgs, file_config: &FileConfig) -> Result<()> {
    let config = builder::build_summary_config(&args, file_config)?;
    info!(threshold = config.threshold, "Invoking the summary workflow...");
    let rows = workflows::summary::run(&config)?;
    println!(
        "✓ Summary of {} position(s) written to: {}",
        rows.len(),
        config.output.display()
    );
    Ok(())
}

pub fn run_table(args: TableArgs, file_config: &FileConfig) -> Result<()> {
    let config = builder::build_table_config(&args, file_config)?;
    info!("Invoking the table workflow...");
    workflows::table::run(&config)?;
    println!("✓ DDG table written to: {}", config.output.display());
    Ok(())
}

pub fn run_mutations(args: MutationsArgs, file_config: &FileConfig) -> Result<()> {
    let config = builder::build_mutations_config(&args, file_config)?;
    info!(requested = config.mutations.len(), "Invoking the mutation extraction workflow...");
    let records = workflows::mutations::run(&config)?;
    println!(
        "✓ DDGs of {} mutation(s) written to: {}",
        records.len(),
        config.output.display()
    );
    Ok(())
}
