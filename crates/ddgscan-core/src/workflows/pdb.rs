use super::loader::{ensure_parent, load_dataset_for, read_structure, with_suffix};
use crate::analysis::config::{PdbConfig, PdbOutput};
use crate::analysis::dataset::DdgDataset;
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::core::io::pdb::{PdbFile, PdbMetadata};
use crate::core::io::traits::StructureFile;
use crate::core::models::structure::Structure;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Writes copies of the structure with DDG values in the b-factor column.
///
/// Residues of positions without data (unselected, skipped or not scanned) get
/// `missing_value`. Lines that do not belong to a residue are copied unchanged.
#[instrument(skip_all, name = "pdb_workflow")]
pub fn run(config: &PdbConfig, reporter: &ProgressReporter) -> Result<Vec<PathBuf>, AnalysisError> {
    let (structure, metadata) = read_structure(&config.input.structure_path)?;
    let dataset = load_dataset_for(&structure, &config.input, reporter)?;
    ensure_parent(&config.output_prefix)?;

    reporter.report(Progress::PhaseStart {
        name: "Writing structures",
    });
    let written = match config.output {
        PdbOutput::PerMutation => {
            reporter.report(Progress::TaskStart {
                total_steps: dataset.mutations().len() as u64,
            });
            let indices: Vec<usize> = (0..dataset.mutations().len()).collect();

            #[cfg(not(feature = "parallel"))]
            let iterator = indices.iter();

            #[cfg(feature = "parallel")]
            let iterator = indices.par_iter();

            let results: Vec<Result<PathBuf, AnalysisError>> = iterator
                .map(|&m| {
                    let values: Vec<f64> = (0..dataset.len()).map(|i| dataset.row(i)[m].avg).collect();
                    let path = with_suffix(&config.output_prefix, &dataset.mutations()[m].to_string(), "pdb");
                    let result = write_annotated(&structure, &metadata, &dataset, &values, config.missing_value, &path);
                    reporter.report(Progress::TaskIncrement);
                    result
                })
                .collect();
            reporter.report(Progress::TaskFinish);
            results.into_iter().collect::<Result<Vec<_>, _>>()?
        }
        PdbOutput::Statistic(statistic) => {
            let values: Vec<f64> = (0..dataset.len())
                .map(|i| {
                    dataset
                        .statistic(i, statistic, config.exclude_wild_type)
                        .unwrap_or(config.missing_value)
                })
                .collect();
            let path = with_suffix(&config.output_prefix, statistic.name(), "pdb");
            vec![write_annotated(&structure, &metadata, &dataset, &values, config.missing_value, &path)?]
        }
    };
    reporter.report(Progress::PhaseFinish);

    info!(files = written.len(), "Annotated structures written.");
    Ok(written)
}

fn write_annotated(
    structure: &Structure,
    metadata: &PdbMetadata,
    dataset: &DdgDataset,
    values: &[f64],
    missing_value: f64,
    path: &Path,
) -> Result<PathBuf, AnalysisError> {
    let by_residue: HashMap<_, f64> = dataset
        .positions()
        .iter()
        .zip(values)
        .flat_map(|(position, &value)| position.residues().iter().map(move |r| (r.key(), value)))
        .collect();

    let mut annotated = structure.clone();
    for residue in annotated.residues_mut() {
        residue.annotation = Some(by_residue.get(&residue.key()).copied().unwrap_or(missing_value));
    }

    debug!("Writing {:?}", path);
    PdbFile::write_to_path(&annotated, metadata, path).map_err(|e| AnalysisError::StructureOutput {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(path.to_path_buf())
}
