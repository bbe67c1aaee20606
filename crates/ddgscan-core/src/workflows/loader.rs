use crate::analysis::config::InputConfig;
use crate::analysis::dataset::{DdgDataset, LoadOptions};
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::core::io::ddg::read_mutation_list;
use crate::core::io::pdb::{PdbFile, PdbMetadata};
use crate::core::io::traits::StructureFile;
use crate::core::models::structure::Structure;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;

pub(crate) fn read_structure(path: &Path) -> Result<(Structure, PdbMetadata), AnalysisError> {
    info!("Reading structure from {:?}", path);
    PdbFile::read_from_path(path).map_err(|e| AnalysisError::Structure {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Loads the dataset described by `input` and applies its selection.
pub(crate) fn load_dataset(input: &InputConfig, reporter: &ProgressReporter) -> Result<DdgDataset, AnalysisError> {
    let (structure, _) = read_structure(&input.structure_path)?;
    load_dataset_for(&structure, input, reporter)
}

pub(crate) fn load_dataset_for(
    structure: &Structure,
    input: &InputConfig,
    reporter: &ProgressReporter,
) -> Result<DdgDataset, AnalysisError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading DDG data",
    });
    let mutations = read_mutation_list(&input.mutation_list_path)?;
    let options = LoadOptions {
        multimers: input.multimers,
        skip_missing: input.skip_missing,
    };
    let dataset = DdgDataset::load(structure, &input.data_dir, mutations, options, reporter)?;
    let dataset = match &input.selection {
        Some(selection) => dataset.select(selection, input.lenient_selection)?,
        None => dataset,
    };
    reporter.report(Progress::PhaseFinish);
    Ok(dataset)
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<(), AnalysisError> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| AnalysisError::OutputDirectory {
        path: dir.to_path_buf(),
        source: e,
    })
}

pub(crate) fn ensure_parent(path: &Path) -> Result<(), AnalysisError> {
    match path.parent() {
        Some(parent) => ensure_dir(parent),
        None => Ok(()),
    }
}

/// `base` with `_<suffix>` appended to its file stem and the extension set to `extension`.
pub(crate) fn with_suffix(base: &Path, suffix: &str, extension: &str) -> PathBuf {
    let mut name = base
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    name.push("_");
    name.push(suffix);
    name.push(".");
    name.push(extension);
    base.with_file_name(name)
}

/// Output path of chunk `index` out of `total`. A single chunk keeps `base` unchanged.
pub(crate) fn chunk_path(base: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        base.to_path_buf()
    } else {
        let extension = base
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("svg")
            .to_string();
        with_suffix(base, &index.to_string(), &extension)
    }
}
