use super::config::ConfigError;
use crate::core::io::ddg::DdgError;
use crate::core::io::pdb::PdbError;
use crate::core::io::table::TableError;
use crate::core::stats::StatsError;
use crate::core::utils::mutations::MutationError;
use crate::core::utils::selection::SelectionError;
use crate::render::RenderError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to read structure '{path}': {source}", path = path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Failed to write structure '{path}': {source}", path = path.display())]
    StructureOutput {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error(transparent)]
    Ddg(#[from] DdgError),

    #[error("Invalid residue selection: {0}")]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error("Statistics failed for {label}: {source}")]
    Stats {
        label: String,
        #[source]
        source: StatsError,
    },

    #[error("Figure rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to write table: {0}")]
    Table(#[from] TableError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Mutation type '{0}' is not in the mutation list")]
    UnknownMutationType(char),

    #[error("No positions with DDG data to process")]
    EmptyDataset,

    #[error("Inconsistent dataset: {0}")]
    Inconsistent(String),

    #[error("Failed to create output directory '{path}': {source}", path = path.display())]
    OutputDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
}
