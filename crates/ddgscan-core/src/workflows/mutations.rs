use super::loader::{ensure_parent, load_dataset};
use crate::analysis::config::MutationsConfig;
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::ProgressReporter;
use crate::core::io::table::{self, Delimiter, rounded, rounded_opt};
use crate::core::utils::mutations::match_mutations;
use serde::Serialize;
use tracing::{info, instrument};

/// DDG of one requested mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationRecord {
    pub mutation: String,
    pub position: String,
    #[serde(serialize_with = "rounded")]
    pub avg: f64,
    #[serde(serialize_with = "rounded")]
    pub std: f64,
    #[serde(serialize_with = "rounded_opt")]
    pub min: Option<f64>,
    #[serde(serialize_with = "rounded_opt")]
    pub max: Option<f64>,
}

/// Looks up the DDG of each requested mutation and writes them as CSV, in request order.
#[instrument(skip_all, name = "mutations_workflow")]
pub fn run(config: &MutationsConfig) -> Result<Vec<MutationRecord>, AnalysisError> {
    let dataset = load_dataset(&config.input, &ProgressReporter::new())?;
    let matched = match_mutations(&config.mutations, dataset.positions(), dataset.mutations())?;

    let records: Vec<MutationRecord> = matched
        .iter()
        .map(|m| {
            let value = dataset.row(m.position)[m.mutation_index];
            MutationRecord {
                mutation: m.mutation.to_string(),
                position: dataset.positions()[m.position].label(),
                avg: value.avg,
                std: value.std,
                min: value.min,
                max: value.max,
            }
        })
        .collect();

    ensure_parent(&config.output)?;
    table::write_records(table::create(&config.output)?, Delimiter::Comma, &records)?;
    info!(mutations = records.len(), "Mutation DDGs written to {:?}", config.output);
    Ok(records)
}
