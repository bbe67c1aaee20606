use super::loader::read_structure;
use crate::analysis::config::LabelsConfig;
use crate::analysis::error::AnalysisError;
use crate::core::models::position::Position;
use tracing::{info, instrument};

/// Position labels of a structure, in the order MutateX names its data files.
#[instrument(skip_all, name = "labels_workflow")]
pub fn run(config: &LabelsConfig) -> Result<Vec<String>, AnalysisError> {
    let (structure, _) = read_structure(&config.structure_path)?;
    let labels: Vec<String> = structure
        .positions(config.multimers)
        .iter()
        .map(Position::label)
        .collect();
    info!(count = labels.len(), "Generated position labels.");
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::loader::tests::scan_fixture;

    #[test]
    fn lists_labels_of_amino_acid_residues() {
        let fixture = scan_fixture();
        let config = LabelsConfig {
            structure_path: fixture.input.structure_path.clone(),
            multimers: true,
        };
        assert_eq!(run(&config).unwrap(), vec!["MA1", "KA2", "AA3"]);
    }
}
