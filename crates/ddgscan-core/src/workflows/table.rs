use super::loader::{ensure_parent, load_dataset};
use crate::analysis::config::TableConfig;
use crate::analysis::dataset::DdgDataset;
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::ProgressReporter;
use crate::core::io::table::{self, Delimiter, format_value};
use tracing::{info, instrument};

/// Writes the DDG matrix as CSV: one row per position and one column per mutation type,
/// or the other way round when transposed.
#[instrument(skip_all, name = "table_workflow")]
pub fn run(config: &TableConfig) -> Result<(), AnalysisError> {
    let dataset = load_dataset(&config.input, &ProgressReporter::new())?;
    let (header, rows) = if config.transpose {
        by_mutation(&dataset, config.with_std)
    } else {
        by_position(&dataset, config.with_std)
    };

    ensure_parent(&config.output)?;
    table::write_rows(table::create(&config.output)?, Delimiter::Comma, &header, rows.iter().cloned())?;
    info!(rows = rows.len(), columns = header.len(), "DDG table written to {:?}", config.output);
    Ok(())
}

type Table = (Vec<String>, Vec<Vec<String>>);

fn by_position(dataset: &DdgDataset, with_std: bool) -> Table {
    let mut header = vec!["position".to_string()];
    for m in dataset.mutations() {
        header.push(m.to_string());
        if with_std {
            header.push(format!("{}_std", m));
        }
    }
    let rows = dataset
        .positions()
        .iter()
        .enumerate()
        .map(|(i, position)| {
            let mut row = vec![position.label()];
            for value in dataset.row(i) {
                row.push(format_value(value.avg));
                if with_std {
                    row.push(format_value(value.std));
                }
            }
            row
        })
        .collect();
    (header, rows)
}

fn by_mutation(dataset: &DdgDataset, with_std: bool) -> Table {
    let mut header = vec!["mutation".to_string()];
    for label in dataset.labels() {
        let std_column = format!("{}_std", label);
        header.push(label);
        if with_std {
            header.push(std_column);
        }
    }
    let rows = dataset
        .mutations()
        .iter()
        .enumerate()
        .map(|(m, mutation)| {
            let mut row = vec![mutation.to_string()];
            for i in 0..dataset.len() {
                let value = dataset.row(i)[m];
                row.push(format_value(value.avg));
                if with_std {
                    row.push(format_value(value.std));
                }
            }
            row
        })
        .collect();
    (header, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::loader::tests::scan_fixture;

    #[test]
    fn writes_positions_as_rows() {
        let fixture = scan_fixture();
        let config = TableConfig {
            input: fixture.input.clone(),
            output: fixture.path("ddg.csv"),
            with_std: false,
            transpose: false,
        };
        run(&config).unwrap();
        let content = std::fs::read_to_string(fixture.path("ddg.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "position,A,G,W");
        assert_eq!(lines[1], "MA1,1.500,-0.300,2.000");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn transposed_table_with_std_columns() {
        let fixture = scan_fixture();
        let config = TableConfig {
            input: fixture.input.clone(),
            output: fixture.path("ddg_t.csv"),
            with_std: true,
            transpose: true,
        };
        run(&config).unwrap();
        let content = std::fs::read_to_string(fixture.path("ddg_t.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "mutation,MA1,MA1_std,KA2,KA2_std,AA3,AA3_std");
        assert_eq!(lines[2], "G,-0.300,0.100,1.200,0.200,0.800,0.100");
    }
}
