use super::error::AnalysisError;
use super::progress::{Progress, ProgressReporter};
use super::summary::Statistic;
use crate::core::io::ddg::{DdgError, DdgValue, parse_ddg_file};
use crate::core::models::position::Position;
use crate::core::models::structure::Structure;
use crate::core::utils::selection::Selection;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    pub multimers: bool,
    pub skip_missing: bool,
}

/// DDG values of a scan: one row per position, one column per mutation-list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DdgDataset {
    positions: Vec<Position>,
    mutations: Vec<char>,
    values: Vec<Vec<DdgValue>>,
}

impl DdgDataset {
    pub fn from_parts(
        positions: Vec<Position>,
        mutations: Vec<char>,
        values: Vec<Vec<DdgValue>>,
    ) -> Result<Self, AnalysisError> {
        if positions.len() != values.len() {
            return Err(AnalysisError::Inconsistent(format!(
                "{} positions but {} value rows",
                positions.len(),
                values.len()
            )));
        }
        if let Some((i, row)) = values
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != mutations.len())
        {
            return Err(AnalysisError::Inconsistent(format!(
                "row for {} has {} values but there are {} mutation types",
                positions[i].label(),
                row.len(),
                mutations.len()
            )));
        }
        Ok(Self {
            positions,
            mutations,
            values,
        })
    }

    /// Loads the DDG file of every position of `structure` from `data_dir`.
    ///
    /// With `skip_missing`, positions without a file are left out and reported
    /// through `reporter`.
    pub fn load(
        structure: &Structure,
        data_dir: &Path,
        mutations: Vec<char>,
        options: LoadOptions,
        reporter: &ProgressReporter,
    ) -> Result<Self, AnalysisError> {
        let mut positions = Vec::new();
        let mut values = Vec::new();

        for position in structure.positions(options.multimers) {
            let label = position.label();
            let path = data_dir.join(&label);
            if !path.is_file() {
                if options.skip_missing {
                    warn!("No data file for {} ({:?}); skipping position.", label, path);
                    reporter.report(Progress::Message(format!("Skipped {}: no DDG file", label)));
                    continue;
                }
                return Err(DdgError::MissingFile { label, path }.into());
            }
            debug!("Reading DDG file {:?}", path);
            values.push(parse_ddg_file(&path, mutations.len())?);
            positions.push(position);
        }

        if positions.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }
        info!(
            positions = positions.len(),
            mutation_types = mutations.len(),
            "Loaded DDG dataset."
        );
        Self::from_parts(positions, mutations, values)
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn mutations(&self) -> &[char] {
        &self.mutations
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.positions.iter().map(Position::label).collect()
    }

    pub fn row(&self, position: usize) -> &[DdgValue] {
        &self.values[position]
    }

    /// Average DDGs of one position, in mutation-list order.
    pub fn averages(&self, position: usize) -> Vec<f64> {
        self.values[position].iter().map(|v| v.avg).collect()
    }

    /// Average DDGs of one position, optionally leaving out the self-mutation
    /// (e.g. A to A at an alanine).
    pub fn averages_filtered(&self, position: usize, exclude_wild_type: bool) -> Vec<f64> {
        let wild_type = self.positions[position].wild_type();
        self.mutations
            .iter()
            .zip(&self.values[position])
            .filter(|(m, _)| !(exclude_wild_type && **m == wild_type))
            .map(|(_, v)| v.avg)
            .collect()
    }

    pub fn mutation_index(&self, mutation: char) -> Option<usize> {
        self.mutations.iter().position(|&m| m == mutation)
    }

    /// Values of one mutation type across all positions.
    pub fn column(&self, mutation: char) -> Result<Vec<DdgValue>, AnalysisError> {
        let idx = self
            .mutation_index(mutation)
            .ok_or(AnalysisError::UnknownMutationType(mutation))?;
        Ok(self.values.iter().map(|row| row[idx]).collect())
    }

    pub fn statistic(&self, position: usize, statistic: Statistic, exclude_wild_type: bool) -> Option<f64> {
        statistic.apply(&self.averages_filtered(position, exclude_wild_type))
    }

    /// Subset of positions by index, in the order given.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            positions: indices.iter().map(|&i| self.positions[i].clone()).collect(),
            mutations: self.mutations.clone(),
            values: indices.iter().map(|&i| self.values[i].clone()).collect(),
        }
    }

    pub fn select(&self, selection: &Selection, lenient: bool) -> Result<Self, AnalysisError> {
        let indices = selection.resolve(&self.positions, lenient)?;
        if indices.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }
        debug!(
            "Selection '{}' kept {} of {} positions.",
            selection,
            indices.len(),
            self.len()
        );
        Ok(self.subset(&indices))
    }

    /// Splits the dataset into consecutive chunks of `size` positions. A size of 0
    /// returns the whole dataset as a single chunk.
    pub fn chunks(&self, size: usize) -> Vec<Self> {
        if size == 0 || size >= self.len() {
            return vec![self.clone()];
        }
        let indices: Vec<usize> = (0..self.len()).collect();
        indices.chunks(size).map(|c| self.subset(c)).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::models::residue::Residue;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    pub(crate) fn sample_dataset() -> DdgDataset {
        let residues = vec![
            Residue::new('A', 1, None, "ALA", 'A'),
            Residue::new('A', 2, None, "LYS", 'K'),
            Residue::new('A', 3, None, "GLY", 'G'),
        ];
        let positions = Structure::new(residues).positions(false);
        let rows = [[0.0, 1.5, -0.5], [2.0, 0.2, 3.0], [-1.2, 0.0, 0.4]];
        let values = rows
            .iter()
            .map(|row| row.iter().map(|&avg| DdgValue::new(avg, 0.1)).collect())
            .collect();
        DdgDataset::from_parts(positions, vec!['A', 'F', 'G'], values).unwrap()
    }

    fn write_scan(dir: &Path, labels: &[&str]) {
        for label in labels {
            fs::write(dir.join(label), "#avg std min max\n1.0 0.1 0.9 1.1\n-0.5 0.2 -0.7 -0.3\n")
                .unwrap();
        }
    }

    fn structure() -> Structure {
        Structure::new(vec![
            Residue::new('A', 1, None, "MET", 'M'),
            Residue::new('B', 1, None, "MET", 'M'),
        ])
    }

    #[test]
    fn from_parts_rejects_mismatched_rows() {
        let positions = Structure::new(vec![Residue::new('A', 1, None, "ALA", 'A')]).positions(false);
        let result = DdgDataset::from_parts(positions, vec!['A', 'G'], vec![vec![DdgValue::new(0.0, 0.0)]]);
        assert!(matches!(result, Err(AnalysisError::Inconsistent(_))));
    }

    #[test]
    fn load_reads_multimer_position_files() {
        let dir = tempdir().unwrap();
        write_scan(dir.path(), &["MA1_MB1"]);
        let options = LoadOptions {
            multimers: true,
            skip_missing: false,
        };
        let reporter = ProgressReporter::new();
        let dataset = DdgDataset::load(&structure(), dir.path(), vec!['A', 'G'], options, &reporter).unwrap();
        assert_eq!(dataset.labels(), vec!["MA1_MB1"]);
        assert_eq!(dataset.averages(0), vec![1.0, -0.5]);
    }

    #[test]
    fn load_fails_on_missing_file_unless_skipping() {
        let dir = tempdir().unwrap();
        write_scan(dir.path(), &["MA1"]);
        let strict = LoadOptions::default();
        let reporter = ProgressReporter::new();
        let result = DdgDataset::load(&structure(), dir.path(), vec!['A', 'G'], strict, &reporter);
        assert!(matches!(
            result,
            Err(AnalysisError::Ddg(DdgError::MissingFile { ref label, .. })) if label == "MB1"
        ));

        let lenient = LoadOptions {
            multimers: false,
            skip_missing: true,
        };
        let dataset = DdgDataset::load(&structure(), dir.path(), vec!['A', 'G'], lenient, &reporter).unwrap();
        assert_eq!(dataset.labels(), vec!["MA1"]);
    }

    #[test]
    fn skipped_positions_are_reported() {
        let dir = tempdir().unwrap();
        write_scan(dir.path(), &["MA1"]);
        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Message(msg) = event {
                messages.lock().unwrap().push(msg);
            }
        }));
        let options = LoadOptions {
            multimers: false,
            skip_missing: true,
        };
        DdgDataset::load(&structure(), dir.path(), vec!['A', 'G'], options, &reporter).unwrap();
        drop(reporter);
        assert_eq!(messages.into_inner().unwrap(), vec!["Skipped MB1: no DDG file"]);
    }

    #[test]
    fn load_with_no_files_at_all_is_empty_dataset() {
        let dir = tempdir().unwrap();
        let options = LoadOptions {
            multimers: false,
            skip_missing: true,
        };
        let result = DdgDataset::load(&structure(), dir.path(), vec!['A'], options, &ProgressReporter::new());
        assert!(matches!(result, Err(AnalysisError::EmptyDataset)));
    }

    #[test]
    fn column_returns_one_mutation_type() {
        let dataset = sample_dataset();
        let avgs: Vec<f64> = dataset.column('F').unwrap().iter().map(|v| v.avg).collect();
        assert_eq!(avgs, vec![1.5, 0.2, 0.0]);
        assert!(matches!(
            dataset.column('W'),
            Err(AnalysisError::UnknownMutationType('W'))
        ));
    }

    #[test]
    fn averages_filtered_drops_self_mutation() {
        let dataset = sample_dataset();
        assert_eq!(dataset.averages_filtered(0, true), vec![1.5, -0.5]);
        assert_eq!(dataset.averages_filtered(0, false), vec![0.0, 1.5, -0.5]);
        assert_eq!(dataset.averages_filtered(1, true), vec![2.0, 0.2, 3.0]);
    }

    #[test]
    fn select_keeps_matching_positions() {
        let dataset = sample_dataset();
        let selection: Selection = "A2-3".parse().unwrap();
        let selected = dataset.select(&selection, false).unwrap();
        assert_eq!(selected.labels(), vec!["KA2", "GA3"]);
        assert_eq!(selected.averages(0), vec![2.0, 0.2, 3.0]);
    }

    #[test]
    fn chunks_split_positions_in_order() {
        let dataset = sample_dataset();
        let chunks = dataset.chunks(2);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].labels(), vec!["AA1", "KA2"]);
        assert_eq!(chunks[1].labels(), vec!["GA3"]);
        assert_eq!(dataset.chunks(0).len(), 1);
        assert_eq!(dataset.chunks(10).len(), 1);
    }

    #[test]
    fn statistic_is_computed_over_position_averages() {
        let dataset = sample_dataset();
        assert_eq!(dataset.statistic(1, Statistic::Max, false), Some(3.0));
        assert_eq!(dataset.statistic(2, Statistic::Min, false), Some(-1.2));
        assert_eq!(dataset.statistic(2, Statistic::Median, false), Some(0.0));
    }
}
