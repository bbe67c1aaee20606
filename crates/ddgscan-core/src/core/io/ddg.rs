//! Readers for the two text formats a MutateX run leaves behind: the mutation list
//! and the per-position averaged DDG files.

use crate::core::utils::identifiers::is_known_code;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum DdgError {
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Mutation list '{path}' contains no entries", path = path.display())]
    EmptyMutationList { path: PathBuf },
    #[error("Invalid entry '{entry}' on line {line} of '{path}': expected a single residue letter", path = path.display())]
    InvalidMutationEntry {
        path: PathBuf,
        line: usize,
        entry: String,
    },
    #[error("Duplicate entry '{entry}' on line {line} of '{path}'", path = path.display())]
    DuplicateMutationEntry {
        path: PathBuf,
        line: usize,
        entry: char,
    },
    #[error("Invalid number '{value}' on line {line} of '{path}'", path = path.display())]
    InvalidValue {
        path: PathBuf,
        line: usize,
        value: String,
    },
    #[error("Line {line} of '{path}' has {found} column(s); at least avg and std are required", path = path.display())]
    TooFewColumns {
        path: PathBuf,
        line: usize,
        found: usize,
    },
    #[error("'{path}' has {found} data row(s) but the mutation list has {expected}", path = path.display())]
    RowCountMismatch {
        path: PathBuf,
        found: usize,
        expected: usize,
    },
    #[error("No data file for position {label} (expected '{path}')", path = path.display())]
    MissingFile { label: String, path: PathBuf },
}

/// One row of a MutateX averaged DDG file, in kcal/mol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DdgValue {
    pub avg: f64,
    pub std: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl DdgValue {
    pub fn new(avg: f64, std: f64) -> Self {
        Self {
            avg,
            std,
            min: None,
            max: None,
        }
    }
}

fn read_file(path: &Path) -> Result<String, DdgError> {
    std::fs::read_to_string(path).map_err(|e| DdgError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Content lines of a MutateX text file: 1-based line number and trimmed text,
/// skipping blanks and `#` comments.
fn content_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

pub fn read_mutation_list(path: &Path) -> Result<Vec<char>, DdgError> {
    let content = read_file(path)?;
    parse_mutation_list(&content, path)
}

/// Parses a mutation list: one residue type per line, in the order the DDG file rows use.
pub fn parse_mutation_list(content: &str, path: &Path) -> Result<Vec<char>, DdgError> {
    let mut entries = Vec::new();
    for (line, text) in content_lines(content) {
        let token = text.split_whitespace().next().unwrap_or_default();
        let mut chars = token.chars();
        let entry = match (chars.next(), chars.next()) {
            (Some(c), None) if is_known_code(c) => c,
            _ => {
                return Err(DdgError::InvalidMutationEntry {
                    path: path.to_path_buf(),
                    line,
                    entry: token.to_string(),
                });
            }
        };
        if entries.contains(&entry) {
            return Err(DdgError::DuplicateMutationEntry {
                path: path.to_path_buf(),
                line,
                entry,
            });
        }
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(DdgError::EmptyMutationList {
            path: path.to_path_buf(),
        });
    }
    debug!("Mutation list has {} entries.", entries.len());
    Ok(entries)
}

pub fn parse_ddg_file(path: &Path, n_mutations: usize) -> Result<Vec<DdgValue>, DdgError> {
    let content = read_file(path)?;
    parse_ddg_content(&content, path, n_mutations)
}

/// Parses the rows of an averaged DDG file (`avg std min max`).
///
/// Exactly `n_mutations` data rows are required; `min` and `max` may be absent.
pub fn parse_ddg_content(
    content: &str,
    path: &Path,
    n_mutations: usize,
) -> Result<Vec<DdgValue>, DdgError> {
    let mut values = Vec::with_capacity(n_mutations);
    for (line, text) in content_lines(content) {
        let fields = text
            .split_whitespace()
            .map(|field| {
                field.parse::<f64>().map_err(|_| DdgError::InvalidValue {
                    path: path.to_path_buf(),
                    line,
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if fields.len() < 2 {
            return Err(DdgError::TooFewColumns {
                path: path.to_path_buf(),
                line,
                found: fields.len(),
            });
        }
        if fields.len() > 4 {
            warn!(
                "Ignoring {} extra column(s) on line {} of {:?}",
                fields.len() - 4,
                line,
                path
            );
        }
        values.push(DdgValue {
            avg: fields[0],
            std: fields[1],
            min: fields.get(2).copied(),
            max: fields.get(3).copied(),
        });
    }

    if values.len() != n_mutations {
        return Err(DdgError::RowCountMismatch {
            path: path.to_path_buf(),
            found: values.len(),
            expected: n_mutations,
        });
    }
    Ok(values)
}
