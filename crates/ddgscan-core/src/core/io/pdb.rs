use crate::core::io::traits::StructureFile;
use crate::core::models::residue::{Residue, ResidueKey};
use crate::core::models::structure::Structure;
use crate::core::utils::identifiers::three_to_one;
use itertools::Itertools;
use pdbtbx::{Format, ReadOptions, StrictnessLevel};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

const B_FACTOR_COLUMNS: (usize, usize) = (60, 66);
const B_FACTOR_WIDTH: usize = B_FACTOR_COLUMNS.1 - B_FACTOR_COLUMNS.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub content: String,
    pub residue: Option<ResidueKey>, // Set for atom records of the first model
}

/// The input file, line by line, so that annotated copies differ from it only in
/// the b-factor columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    pub lines: Vec<RawLine>,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid PDB file: {0}")]
    Invalid(String),
    #[error("Chain identifier '{0}' is not a single character")]
    InvalidChainId(String),
    #[error("No amino acid residues found in the first model")]
    NoResidues,
    #[error("Value {value} for residue {residue} does not fit the 6-column b-factor field")]
    BFactorOutOfRange { residue: String, value: f64 },
}

fn chain_char(id: &str) -> Result<char, PdbError> {
    let mut chars = id.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() => Ok(c),
        _ => Err(PdbError::InvalidChainId(id.to_string())),
    }
}

fn column_char(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

/// Residue an ATOM/HETATM line belongs to, read from columns 22-27.
fn record_key(line: &str) -> Option<ResidueKey> {
    let chain = column_char(line, 21)?;
    let number = line.get(22..26)?.trim().parse().ok()?;
    Some(ResidueKey::new(chain, number, column_char(line, 26)))
}

fn raw_lines(content: &str) -> Vec<RawLine> {
    let mut in_first_model = true;
    let mut lines = Vec::new();
    for line in content.lines() {
        let record_type = line.get(..6).unwrap_or(line).trim_end();
        let residue = match record_type {
            "ATOM" | "HETATM" if in_first_model => record_key(line),
            "ENDMDL" => {
                in_first_model = false;
                None
            }
            _ => None,
        };
        lines.push(RawLine {
            content: line.to_string(),
            residue,
        });
        if record_type == "END" {
            break;
        }
    }
    lines
}

fn parse_residues(path: &Path) -> Result<Vec<Residue>, PdbError> {
    let (pdb, warnings) = ReadOptions::default()
        .set_format(Format::Pdb)
        .set_level(StrictnessLevel::Medium)
        .set_only_first_model(true)
        .read(path.to_string_lossy())
        .map_err(|errors| PdbError::Invalid(errors.iter().map(ToString::to_string).join("; ")))?;
    if !warnings.is_empty() {
        debug!("{} warnings while reading {:?}", warnings.len(), path);
    }

    let mut residues = Vec::new();
    let mut seen_keys = HashSet::new();
    let Some(model) = pdb.models().next() else {
        return Ok(residues);
    };
    for chain in model.chains() {
        let chain_id = chain_char(chain.id())?;
        for residue in chain.residues() {
            let number = residue.serial_number();
            let insertion_code = residue.insertion_code().and_then(|code| code.chars().next());
            let name = residue.name().unwrap_or_default();
            if !seen_keys.insert(ResidueKey::new(chain_id, number, insertion_code)) {
                continue;
            }
            match three_to_one(name) {
                Some(code) => residues.push(Residue::new(chain_id, number, insertion_code, name, code)),
                None => debug!("Skipping non-amino-acid residue {} {}{}", name, chain_id, number),
            }
        }
    }
    Ok(residues)
}

/// Right-aligned b-factor text, or `None` if `value` cannot be written in six columns.
fn format_b_factor(value: f64) -> Option<String> {
    let text = format!("{:>6.2}", value);
    (value.is_finite() && text.len() == B_FACTOR_WIDTH).then_some(text)
}

fn with_b_factor(line: &str, b_factor: &str) -> String {
    let (start, end) = B_FACTOR_COLUMNS;
    let head = match line.get(..start) {
        Some(head) => head.to_string(),
        None => format!("{:<width$}", line, width = start),
    };
    let tail = line.get(end..).unwrap_or("");
    format!("{}{}{}", head, b_factor, tail)
}

/// PDB structures, parsed with `pdbtbx`.
///
/// Only the first model is read. Writing does not go through `pdbtbx`: the
/// input lines are re-emitted as they were, with the b-factor columns (61-66)
/// of annotated residues replaced.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<(Structure, Self::Metadata), Self::Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let residues = parse_residues(path)?;
        if residues.is_empty() {
            return Err(PdbError::NoResidues);
        }
        debug!("Read {} residues from structure.", residues.len());
        let metadata = PdbMetadata {
            lines: raw_lines(&content),
        };
        Ok((Structure::new(residues), metadata))
    }

    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let b_factors: HashMap<ResidueKey, String> = structure
            .residues()
            .iter()
            .filter_map(|r| r.annotation.map(|value| (r, value)))
            .map(|(r, value)| match format_b_factor(value) {
                Some(text) => Ok((r.key(), text)),
                None => Err(PdbError::BFactorOutOfRange {
                    residue: r.label(),
                    value,
                }),
            })
            .collect::<Result<_, _>>()?;

        let mut unmatched = b_factors.keys().copied().collect::<HashSet<_>>();
        for line in &metadata.lines {
            match line.residue.and_then(|key| b_factors.get(&key).map(|text| (key, text))) {
                Some((key, text)) => {
                    unmatched.remove(&key);
                    writeln!(writer, "{}", with_b_factor(&line.content, text))?
                }
                None => writeln!(writer, "{}", line.content)?,
            }
        }
        if !unmatched.is_empty() {
            warn!("{} annotated residues have no atom records in the output.", unmatched.len());
        }
        Ok(())
    }

    fn write_to_path<P: AsRef<Path>>(
        structure: &Structure,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        // Rendered in memory so a rejected value leaves no partial file behind.
        let mut buffer = Vec::new();
        Self::write_to(structure, metadata, &mut buffer)?;
        fs::write(path, buffer)?;
        Ok(())
    }
}
