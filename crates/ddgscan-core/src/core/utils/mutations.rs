//! Matching of point mutations such as `MA10F` against the positions and mutation
//! list of a scan.

use crate::core::models::position::Position;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::warn;

static MUTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<wt>[A-Za-z])(?P<chain>[A-Za-z0-9])(?P<number>-?\d+)(?P<target>[A-Za-z])$")
        .expect("mutation pattern is valid")
});

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid mutation '{0}'. Expected <wild type><chain><number><target>, e.g. 'MA10F'.")]
    InvalidFormat(String),
    #[error("Mutation '{0}' refers to a residue that is not part of the scan")]
    UnknownResidue(String),
    #[error("Mutation '{mutation}' has the wrong wild type; the structure has '{expected}'")]
    WildTypeMismatch { mutation: String, expected: char },
    #[error("Mutation '{mutation}' targets '{target}', which is not in the mutation list")]
    UnknownTarget { mutation: String, target: char },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mutation {
    pub wild_type: char,
    pub chain: char,
    pub number: isize,
    pub target: char,
}

impl FromStr for Mutation {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = MUTATION_RE
            .captures(s)
            .ok_or_else(|| MutationError::InvalidFormat(s.to_string()))?;
        let first = |name: &str| caps[name].chars().next().unwrap_or_default();
        let number = caps["number"]
            .parse()
            .map_err(|_| MutationError::InvalidFormat(s.to_string()))?;
        Ok(Self {
            wild_type: first("wt"),
            chain: first("chain"),
            number,
            target: first("target"),
        })
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.wild_type, self.chain, self.number, self.target)
    }
}

/// A mutation resolved to a position index and a mutation-list index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedMutation {
    pub mutation: Mutation,
    pub position: usize,
    pub mutation_index: usize,
}

/// Parses mutations separated by newlines or commas. Text after `#` is ignored.
pub fn parse_mutations(text: &str) -> Result<Vec<Mutation>, MutationError> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

pub fn read_mutations(path: &Path) -> Result<Vec<Mutation>, MutationError> {
    let content = std::fs::read_to_string(path).map_err(|e| MutationError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_mutations(&content)
}

/// Resolves each mutation against the scanned positions and the mutation list.
///
/// Input order is kept; repeated mutations are reported once.
pub fn match_mutations(
    mutations: &[Mutation],
    positions: &[Position],
    mutation_list: &[char],
) -> Result<Vec<MatchedMutation>, MutationError> {
    let mut matched: Vec<MatchedMutation> = Vec::with_capacity(mutations.len());
    for &mutation in mutations {
        if matched.iter().any(|m| m.mutation == mutation) {
            warn!("Mutation {} listed more than once; keeping the first.", mutation);
            continue;
        }

        let position = positions
            .iter()
            .position(|p| p.contains(mutation.chain, mutation.number))
            .ok_or_else(|| MutationError::UnknownResidue(mutation.to_string()))?;

        let expected = positions[position].wild_type();
        if expected != mutation.wild_type {
            return Err(MutationError::WildTypeMismatch {
                mutation: mutation.to_string(),
                expected,
            });
        }

        let mutation_index = mutation_list
            .iter()
            .position(|&m| m == mutation.target)
            .ok_or_else(|| MutationError::UnknownTarget {
                mutation: mutation.to_string(),
                target: mutation.target,
            })?;

        matched.push(MatchedMutation {
            mutation,
            position,
            mutation_index,
        });
    }
    Ok(matched)
}
