//! Residue selection language.
//!
//! A selection is a comma-separated list of tokens:
//!
//! | token | selects |
//! |-------|---------|
//! | `*` | every position |
//! | `A` | every residue of chain A |
//! | `A10`, `A-3` | a single residue |
//! | `A10-25`, `A10-A25`, `A10:25` | an inclusive range within one chain |
//!
//! A position is selected when any of its residues matches any token.

use crate::core::models::position::Position;
use crate::core::models::residue::Residue;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::warn;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<chain>[A-Za-z0-9])(?:(?P<start>-?\d+)(?:[-:](?P<end_chain>[A-Za-z])?(?P<end>-?\d+))?)?$")
        .expect("selection token pattern is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Selection is empty")]
    Empty,
    #[error("Invalid selection token '{0}'. Expected '*', a chain ('A'), a residue ('A10') or a range ('A10-25').")]
    InvalidToken(String),
    #[error("Range '{0}' spans two chains")]
    ChainMismatch(String),
    #[error("Range '{0}' ends before it starts")]
    InvertedRange(String),
    #[error("Selection token '{0}' does not match any residue")]
    NoMatch(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionToken {
    All,
    Chain(char),
    Residue { chain: char, number: isize },
    Range { chain: char, start: isize, end: isize },
}

impl SelectionToken {
    pub fn matches(&self, residue: &Residue) -> bool {
        match *self {
            SelectionToken::All => true,
            SelectionToken::Chain(chain) => residue.chain == chain,
            SelectionToken::Residue { chain, number } => {
                residue.chain == chain && residue.number == number
            }
            SelectionToken::Range { chain, start, end } => {
                residue.chain == chain && (start..=end).contains(&residue.number)
            }
        }
    }

    fn parse(token: &str) -> Result<Self, SelectionError> {
        if token == "*" {
            return Ok(SelectionToken::All);
        }
        let caps = TOKEN_RE
            .captures(token)
            .ok_or_else(|| SelectionError::InvalidToken(token.to_string()))?;

        let chain = caps["chain"].chars().next().unwrap_or_default();
        let parse_num = |name: &str| -> Result<Option<isize>, SelectionError> {
            caps.name(name)
                .map(|m| {
                    m.as_str()
                        .parse()
                        .map_err(|_| SelectionError::InvalidToken(token.to_string()))
                })
                .transpose()
        };
        let start = parse_num("start")?;
        let end = parse_num("end")?;

        if let Some(end_chain) = caps.name("end_chain") {
            if !end_chain.as_str().starts_with(chain) {
                return Err(SelectionError::ChainMismatch(token.to_string()));
            }
        }

        match (start, end) {
            (None, _) => Ok(SelectionToken::Chain(chain)),
            (Some(number), None) => Ok(SelectionToken::Residue { chain, number }),
            (Some(start), Some(end)) if end < start => {
                Err(SelectionError::InvertedRange(token.to_string()))
            }
            (Some(start), Some(end)) => Ok(SelectionToken::Range { chain, start, end }),
        }
    }
}

/// A parsed residue selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    tokens: Vec<(String, SelectionToken)>,
}

impl Selection {
    pub fn all() -> Self {
        Self {
            tokens: vec![("*".to_string(), SelectionToken::All)],
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &SelectionToken> {
        self.tokens.iter().map(|(_, token)| token)
    }

    pub fn matches(&self, position: &Position) -> bool {
        self.tokens()
            .any(|token| position.residues().iter().any(|r| token.matches(r)))
    }

    /// Resolves the selection against `positions`, returning indices in their original order.
    ///
    /// Every token has to match at least one position. With `lenient` set, tokens that
    /// match nothing are logged and ignored instead.
    pub fn resolve(&self, positions: &[Position], lenient: bool) -> Result<Vec<usize>, SelectionError> {
        for (text, token) in &self.tokens {
            let hit = positions
                .iter()
                .any(|p| p.residues().iter().any(|r| token.matches(r)));
            if !hit {
                if lenient {
                    warn!("Selection token '{}' does not match any residue; ignoring.", text);
                } else {
                    return Err(SelectionError::NoMatch(text.clone()));
                }
            }
        }

        Ok(positions
            .iter()
            .enumerate()
            .filter(|(_, p)| self.matches(p))
            .map(|(i, _)| i)
            .collect())
    }
}

impl FromStr for Selection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| SelectionToken::parse(t).map(|token| (t.to_string(), token)))
            .collect::<Result<Vec<_>, _>>()?;
        if tokens.is_empty() {
            return Err(SelectionError::Empty);
        }
        Ok(Self { tokens })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let texts: Vec<&str> = self.tokens.iter().map(|(t, _)| t.as_str()).collect();
        write!(f, "{}", texts.join(","))
    }
}
