use super::residue::Residue;
use itertools::Itertools;

/// The unit MutateX DDG data is keyed on.
///
/// For a monomer scan a position is a single residue. In homo-multimer mode it
/// holds the equivalent residue of every chain in a group of identical chains,
/// and the DDG value describes mutating all of them at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    residues: Vec<Residue>,
}

impl Position {
    /// Creates a position from its residues. Returns `None` if `residues` is empty.
    pub fn new(residues: Vec<Residue>) -> Option<Self> {
        if residues.is_empty() {
            None
        } else {
            Some(Self { residues })
        }
    }

    pub fn single(residue: Residue) -> Self {
        Self {
            residues: vec![residue],
        }
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residues_mut(&mut self) -> &mut [Residue] {
        &mut self.residues
    }

    /// The first residue of the position, used for display and sorting.
    pub fn primary(&self) -> &Residue {
        &self.residues[0]
    }

    pub fn wild_type(&self) -> char {
        self.primary().one_letter
    }

    /// Label used as the DDG data file name (e.g. `MA1` or `MA1_MB1`).
    pub fn label(&self) -> String {
        self.residues.iter().map(Residue::label).join("_")
    }

    pub fn contains(&self, chain: char, number: isize) -> bool {
        self.residues
            .iter()
            .any(|r| r.chain == chain && r.number == number)
    }
}
