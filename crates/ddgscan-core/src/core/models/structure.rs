use super::position::Position;
use super::residue::{Residue, ResidueKey};
use tracing::debug;

/// Ordered residues of a protein structure, as read from the first model of a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    residues: Vec<Residue>,
}

impl Structure {
    pub fn new(residues: Vec<Residue>) -> Self {
        Self { residues }
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residues_mut(&mut self) -> &mut [Residue] {
        &mut self.residues
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn find(&self, key: &ResidueKey) -> Option<&Residue> {
        self.residues.iter().find(|r| r.key() == *key)
    }

    /// Chain identifiers in order of first appearance.
    pub fn chains(&self) -> Vec<char> {
        let mut chains = Vec::new();
        for residue in &self.residues {
            if !chains.contains(&residue.chain) {
                chains.push(residue.chain);
            }
        }
        chains
    }

    pub fn residues_of(&self, chain: char) -> impl Iterator<Item = &Residue> {
        self.residues.iter().filter(move |r| r.chain == chain)
    }

    /// One-letter sequence of a chain.
    pub fn sequence_of(&self, chain: char) -> String {
        self.residues_of(chain).map(|r| r.one_letter).collect()
    }

    /// Enumerates the positions DDG data is keyed on.
    ///
    /// With `multimers` set, chains with identical residue numbering and sequence are
    /// grouped and their equivalent residues share one position. Groups are emitted in
    /// order of their first chain.
    pub fn positions(&self, multimers: bool) -> Vec<Position> {
        if !multimers {
            return self.residues.iter().cloned().map(Position::single).collect();
        }

        let mut groups: Vec<(Vec<(isize, Option<char>, char)>, Vec<char>)> = Vec::new();
        for chain in self.chains() {
            let signature: Vec<_> = self
                .residues_of(chain)
                .map(|r| (r.number, r.insertion_code, r.one_letter))
                .collect();
            match groups.iter_mut().find(|(sig, _)| *sig == signature) {
                Some((_, members)) => members.push(chain),
                None => groups.push((signature, vec![chain])),
            }
        }

        let mut positions = Vec::new();
        for (_, members) in &groups {
            debug!(chains = ?members, "Grouped identical chains into multimer positions.");
            let per_chain: Vec<Vec<&Residue>> = members
                .iter()
                .map(|&c| self.residues_of(c).collect())
                .collect();
            for i in 0..per_chain[0].len() {
                let residues = per_chain.iter().map(|chain| chain[i].clone()).collect();
                if let Some(position) = Position::new(residues) {
                    positions.push(position);
                }
            }
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(id: char, start: isize, seq: &str) -> Vec<Residue> {
        seq.chars()
            .enumerate()
            .map(|(i, c)| Residue::new(id, start + i as isize, None, "XXX", c))
            .collect()
    }

    fn structure(chains: Vec<Vec<Residue>>) -> Structure {
        Structure::new(chains.into_iter().flatten().collect())
    }

    #[test]
    fn chains_are_listed_in_order_of_appearance() {
        let s = structure(vec![chain('B', 1, "MK"), chain('A', 1, "MK")]);
        assert_eq!(s.chains(), vec!['B', 'A']);
    }

    #[test]
    fn sequence_of_returns_one_letter_codes_of_chain() {
        let s = structure(vec![chain('A', 1, "MKV"), chain('B', 1, "GG")]);
        assert_eq!(s.sequence_of('A'), "MKV");
        assert_eq!(s.sequence_of('B'), "GG");
        assert_eq!(s.sequence_of('C'), "");
    }

    #[test]
    fn positions_without_multimers_are_one_per_residue() {
        let s = structure(vec![chain('A', 1, "MK"), chain('B', 1, "MK")]);
        let labels: Vec<_> = s.positions(false).iter().map(Position::label).collect();
        assert_eq!(labels, vec!["MA1", "KA2", "MB1", "KB2"]);
    }

    #[test]
    fn positions_with_multimers_group_identical_chains() {
        let s = structure(vec![
            chain('A', 1, "MK"),
            chain('B', 1, "MK"),
            chain('C', 1, "GW"),
        ]);
        let labels: Vec<_> = s.positions(true).iter().map(Position::label).collect();
        assert_eq!(labels, vec!["MA1_MB1", "KA2_KB2", "GC1", "WC2"]);
    }

    #[test]
    fn chains_with_different_numbering_are_not_grouped() {
        let s = structure(vec![chain('A', 1, "MK"), chain('B', 10, "MK")]);
        let labels: Vec<_> = s.positions(true).iter().map(Position::label).collect();
        assert_eq!(labels, vec!["MA1", "KA2", "MB10", "KB11"]);
    }

    #[test]
    fn find_locates_residue_by_key() {
        let s = structure(vec![chain('A', 5, "MKV")]);
        let found = s.find(&ResidueKey::new('A', 6, None)).unwrap();
        assert_eq!(found.one_letter, 'K');
        assert!(s.find(&ResidueKey::new('A', 6, Some('B'))).is_none());
    }
}
