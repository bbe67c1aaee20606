use phf::{Map, phf_map};

static THREE_TO_ONE: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
    // Protonation and disulfide variants
    "HIE" => 'H', "HID" => 'H', "HIP" => 'H', "HSE" => 'H', "HSD" => 'H', "HSP" => 'H',
    "CYX" => 'C', "CYM" => 'C', "LYN" => 'K', "ASH" => 'D', "GLH" => 'E',
    // Phosphorylated residues
    "SEP" => 's', "TPO" => 'p', "PTR" => 'y',
};

static ONE_TO_THREE: Map<char, &'static str> = phf_map! {
    'A' => "ALA", 'R' => "ARG", 'N' => "ASN", 'D' => "ASP", 'C' => "CYS",
    'Q' => "GLN", 'E' => "GLU", 'G' => "GLY", 'H' => "HIS", 'I' => "ILE",
    'L' => "LEU", 'K' => "LYS", 'M' => "MET", 'F' => "PHE", 'P' => "PRO",
    'S' => "SER", 'T' => "THR", 'W' => "TRP", 'Y' => "TYR", 'V' => "VAL",
    's' => "SEP", 'p' => "TPO", 'y' => "PTR",
};

/// Maps a residue name from a structure file to its one-letter code.
///
/// Lookup is case-insensitive and ignores surrounding whitespace. Phosphorylated
/// residues map to lowercase codes, following the MutateX convention.
pub fn three_to_one(name: &str) -> Option<char> {
    THREE_TO_ONE
        .get(name.trim().to_ascii_uppercase().as_str())
        .copied()
}

/// Maps a one-letter code back to its canonical three-letter residue name.
pub fn one_to_three(code: char) -> Option<&'static str> {
    ONE_TO_THREE.get(&code).copied()
}

/// Returns `true` if `code` is a residue type a mutation list may contain.
pub fn is_known_code(code: char) -> bool {
    ONE_TO_THREE.contains_key(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_to_one_maps_standard_residues() {
        assert_eq!(three_to_one("ALA"), Some('A'));
        assert_eq!(three_to_one("TRP"), Some('W'));
        assert_eq!(three_to_one("GLY"), Some('G'));
    }

    #[test]
    fn three_to_one_trims_and_ignores_case() {
        assert_eq!(three_to_one(" met "), Some('M'));
        assert_eq!(three_to_one("Lys"), Some('K'));
    }

    #[test]
    fn three_to_one_maps_variants_to_parent_residue() {
        assert_eq!(three_to_one("HIE"), Some('H'));
        assert_eq!(three_to_one("HSP"), Some('H'));
        assert_eq!(three_to_one("CYX"), Some('C'));
        assert_eq!(three_to_one("GLH"), Some('E'));
    }

    #[test]
    fn three_to_one_uses_lowercase_for_phosphorylated_residues() {
        assert_eq!(three_to_one("SEP"), Some('s'));
        assert_eq!(three_to_one("TPO"), Some('p'));
        assert_eq!(three_to_one("PTR"), Some('y'));
    }

    #[test]
    fn three_to_one_returns_none_for_ligands_and_water() {
        assert_eq!(three_to_one("HOH"), None);
        assert_eq!(three_to_one("HEM"), None);
        assert_eq!(three_to_one(""), None);
    }

    #[test]
    fn one_to_three_is_case_sensitive() {
        assert_eq!(one_to_three('S'), Some("SER"));
        assert_eq!(one_to_three('s'), Some("SEP"));
        assert_eq!(one_to_three('X'), None);
    }

    #[test]
    fn is_known_code_accepts_standard_and_modified_codes() {
        assert!(is_known_code('A'));
        assert!(is_known_code('y'));
        assert!(!is_known_code('B'));
        assert!(!is_known_code('a'));
    }
}
