use std::fmt;

/// Identity of a residue inside a structure file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub chain: char,
    pub number: isize,
    pub insertion_code: Option<char>,
}

impl ResidueKey {
    pub fn new(chain: char, number: isize, insertion_code: Option<char>) -> Self {
        Self {
            chain,
            number,
            insertion_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub chain: char,                 // Chain identifier (e.g., 'A', 'B')
    pub number: isize,               // Residue sequence number from source file
    pub insertion_code: Option<char>, // PDB insertion code, if any
    pub name: String,                // Residue name as written in the file (e.g., "ALA", "HIE")
    pub one_letter: char,            // Wild-type one-letter code
    /// Per-residue value written into the b-factor column when the structure is saved.
    pub annotation: Option<f64>,
}

impl Residue {
    pub fn new(
        chain: char,
        number: isize,
        insertion_code: Option<char>,
        name: &str,
        one_letter: char,
    ) -> Self {
        Self {
            chain,
            number,
            insertion_code,
            name: name.to_string(),
            one_letter,
            annotation: None,
        }
    }

    pub fn key(&self) -> ResidueKey {
        ResidueKey::new(self.chain, self.number, self.insertion_code)
    }

    /// MutateX residue label: wild type, chain, number and insertion code (e.g. `MA1`).
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.one_letter, self.chain, self.number)?;
        if let Some(code) = self.insertion_code {
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}
