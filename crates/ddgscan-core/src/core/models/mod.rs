//! # Core Models Module
//!
//! Data structures describing what a MutateX scan was run on: the residues of a
//! protein structure and the positions the DDG data is keyed on.
//!
//! ## Key Components
//!
//! - [`residue`] - A single residue with its chain, number, insertion code and wild-type code
//! - [`structure`] - The ordered residues of a structure, chain queries and position enumeration
//! - [`position`] - One DDG data unit: a residue, or the equivalent residues of a homo-multimer
//!
//! ## Usage
//!
//! ```ignore
//! use ddgscan::core::io::{pdb::PdbFile, traits::StructureFile};
//!
//! let (structure, _) = PdbFile::read_from_path("protein.pdb")?;
//! for position in structure.positions(true) {
//!     println!("{}", position.label());
//! }
//! ```

pub mod position;
pub mod residue;
pub mod structure;
