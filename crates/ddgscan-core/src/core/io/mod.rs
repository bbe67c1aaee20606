//! Provides input/output functionality for the files a MutateX scan produces and consumes.
//!
//! Structure files are handled through the [`traits::StructureFile`] interface, with a PDB
//! implementation that can also write per-residue values into the b-factor column. DDG data
//! files and mutation lists are read by [`ddg`], and derived tables are written by [`table`].

pub mod ddg;
pub mod pdb;
pub mod table;
pub mod traits;
