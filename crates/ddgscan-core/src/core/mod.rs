//! # Core Module
//!
//! Data models, file formats, parsers and statistics that every tool builds on.
//!
//! - **Structure Representation** ([`models`]) - Residues, structures and DDG positions
//! - **File I/O** ([`io`]) - PDB reading and b-factor writing, MutateX DDG files, mutation lists, CSV/TSV tables
//! - **Parsing Utilities** ([`utils`]) - Residue code tables, the residue selection language and the mutation matcher
//! - **Statistics** ([`stats`]) - Descriptive statistics, Gaussian KDE and histograms

pub mod io;
pub mod models;
pub mod stats;
pub mod utils;
