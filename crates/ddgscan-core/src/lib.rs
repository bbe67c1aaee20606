//! # ddgscan Core Library
//!
//! Post-processing toolkit for MutateX saturation mutagenesis scans. It turns a protein
//! structure plus a directory of per-position DDG files into figures and tables.
//!
//! ## Architectural Philosophy
//!
//! The library is split into layers with a strict dependency direction:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Residue`, `Position`),
//!   file I/O (PDB, DDG files, mutation lists, delimited tables), the residue selection and
//!   mutation parsers, and the statistics used by the figures (descriptive statistics,
//!   kernel density estimation, histograms).
//!
//! - **[`analysis`]: The Data Layer.** Loads a scan into a `DdgDataset`, derives per-position
//!   summaries, and holds the configuration types and progress reporting shared by all tools.
//!
//! - **[`render`]: Figures.** SVG output for heatmaps, bar charts, density curves and box plots.
//!
//! - **[`workflows`]: The Public API.** One entry point per tool. Each workflow takes a
//!   configuration, loads what it needs, and writes its outputs.

pub mod analysis;
pub mod core;
pub mod render;
pub mod workflows;
