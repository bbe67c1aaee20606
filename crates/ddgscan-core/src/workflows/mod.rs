//! # Workflows Module
//!
//! One entry point per tool. Each workflow takes its configuration from
//! [`analysis::config`](crate::analysis::config), loads the structure, mutation list and
//! DDG files it needs, applies the residue selection and writes its outputs.
//!
//! - **Labels** ([`labels`]) - Position labels of a structure
//! - **Heatmap** ([`heatmap`]) - Positions against mutation types, coloured by DDG
//! - **Histograms** ([`histo`]) - One bar chart of all mutations per position
//! - **Scans** ([`alascan`]) - One mutation type (alanine by default) across positions
//! - **Density** ([`density`]) - KDE or histogram of each position's DDGs
//! - **Distribution** ([`distribution`]) - Box plots per position
//! - **Summary** ([`summary`]) - Per-position statistics and stability counts
//! - **Table** ([`table`]) - The DDG matrix as CSV
//! - **Structures** ([`pdb`]) - DDG values written to the b-factor column
//! - **Mutations** ([`mutations`]) - DDGs of a list of specific mutations
//!
//! Workflows that write several files report progress through a
//! [`ProgressReporter`](crate::analysis::progress::ProgressReporter).

pub mod alascan;
pub mod density;
pub mod distribution;
pub mod heatmap;
pub mod histo;
pub mod labels;
mod loader;
pub mod mutations;
pub mod pdb;
pub mod summary;
pub mod table;
