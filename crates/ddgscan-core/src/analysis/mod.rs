//! # Analysis Module
//!
//! Turns the raw files of a scan into data the tools can work with.
//!
//! - **Dataset** ([`dataset`]) - `DdgDataset`: positions, mutation list and DDG values loaded together
//! - **Summaries** ([`summary`]) - Per-position statistics and stabilizing/destabilizing counts
//! - **Configuration** ([`config`]) - Input and per-tool settings, with a builder for the shared input part
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for multi-file outputs
//! - **Error Handling** ([`error`]) - The error type every workflow returns

pub mod config;
pub mod dataset;
pub mod error;
pub mod progress;
pub mod summary;
