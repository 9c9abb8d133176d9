//! Rastro - bug-introducing-commit dataset builder
//!
//! This library correlates bug-tracker fix records with the commits that
//! introduced and fixed them, across the Mercurial and Git identifier
//! spaces, and emits a labeled dataset for downstream classifier
//! training.

pub mod cli;
pub mod commit_index;
pub mod composer;
pub mod corpus;
pub mod csv_output;
pub mod json_output;
pub mod models;
pub mod selector;
pub mod stats;
pub mod vcs_map;
