//! Core data structures flowing through the analysis.
//!
//! - [`site`] – The five fixed antigenic sites and their residue lists.
//! - [`structure`] – Flat atom/coordinate view of a loaded structure and the
//!   record that ties it to its source file.
//! - [`deviation`] – Raw per-site deviations and the rows that end up in the
//!   report.

pub mod deviation;
pub mod site;
pub mod structure;
