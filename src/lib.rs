//! Batch measurement of localized structural deviation at the antigenic sites
//! of influenza hemagglutinin.
//!
//! Every sample structure in a directory is superposed onto a fixed reference
//! structure. The RMSD is then taken separately over the residues of the five
//! classical antigenic sites. Sites whose deviation exceeds a threshold are
//! collected and exported as a spreadsheet.
//!
//! # Features
//!
//! - **Global fit, local metric**: each sample is fitted once on all
//!   matching heavy atoms (Kabsch, with iterative outlier rejection). Site
//!   RMSDs are read in that frame without refitting, so a shifted loop stays
//!   visible.
//! - **Deterministic batches**: samples are processed in path order and rows
//!   come out ordered by file, then by site.
//! - **Isolated failures**: a malformed sample is logged and skipped and the
//!   rest of the batch still runs. Fail-fast mode is available.
//! - **Spreadsheet export**: XLSX (or CSV), with fixed column names and
//!   values rounded to three decimals.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use antigen_rmsd::{AlignConfig, BatchConfig, ReportFormat, ReportOutcome};
//!
//! let summary = antigen_rmsd::analyze(
//!     Path::new("models/"),
//!     Path::new("models/reference.pdb"),
//!     AlignConfig::default(),
//!     &BatchConfig { threshold: 0.1, fail_fast: false },
//!     &mut (),
//! )?;
//!
//! for row in &summary.results {
//!     println!("{} {} {:.3}", row.source_file, row.site, row.value);
//! }
//!
//! match antigen_rmsd::export(&summary, Path::new("sites.xlsx"), ReportFormat::Xlsx)? {
//!     ReportOutcome::Written { rows, .. } => println!("{rows} rows written"),
//!     ReportOutcome::NoQualifyingResults => println!("nothing above threshold"),
//! }
//! # Ok::<(), antigen_rmsd::AnalysisError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`]: locating samples, reading PDB files, writing reports
//! - [`engine`]: the reference/sample [`Session`] and the superposition
//! - [`analysis`]: the batch driver and the threshold filter
//!
//! # Data Types
//!
//! - [`AntigenSite`]: Sa, Sb, Ca1, Ca2 and Cb, each with its residue list
//! - [`Structure`] / [`StructureRecord`]: coordinates of a loaded structure
//! - [`SiteDeviation`]: raw per-site RMSD of one sample
//! - [`DeviationResult`]: a reported row (file, site, rounded value)

mod model;

pub mod analysis;
pub mod engine;
pub mod io;

pub use model::deviation::{DeviationResult, SiteDeviation};
pub use model::site::AntigenSite;
pub use model::structure::{AtomKey, Structure, StructureAtom, StructureRecord, display_name};

pub use analysis::{
    BatchConfig, BatchObserver, BatchSummary, DEFAULT_THRESHOLD, analyze, export, run_batch,
};
pub use engine::{AlignConfig, DeviationEngine, ProcessingCause, ProcessingError, Session};
pub use io::{ReportFormat, ReportOutcome};

pub use analysis::Error as AnalysisError;
