//! File I/O: locating sample structures, reading PDB coordinates and writing
//! the deviation report.

use std::fmt;

pub mod error;
pub mod pdb;
pub mod report;
pub mod resolve;

pub use error::Error;
pub use pdb::{read_structure, read_structure_file};
pub use report::{COLUMNS, ReportOutcome, write_report};
pub use resolve::{InputError, resolve};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Xlsx => write!(f, "XLSX"),
            ReportFormat::Csv => write!(f, "CSV"),
        }
    }
}
