use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::io;
use crate::model::site::AntigenSite;

/// A sample that could not be measured.
#[derive(Debug, Error)]
#[error("failed to process sample '{}'", .file.display())]
pub struct ProcessingError {
    pub file: PathBuf,
    #[source]
    pub cause: ProcessingCause,
}

impl ProcessingError {
    pub fn new(file: impl AsRef<Path>, cause: ProcessingCause) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            cause,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProcessingCause {
    #[error("could not load structure: {0}")]
    Load(#[from] io::Error),

    #[error(
        "only {found} atom pair(s) matched the reference; superposition needs at least {}",
        super::superpose::MIN_FIT_PAIRS
    )]
    TooFewPairs { found: usize },

    #[error("superposition did not converge")]
    DegenerateFit,

    #[error("no atoms of antigenic site {0} matched between sample and reference")]
    EmptySelection(AntigenSite),

    #[error("no sample structure is loaded")]
    NoSample,
}
