use std::path::PathBuf;

use thiserror::Error;

use crate::engine::ProcessingError;
use crate::io::{self, InputError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("failed to load reference structure '{}'", .path.display())]
    Reference {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error("failed to write report to '{}'", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
