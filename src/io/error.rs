use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("underlying bio-forge I/O error: {0}")]
    BioForgeIo(String),

    #[error("coordinate record on line {line} is not fixed-column ASCII")]
    MalformedRecord { line: usize },

    #[error("structure contains no atom records")]
    EmptyStructure,

    #[error("failed to write spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to write CSV data: {0}")]
    Csv(#[from] csv::Error),
}

impl From<bio_forge::io::Error> for Error {
    fn from(e: bio_forge::io::Error) -> Self {
        Error::BioForgeIo(e.to_string())
    }
}
