use std::io::{self, Write};

use anyhow::Error;

use antigen_rmsd::io::{Error as IoError, InputError};
use antigen_rmsd::{AnalysisError, ProcessingCause};

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    let hints = hints_for(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn hints_for(err: &Error) -> Vec<String> {
    let mut hints = Hints::default();

    if let Some(analysis) = err.downcast_ref::<AnalysisError>() {
        hints.analysis(analysis);
    } else if let Some(input) = err.downcast_ref::<InputError>() {
        hints.input(input);
    } else {
        hints.fallback(err);
    }

    hints.0
}

#[derive(Default)]
struct Hints(Vec<String>);

impl Hints {
    fn add(&mut self, hint: impl Into<String>) {
        self.0.push(hint.into());
    }

    fn analysis(&mut self, err: &AnalysisError) {
        match err {
            AnalysisError::Input(input) => self.input(input),

            AnalysisError::Reference { source, .. } => {
                self.add("The reference structure must be a readable PDB file");
                self.structure_io(source);
            }

            AnalysisError::Processing(processing) => {
                self.add("Aborted because --fail-fast is set");
                self.add("Run without --fail-fast to skip samples that cannot be processed");
                self.processing(&processing.cause);
            }

            AnalysisError::Report { source, .. } => {
                self.add("The report could not be written");
                self.structure_io(source);
            }
        }
    }

    fn input(&mut self, err: &InputError) {
        match err {
            InputError::InvalidDirectory(_) => {
                self.add("PDB_DIR must be an existing directory");
                self.add("Check the path spelling");
            }

            InputError::MissingReference(_) => {
                self.add("REF_PDB must be an existing regular file");
                self.add("The reference may live inside PDB_DIR; it is not processed as a sample");
            }

            InputError::ListDirectory { source, .. } => self.std_io(source),
        }
    }

    fn processing(&mut self, cause: &ProcessingCause) {
        match cause {
            ProcessingCause::Load(source) => self.structure_io(source),

            ProcessingCause::TooFewPairs { .. } => {
                self.add("Sample and reference share almost no atoms");
                self.add("Atoms are matched by chain, residue number, insertion code and atom name");
                self.add("Check that both files use the same chain IDs and numbering");
            }

            ProcessingCause::DegenerateFit => {
                self.add("The matched atoms may be collinear or coincident");
            }

            ProcessingCause::EmptySelection(site) => {
                self.add(format!(
                    "No residue of site {site} was found in both structures"
                ));
                self.add("Check that the structures use H3 hemagglutinin numbering");
            }

            ProcessingCause::NoSample => {}
        }
    }

    fn structure_io(&mut self, err: &IoError) {
        match err {
            IoError::Io { source } => self.std_io(source),

            IoError::BioForgeIo(msg) => {
                self.add("The file could not be parsed as PDB");
                let msg = msg.to_lowercase();
                if msg.contains("residue") || msg.contains("template") {
                    self.add("ATOM records must use standard residue names");
                    self.add("Write non-standard residues and ligands as HETATM records");
                } else {
                    self.add("Check ATOM/HETATM record formatting (columns 1-80)");
                }
            }

            IoError::MalformedRecord { line } => {
                self.add(format!(
                    "Line {line} contains non-ASCII characters inside a coordinate record"
                ));
                self.add("Check the file encoding or regenerate it from the source program");
            }

            IoError::EmptyStructure => {
                self.add("The file contains no ATOM or HETATM records");
            }

            IoError::Spreadsheet(_) | IoError::Csv(_) => {
                self.add("Check that the output directory exists and is writable");
                self.add("Close the report if it is open in a spreadsheet program");
            }
        }
    }

    fn std_io(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData | ErrorKind::UnexpectedEof => {
                self.add("File contains invalid or truncated data");
            }

            ErrorKind::WriteZero => {
                self.add("Failed to write data (disk full?)");
            }

            _ => {
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn fallback(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("--format") || msg.contains("extension") {
            self.add("Supported report formats: xlsx, csv");
            self.add("Use an .xlsx or .csv output path, or pass --format");
        } else if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn reference_error(source: IoError) -> Error {
        Error::new(AnalysisError::Reference {
            path: PathBuf::from("ref.pdb"),
            source,
        })
        .context("Antigenic site analysis failed")
    }

    #[test]
    fn unknown_residue_suggests_hetatm() {
        let err = reference_error(IoError::BioForgeIo(
            "unknown standard residue 'MSE' at chain A, residue 12".to_string(),
        ));
        let hints = hints_for(&err);
        assert!(hints.iter().any(|h| h.contains("HETATM")), "{hints:?}");
    }

    #[test]
    fn malformed_record_names_the_line() {
        let err = reference_error(IoError::MalformedRecord { line: 42 });
        let hints = hints_for(&err);
        assert!(hints.iter().any(|h| h.contains("Line 42")), "{hints:?}");
    }

    #[test]
    fn unknown_report_extension_lists_formats() {
        let err = anyhow::anyhow!("Cannot infer report format from extension of 'out.dat'");
        assert!(hints_for(&err).iter().any(|h| h.contains("xlsx, csv")));
    }
}
