use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, ValueEnum};

#[derive(Parser)]
#[command(
    name = "agrmsd",
    about = "Antigenic site RMSD analysis of hemagglutinin structures",
    long_about = "Superposes every PDB file in PDB_DIR onto REF_PDB, computes the RMSD over the \
                  residues of the antigenic sites Sa, Sb, Ca1, Ca2 and Cb, and exports every \
                  site deviation above the threshold to a spreadsheet.",
    version,
    author,
    before_help = crate::display::banner_for_help()
)]
pub struct Cli {
    /// Directory containing the sample PDB files
    #[arg(value_name = "PDB_DIR")]
    pub pdb_dir: PathBuf,

    /// Reference PDB file every sample is aligned to
    #[arg(value_name = "REF_PDB")]
    pub ref_pdb: PathBuf,

    /// Report only site RMSDs strictly greater than this value (Å)
    #[arg(
        long,
        value_name = "Å",
        default_value = "0.1",
        allow_hyphen_values = true
    )]
    pub threshold: f64,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub align: AlignOptions,

    #[command(flatten)]
    pub batch: BatchOptions,
}

#[derive(Args)]
#[command(next_help_heading = "Output")]
pub struct OutputOptions {
    /// Report file, overwritten if it exists
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = "RMSD_analysis_results.xlsx"
    )]
    pub path: PathBuf,

    /// Report format (inferred from the extension if not specified)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
#[command(next_help_heading = "Superposition")]
pub struct AlignOptions {
    /// Outlier rejection cycles after the initial fit (0 disables rejection)
    #[arg(long, value_name = "N", default_value = "5")]
    pub cycles: u32,

    /// Reject atom pairs deviating by more than this many RMSDs
    #[arg(long, value_name = "σ", default_value = "2.0")]
    pub cutoff: f64,

    /// Include hydrogens in the global fit
    #[arg(long)]
    pub include_hydrogens: bool,
}

#[derive(Args)]
#[command(next_help_heading = "Batch")]
pub struct BatchOptions {
    /// Abort on the first sample that cannot be processed
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress banner, progress and tables (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v: info, -vv: debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    /// Excel workbook
    Xlsx,
    /// Comma-separated values
    Csv,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_interface() {
        let cli = Cli::try_parse_from(["agrmsd", "models", "models/ref.pdb"]).unwrap();

        assert_eq!(cli.pdb_dir, PathBuf::from("models"));
        assert_eq!(cli.ref_pdb, PathBuf::from("models/ref.pdb"));
        assert_eq!(cli.threshold, 0.1);
        assert_eq!(cli.output.path, PathBuf::from("RMSD_analysis_results.xlsx"));
        assert!(cli.output.format.is_none());
        assert_eq!(cli.align.cycles, 5);
        assert_eq!(cli.align.cutoff, 2.0);
        assert!(!cli.batch.fail_fast);
        assert_eq!(cli.batch.verbose, 0);
    }

    #[test]
    fn parses_explicit_options() {
        let cli = Cli::try_parse_from([
            "agrmsd",
            "dir",
            "ref.pdb",
            "--threshold",
            "0.25",
            "-o",
            "out.csv",
            "--cycles",
            "0",
            "--fail-fast",
            "-qvv",
        ])
        .unwrap();

        assert_eq!(cli.threshold, 0.25);
        assert_eq!(cli.output.path, PathBuf::from("out.csv"));
        assert_eq!(cli.align.cycles, 0);
        assert!(cli.batch.fail_fast);
        assert!(cli.batch.quiet);
        assert_eq!(cli.batch.verbose, 2);
    }

    #[test]
    fn requires_both_positionals() {
        assert!(Cli::try_parse_from(["agrmsd", "dir"]).is_err());
    }
}
