use std::io::{self, Write};

use anyhow::{Context, Result, bail};

use antigen_rmsd::{ReportFormat, ReportOutcome, analyze, export};

use crate::cli::{self, Cli, OutputOptions};
use crate::config::{build_align_config, build_batch_config};
use crate::display::{Context as DisplayContext, Progress, print_run_summary, print_site_breakdown};
use crate::io::infer_report_format;

pub fn run(cli: Cli, ctx: DisplayContext) -> Result<()> {
    let format = resolve_report_format(&cli.output)?;
    let align = build_align_config(&cli.align)?;
    let batch = build_batch_config(&cli)?;

    let mut progress = Progress::new(ctx);
    let summary = analyze(&cli.pdb_dir, &cli.ref_pdb, align, &batch, &mut progress)
        .context("Antigenic site analysis failed")?;
    progress.finish(&summary);

    if ctx.interactive {
        print_run_summary(&summary, batch.threshold);
        print_site_breakdown(&summary.results);
    }

    let outcome = export(&summary, &cli.output.path, format)?;

    let mut stdout = io::stdout().lock();
    match outcome {
        ReportOutcome::Written { rows, path } => writeln!(
            stdout,
            "Analysis complete: {rows} record(s) written to '{}'.",
            path.display()
        )?,
        ReportOutcome::NoQualifyingResults => writeln!(
            stdout,
            "Analysis complete: no antigenic site RMSD exceeded the threshold."
        )?,
    }

    Ok(())
}

fn resolve_report_format(output: &OutputOptions) -> Result<ReportFormat> {
    if let Some(format) = output.format {
        return Ok(match format {
            cli::ReportFormat::Xlsx => ReportFormat::Xlsx,
            cli::ReportFormat::Csv => ReportFormat::Csv,
        });
    }

    match infer_report_format(&output.path) {
        Some(format) => Ok(format),
        None => bail!(
            "Cannot infer report format from extension of '{}'. Use --format to specify.",
            output.path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn output(args: &[&str]) -> OutputOptions {
        let mut argv = vec!["agrmsd", "dir", "ref.pdb"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().output
    }

    #[test]
    fn default_output_is_xlsx() {
        assert_eq!(resolve_report_format(&output(&[])).unwrap(), ReportFormat::Xlsx);
    }

    #[test]
    fn explicit_format_overrides_extension() {
        let opts = output(&["-o", "report.dat", "--format", "csv"]);
        assert_eq!(resolve_report_format(&opts).unwrap(), ReportFormat::Csv);
    }

    #[test]
    fn unknown_extension_without_format_fails() {
        assert!(resolve_report_format(&output(&["-o", "report.dat"])).is_err());
    }
}
