use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format as CellFormat, Workbook};

use super::ReportFormat;
use crate::io::error::Error;
use crate::model::deviation::DeviationResult;

/// Report column headers, in output order: source file, antigenic site,
/// rounded RMSD.
pub const COLUMNS: [&str; 3] = ["PDB文件", "抗原位点", "RMSD值"];

pub const SHEET_NAME: &str = "Sheet1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Written { rows: usize, path: PathBuf },
    /// Nothing exceeded the threshold; no file was touched.
    NoQualifyingResults,
}

/// Writes `results` to `path`, replacing any existing file.
///
/// An empty result set performs no write at all.
pub fn write_report(
    results: &[DeviationResult],
    path: &Path,
    format: ReportFormat,
) -> Result<ReportOutcome, Error> {
    if results.is_empty() {
        return Ok(ReportOutcome::NoQualifyingResults);
    }

    match format {
        ReportFormat::Xlsx => write_xlsx(results, path)?,
        ReportFormat::Csv => write_csv(results, path)?,
    }

    Ok(ReportOutcome::Written {
        rows: results.len(),
        path: path.to_path_buf(),
    })
}

fn write_xlsx(results: &[DeviationResult], path: &Path) -> Result<(), Error> {
    let mut workbook = Workbook::new();
    let header = CellFormat::new().set_bold();
    let value = CellFormat::new().set_num_format("0.000");

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (i, row) in results.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, &row.source_file)?;
        sheet.write_string(r, 1, row.site.label())?;
        sheet.write_number_with_format(r, 2, row.value, &value)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_csv(results: &[DeviationResult], path: &Path) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    writer.write_record(COLUMNS)?;
    for row in results {
        let value = format!("{:.3}", row.value);
        writer.write_record([row.source_file.as_str(), row.site.label(), value.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::site::AntigenSite;

    fn rows() -> Vec<DeviationResult> {
        vec![
            DeviationResult {
                source_file: "a.pdb".into(),
                site: AntigenSite::Sb,
                value: 0.25,
            },
            DeviationResult {
                source_file: "b.pdb".into(),
                site: AntigenSite::Cb,
                value: 1.062,
            },
        ]
    }

    #[test]
    fn empty_results_touch_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        std::fs::write(&path, b"previous run").unwrap();

        let outcome = write_report(&[], &path, ReportFormat::Xlsx).unwrap();

        assert_eq!(outcome, ReportOutcome::NoQualifyingResults);
        assert_eq!(std::fs::read(&path).unwrap(), b"previous run");
    }

    #[test]
    fn empty_results_create_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_report(&[], &path, ReportFormat::Csv).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn csv_has_header_and_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let outcome = write_report(&rows(), &path, ReportFormat::Csv).unwrap();
        assert_eq!(
            outcome,
            ReportOutcome::Written {
                rows: 2,
                path: path.clone()
            }
        );

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["PDB文件,抗原位点,RMSD值", "a.pdb,Sb,0.250", "b.pdb,Cb,1.062"]);
    }

    #[test]
    fn xlsx_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        std::fs::write(&path, b"stale").unwrap();

        write_report(&rows(), &path, ReportFormat::Xlsx).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"), "xlsx is a zip container");
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");

        let err = write_report(&rows(), &path, ReportFormat::Csv).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
