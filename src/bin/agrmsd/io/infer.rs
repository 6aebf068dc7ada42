use std::path::Path;

use antigen_rmsd::ReportFormat;

pub fn report(path: &Path) -> Option<ReportFormat> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "xlsx" => Some(ReportFormat::Xlsx),
        "csv" => Some(ReportFormat::Csv),
        _ => None,
    }
}
