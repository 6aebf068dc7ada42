use super::site::AntigenSite;

/// Raw per-site deviation produced by the engine for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteDeviation {
    pub site: AntigenSite,
    pub rmsd: f64,
    /// Number of atom pairs the RMSD was computed over.
    pub pairs: usize,
}

/// A reported row: one sample, one site, deviation above the threshold.
///
/// `value` is already rounded to three decimal places.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviationResult {
    pub source_file: String,
    pub site: AntigenSite,
    pub value: f64,
}
