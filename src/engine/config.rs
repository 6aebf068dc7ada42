/// Settings of the global superposition.
///
/// The defaults reproduce the outlier-rejection behaviour of PyMOL's `align`:
/// five refinement cycles, rejecting pairs that deviate by more than twice
/// the current RMSD.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignConfig {
    /// Maximum number of outlier-rejection cycles; `0` fits once.
    pub cycles: u32,
    /// Rejection threshold in units of the current RMSD.
    pub cutoff: f64,
    /// Whether hydrogens take part in the global fit. Per-site RMSD always
    /// includes every paired atom of the site.
    pub include_hydrogens: bool,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            cycles: 5,
            cutoff: 2.0,
            include_hydrogens: false,
        }
    }
}
