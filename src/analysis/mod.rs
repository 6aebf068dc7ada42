//! The batch workflow: resolve samples, measure each against the reference,
//! keep deviations above the threshold and export them.
//!
//! Samples are processed strictly one after another, each to completion,
//! in resolved (path) order. Rows therefore come out ordered by file, then by
//! site in [`AntigenSite::ALL`] order.
//!
//! [`AntigenSite::ALL`]: crate::AntigenSite::ALL

mod error;
pub mod filter;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub use error::Error;
pub use filter::{collect, round_value};

use crate::engine::{AlignConfig, DeviationEngine, ProcessingError, Session};
use crate::io::{self, ReportFormat, ReportOutcome, write_report};
use crate::model::deviation::DeviationResult;
use crate::model::structure::display_name;

pub const DEFAULT_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Exclusive lower bound on reported deviations (Å).
    pub threshold: f64,
    /// Abort on the first sample that cannot be processed instead of
    /// skipping it.
    pub fail_fast: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fail_fast: false,
        }
    }
}

/// Receives progress notifications while a batch runs.
pub trait BatchObserver {
    fn sample_started(&mut self, _index: usize, _total: usize, _path: &Path) {}

    fn sample_finished(&mut self, _path: &Path, _reported: usize) {}

    fn sample_skipped(&mut self, _error: &ProcessingError) {}
}

impl BatchObserver for () {}

#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Rows above the threshold, in file order then site order.
    pub results: Vec<DeviationResult>,
    /// Samples measured successfully.
    pub processed: usize,
    /// Samples that failed and were left out of the results.
    pub skipped: Vec<ProcessingError>,
}

/// Measures every sample with `engine` and keeps deviations above the
/// threshold.
pub fn run_batch<E, O>(
    engine: &mut E,
    samples: &[PathBuf],
    config: &BatchConfig,
    observer: &mut O,
) -> Result<BatchSummary, Error>
where
    E: DeviationEngine,
    O: BatchObserver + ?Sized,
{
    let mut summary = BatchSummary::default();
    let total = samples.len();

    for (index, path) in samples.iter().enumerate() {
        observer.sample_started(index, total, path);

        let deviations = match engine.measure(path) {
            Ok(deviations) => deviations,
            Err(err) if config.fail_fast => return Err(err.into()),
            Err(err) => {
                warn!(file = %path.display(), cause = %err.cause, "skipping sample");
                observer.sample_skipped(&err);
                summary.skipped.push(err);
                continue;
            }
        };

        let file = display_name(path);
        let before = summary.results.len();
        summary.results.extend(
            deviations
                .iter()
                .filter_map(|d| collect(&file, d.site, d.rmsd, config.threshold)),
        );

        summary.processed += 1;
        observer.sample_finished(path, summary.results.len() - before);
    }

    Ok(summary)
}

/// Runs a full batch: validates inputs, loads the reference once and
/// measures every sample in `pdb_dir`.
pub fn analyze<O>(
    pdb_dir: &Path,
    ref_pdb: &Path,
    align: AlignConfig,
    config: &BatchConfig,
    observer: &mut O,
) -> Result<BatchSummary, Error>
where
    O: BatchObserver + ?Sized,
{
    let samples = io::resolve(pdb_dir, ref_pdb)?;

    let mut session = Session::open(ref_pdb, align).map_err(|source| Error::Reference {
        path: ref_pdb.to_path_buf(),
        source,
    })?;

    info!(
        samples = samples.len(),
        threshold = config.threshold,
        "starting antigenic site analysis"
    );

    let summary = run_batch(&mut session, &samples, config, observer)?;

    info!(
        processed = summary.processed,
        skipped = summary.skipped.len(),
        rows = summary.results.len(),
        "analysis finished"
    );

    Ok(summary)
}

/// Writes the rows of `summary` to `path`. Nothing is written when there
/// are no rows.
pub fn export(
    summary: &BatchSummary,
    path: &Path,
    format: ReportFormat,
) -> Result<ReportOutcome, Error> {
    write_report(&summary.results, path, format).map_err(|source| Error::Report {
        path: path.to_path_buf(),
        source,
    })
}
