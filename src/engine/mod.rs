//! Alignment and per-site deviation measurement.
//!
//! A [`Session`] owns exactly two structure slots: the reference, loaded once
//! and never modified, and a reusable sample slot that holds one structure at
//! a time. Measuring a sample loads it into the slot, superposes it onto the
//! reference, takes the RMSD of every [`AntigenSite`] in the superposed frame
//! and empties the slot again.
//!
//! The batch driver only sees the [`DeviationEngine`] trait, so the
//! structural toolkit stays behind a single seam.

mod config;
mod error;
pub mod superpose;

use std::path::Path;

use tracing::debug;

pub use config::AlignConfig;
pub use error::{ProcessingCause, ProcessingError};
pub use superpose::Superposition;

use crate::io::{self, read_structure_file};
use crate::model::deviation::SiteDeviation;
use crate::model::site::AntigenSite;
use crate::model::structure::{StructureAtom, StructureRecord};

/// Produces the raw per-site deviations of one sample against a fixed
/// reference.
pub trait DeviationEngine {
    /// Returns one [`SiteDeviation`] per site, in [`AntigenSite::ALL`] order.
    fn measure(&mut self, sample: &Path) -> Result<Vec<SiteDeviation>, ProcessingError>;
}

#[derive(Debug)]
pub struct Session {
    reference: StructureRecord,
    sample: Option<StructureRecord>,
    config: AlignConfig,
}

impl Session {
    /// Loads the reference structure. This is the only time it is read.
    pub fn open(reference: &Path, config: AlignConfig) -> Result<Self, io::Error> {
        let structure = read_structure_file(reference)?;
        debug!(
            path = %reference.display(),
            atoms = structure.atom_count(),
            "loaded reference structure"
        );
        Ok(Self::with_reference(
            StructureRecord::new(reference, structure),
            config,
        ))
    }

    pub fn with_reference(reference: StructureRecord, config: AlignConfig) -> Self {
        Self {
            reference,
            sample: None,
            config,
        }
    }

    pub fn reference(&self) -> &StructureRecord {
        &self.reference
    }

    pub fn sample(&self) -> Option<&StructureRecord> {
        self.sample.as_ref()
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Reads `path` into the sample slot, replacing whatever was there.
    pub fn load_sample(&mut self, path: &Path) -> Result<(), ProcessingCause> {
        self.sample = None;
        let structure = read_structure_file(path)?;
        self.put_sample(StructureRecord::new(path, structure));
        Ok(())
    }

    pub fn put_sample(&mut self, record: StructureRecord) {
        debug!(
            path = %record.path().display(),
            atoms = record.structure.atom_count(),
            "loaded sample structure"
        );
        self.sample = Some(record);
    }

    /// Superposes the loaded sample onto the reference and moves every
    /// sample atom into the reference frame.
    pub fn align_sample(&mut self) -> Result<Superposition, ProcessingCause> {
        let sample = self.sample.as_mut().ok_or(ProcessingCause::NoSample)?;
        let include_hydrogens = self.config.include_hydrogens;
        let in_fit = |atom: &StructureAtom| include_hydrogens || !atom.is_hydrogen;

        let pairs = sample
            .structure
            .paired_indices(&self.reference.structure, in_fit);
        let mobile: Vec<_> = pairs
            .iter()
            .map(|&(i, _)| sample.structure.atoms[i].position)
            .collect();
        let target: Vec<_> = pairs
            .iter()
            .map(|&(_, j)| self.reference.structure.atoms[j].position)
            .collect();

        let superposition = superpose::fit(&mobile, &target, &self.config)?;
        sample
            .structure
            .apply(&superposition.rotation, &superposition.translation);

        debug!(
            pairs = superposition.pairs_used,
            rejected = superposition.pairs_rejected,
            rmsd = superposition.rmsd,
            "superposed sample onto reference"
        );

        Ok(superposition)
    }

    /// RMSD over the atoms of `site`, taken in the current frame without
    /// refitting.
    pub fn site_rmsd(&self, site: AntigenSite) -> Result<SiteDeviation, ProcessingCause> {
        let sample = self.sample.as_ref().ok_or(ProcessingCause::NoSample)?;
        let reference = &self.reference.structure;

        let pairs = sample
            .structure
            .paired_indices(reference, |atom| site.contains(atom.residue_id()));
        if pairs.is_empty() {
            return Err(ProcessingCause::EmptySelection(site));
        }

        let rmsd = superpose::rmsd_in_place(pairs.iter().map(|&(i, j)| {
            (
                &sample.structure.atoms[i].position,
                &reference.atoms[j].position,
            )
        }));

        Ok(SiteDeviation {
            site,
            rmsd,
            pairs: pairs.len(),
        })
    }

    pub fn release_sample(&mut self) {
        self.sample = None;
    }

    fn measure_loaded(&mut self) -> Result<Vec<SiteDeviation>, ProcessingCause> {
        self.align_sample()?;
        AntigenSite::ALL
            .into_iter()
            .map(|site| {
                let deviation = self.site_rmsd(site)?;
                debug!(%site, rmsd = deviation.rmsd, pairs = deviation.pairs, "site deviation");
                Ok(deviation)
            })
            .collect()
    }
}

impl DeviationEngine for Session {
    fn measure(&mut self, sample: &Path) -> Result<Vec<SiteDeviation>, ProcessingError> {
        let outcome = self
            .load_sample(sample)
            .and_then(|()| self.measure_loaded());
        self.release_sample();
        outcome.map_err(|cause| ProcessingError::new(sample, cause))
    }
}
