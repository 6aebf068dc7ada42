use std::collections::HashMap;
use std::path::{Path, PathBuf};

use nalgebra::Vector3;

/// Identity of an atom that is comparable across two structures of the
/// same molecule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomKey {
    pub chain_id: String,
    pub residue_id: i32,
    pub insertion_code: char,
    pub atom_name: String,
}

impl AtomKey {
    pub fn new(
        chain_id: impl Into<String>,
        residue_id: i32,
        insertion_code: Option<char>,
        atom_name: impl Into<String>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            residue_id,
            insertion_code: insertion_code.unwrap_or(' '),
            atom_name: atom_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructureAtom {
    pub key: AtomKey,
    pub is_hydrogen: bool,
    pub position: Vector3<f64>,
}

impl StructureAtom {
    #[inline]
    pub fn residue_id(&self) -> i32 {
        self.key.residue_id
    }
}

/// Flat coordinate view of a macromolecular structure.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    pub atoms: Vec<StructureAtom>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Index of every atom by its key. When a key repeats (alternate
    /// locations that survived parsing), the first occurrence wins.
    pub fn key_index(&self) -> HashMap<&AtomKey, usize> {
        let mut index = HashMap::with_capacity(self.atoms.len());
        for (i, atom) in self.atoms.iter().enumerate() {
            index.entry(&atom.key).or_insert(i);
        }
        index
    }

    /// Pairs atoms of `self` with atoms of `other` that share an [`AtomKey`],
    /// in `self`'s atom order. Only atoms accepted by `filter` take part.
    pub fn paired_indices<F>(&self, other: &Structure, filter: F) -> Vec<(usize, usize)>
    where
        F: Fn(&StructureAtom) -> bool,
    {
        let other_index = other.key_index();
        let mut seen = std::collections::HashSet::new();
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| filter(atom))
            .filter(|(_, atom)| seen.insert(&atom.key))
            .filter_map(|(i, atom)| {
                other_index
                    .get(&atom.key)
                    .copied()
                    .filter(|&j| filter(&other.atoms[j]))
                    .map(|j| (i, j))
            })
            .collect()
    }

    pub fn apply(&mut self, rotation: &nalgebra::Matrix3<f64>, translation: &Vector3<f64>) {
        for atom in &mut self.atoms {
            atom.position = rotation * atom.position + translation;
        }
    }
}

/// A structure loaded into an engine slot, together with where it came from.
#[derive(Debug, Clone)]
pub struct StructureRecord {
    pub path: PathBuf,
    pub structure: Structure,
}

impl StructureRecord {
    pub fn new(path: impl Into<PathBuf>, structure: Structure) -> Self {
        Self {
            path: path.into(),
            structure,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// File name component of `path`, as used to label report rows.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(chain: &str, res: i32, name: &str, h: bool, pos: [f64; 3]) -> StructureAtom {
        StructureAtom {
            key: AtomKey::new(chain, res, None, name),
            is_hydrogen: h,
            position: Vector3::new(pos[0], pos[1], pos[2]),
        }
    }

    #[test]
    fn pairs_atoms_by_key_in_self_order() {
        let a = Structure {
            atoms: vec![
                atom("A", 1, "N", false, [0.0; 3]),
                atom("A", 1, "CA", false, [1.0, 0.0, 0.0]),
                atom("A", 2, "N", false, [2.0, 0.0, 0.0]),
            ],
        };
        let b = Structure {
            atoms: vec![
                atom("A", 2, "N", false, [0.0; 3]),
                atom("A", 1, "CA", false, [0.0; 3]),
            ],
        };

        assert_eq!(a.paired_indices(&b, |_| true), vec![(1, 1), (2, 0)]);
    }

    #[test]
    fn pairing_respects_filter_on_both_sides() {
        let a = Structure {
            atoms: vec![
                atom("A", 1, "CA", false, [0.0; 3]),
                atom("A", 1, "H", true, [0.0; 3]),
            ],
        };
        let b = a.clone();

        assert_eq!(a.paired_indices(&b, |at| !at.is_hydrogen), vec![(0, 0)]);
    }

    #[test]
    fn chain_is_part_of_identity() {
        let a = Structure {
            atoms: vec![atom("A", 1, "CA", false, [0.0; 3])],
        };
        let b = Structure {
            atoms: vec![atom("B", 1, "CA", false, [0.0; 3])],
        };

        assert!(a.paired_indices(&b, |_| true).is_empty());
    }

    #[test]
    fn display_name_is_the_file_name() {
        assert_eq!(display_name(Path::new("/data/models/a.pdb")), "a.pdb");
        assert_eq!(display_name(Path::new("b.PDB")), "b.PDB");
    }
}
