use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bio_forge as bf;
use nalgebra::Vector3;

use crate::io::error::Error;
use crate::model::structure::{AtomKey, Structure, StructureAtom};

/// Parses PDB text into a [`Structure`].
///
/// Parsing is delegated to bio-forge; no cleaning, repair or protonation is
/// applied, so coordinates are exactly those in the file. A file without any
/// atom records is rejected with [`Error::EmptyStructure`]. Coordinate
/// records are fixed-column ASCII; any that is not fails with
/// [`Error::MalformedRecord`] before it reaches the parser.
pub fn read_structure<R: BufRead>(mut reader: R) -> Result<Structure, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    check_records(&text)?;

    let context = bf::io::IoContext::new_default();
    let bio_struct = bf::io::read_pdb_structure(text.as_bytes(), &context)?;

    let structure = from_bio_structure(&bio_struct);
    if structure.is_empty() {
        return Err(Error::EmptyStructure);
    }

    Ok(structure)
}

pub fn read_structure_file(path: &Path) -> Result<Structure, Error> {
    let file = File::open(path)?;
    read_structure(BufReader::new(file))
}

fn check_records(text: &str) -> Result<(), Error> {
    for (index, line) in text.lines().enumerate() {
        let is_coordinate = line.starts_with("ATOM") || line.starts_with("HETATM");
        if is_coordinate && !line.is_ascii() {
            return Err(Error::MalformedRecord { line: index + 1 });
        }
    }
    Ok(())
}

fn from_bio_structure(bio_struct: &bf::Structure) -> Structure {
    let mut atoms = Vec::with_capacity(bio_struct.atom_count());

    for (chain, residue, bio_atom) in bio_struct.iter_atoms_with_context() {
        atoms.push(StructureAtom {
            key: AtomKey::new(
                chain.id.clone(),
                residue.id,
                residue.insertion_code,
                bio_atom.name.clone(),
            ),
            is_hydrogen: matches!(bio_atom.element.symbol(), "H" | "D"),
            position: Vector3::new(bio_atom.pos.x, bio_atom.pos.y, bio_atom.pos.z),
        });
    }

    Structure { atoms }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Renders fixed-column ATOM records.
    pub fn atom_line(
        serial: usize,
        name: &str,
        res_name: &str,
        chain: char,
        res_seq: i32,
        pos: [f64; 3],
        element: &str,
    ) -> String {
        let padded_name = if name.len() < 4 {
            format!(" {name:<3}")
        } else {
            name.to_string()
        };
        format!(
            "ATOM  {serial:>5} {padded_name}{alt}{res_name:>3} {chain}{res_seq:>4}{icode}   {x:>8.3}{y:>8.3}{z:>8.3}{occ:>6.2}{b:>6.2}          {element:>2}",
            alt = ' ',
            icode = ' ',
            x = pos[0],
            y = pos[1],
            z = pos[2],
            occ = 1.0,
            b = 0.0,
        )
    }

    /// A poly-alanine backbone (N, CA, C, O per residue) over `residues`,
    /// laid out on a helix so that no three residues are collinear.
    /// `transform` receives the residue number and the untransformed
    /// position of every atom.
    pub fn backbone_pdb(
        residues: impl IntoIterator<Item = i32>,
        transform: impl Fn(i32, [f64; 3]) -> [f64; 3],
    ) -> String {
        let mut out = String::new();
        let mut serial = 1;
        for (k, res_seq) in residues.into_iter().enumerate() {
            let t = k as f64;
            let base = [2.3 * (0.9 * t).cos(), 2.3 * (0.9 * t).sin(), 1.5 * t];
            let offsets = [
                ("N", "N", [0.0, 0.0, 0.0]),
                ("CA", "C", [1.2, 0.6, 0.3]),
                ("C", "C", [1.9, -0.5, 0.8]),
                ("O", "O", [1.4, -1.6, 1.1]),
            ];
            for (name, element, off) in offsets {
                let p = [base[0] + off[0], base[1] + off[1], base[2] + off[2]];
                out.push_str(&atom_line(
                    serial,
                    name,
                    "ALA",
                    'A',
                    res_seq,
                    transform(res_seq, p),
                    element,
                ));
                out.push('\n');
                serial += 1;
            }
        }
        out.push_str("END\n");
        out
    }
}
