use std::fs;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// File extension of sample structures, compared case-insensitively.
pub const STRUCTURE_EXTENSION: &str = ".pdb";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("'{}' is not a valid directory", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("reference structure '{}' does not exist or is not a file", .0.display())]
    MissingReference(PathBuf),

    #[error("failed to list directory '{}': {source}", .path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Enumerates the sample structures of a batch.
///
/// Returns every regular file in `pdb_dir` whose name ends in `.pdb` (any
/// case), except the reference itself, sorted by path.
pub fn resolve(pdb_dir: &Path, ref_pdb: &Path) -> Result<Vec<PathBuf>, InputError> {
    if !pdb_dir.is_dir() {
        return Err(InputError::InvalidDirectory(pdb_dir.to_path_buf()));
    }
    if !ref_pdb.is_file() {
        return Err(InputError::MissingReference(ref_pdb.to_path_buf()));
    }

    let list_err = |source| InputError::ListDirectory {
        path: pdb_dir.to_path_buf(),
        source,
    };

    let reference = absolute(ref_pdb).map_err(list_err)?;

    let mut samples = Vec::new();
    for entry in fs::read_dir(pdb_dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let path = entry.path();

        if !has_structure_extension(&path) || !path.is_file() {
            continue;
        }
        if absolute(&path).map_err(list_err)? == reference {
            continue;
        }

        samples.push(path);
    }

    samples.sort();
    Ok(samples)
}

fn has_structure_extension(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.as_encoded_bytes();
    let ext = STRUCTURE_EXTENSION.as_bytes();
    name.len() >= ext.len() && name[name.len() - ext.len()..].eq_ignore_ascii_case(ext)
}

/// Lexical absolute path: joined onto the working directory with `.` and
/// `..` folded, without touching symlinks.
fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    Ok(normalized)
}
