use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::common::FileKind;

/// A file in the scanned directory that crossbow can load
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub path: PathBuf,
    pub kind: FileKind,
}

impl fmt::Display for CandidateFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// List the loadable files directly inside `dir`, sorted by name.
///
/// A directory that cannot be read is logged and reported as having no candidates.
pub fn scan_directory(dir: impl AsRef<Path>) -> Vec<CandidateFile> {
    let dir = dir.as_ref();
    match list_candidates(dir) {
        Ok(candidates) => candidates,
        Err(e) => {
            error!("Failed to read directory {}: {}", dir.display(), e);
            vec![]
        }
    }
}

fn list_candidates(dir: &Path) -> std::io::Result<Vec<CandidateFile>> {
    let mut candidates = vec![];
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !FileKind::is_recognized(&name) {
            continue;
        }
        // Follows symlinks, so a link to a file counts as a file
        let path = entry.path();
        if !path.is_file() {
            debug!("Skipping {}: not a regular file", name);
            continue;
        }
        candidates.push(CandidateFile {
            kind: FileKind::from_path(&name),
            name,
            path,
        });
    }
    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(candidates)
}
