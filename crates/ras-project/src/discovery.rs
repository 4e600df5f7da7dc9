//! Project file discovery.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{RegistryError, Result};

/// Extension of HEC-RAS project files.
pub const PROJECT_EXTENSION: &str = "prj";
/// Extension of the RAS Mapper layer file that shares the project stem.
pub const RASMAP_EXTENSION: &str = "rasmap";
/// Statement that marks a `.prj` file as a HEC-RAS project.
pub const PROJECT_TITLE_KEY: &str = "Proj Title=";

/// Lists files in `dir` with the given extension (case-insensitive).
///
/// Returns files sorted by file name.
pub fn list_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(RegistryError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|e| RegistryError::io("read directory", dir, e))?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| RegistryError::io("read directory", dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Find the HEC-RAS project file in `folder`.
///
/// `.prj` is also used by GIS projection files, so with several candidates:
/// - exactly one `.rasmap` file selects the `.prj` with the same stem;
/// - otherwise the first `.prj` containing a `Proj Title=` line wins.
///
/// Returns `Ok(None)` when no candidate qualifies.
pub fn find_project_file(folder: &Path) -> Result<Option<PathBuf>> {
    let candidates = list_files_with_extension(folder, PROJECT_EXTENSION)?;
    debug!(
        folder = %folder.display(),
        candidate_count = candidates.len(),
        "searching for project file"
    );

    match candidates.as_slice() {
        [] => return Ok(None),
        [only] => return Ok(Some(only.clone())),
        _ => {}
    }

    let rasmaps = list_files_with_extension(folder, RASMAP_EXTENSION)?;
    if let [rasmap] = rasmaps.as_slice() {
        let stem = rasmap.file_stem();
        let matched = candidates
            .iter()
            .find(|candidate| candidate.file_stem() == stem)
            .cloned();
        debug!(rasmap = %rasmap.display(), found = matched.is_some(), "matched project by rasmap");
        return Ok(matched);
    }

    for candidate in candidates {
        // Unreadable candidates are skipped.
        let Ok(text) = fs::read_to_string(&candidate) else {
            continue;
        };
        if text.contains(PROJECT_TITLE_KEY) {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}
