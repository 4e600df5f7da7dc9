//! Project context: where a project's files live and how they are named.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use ras_model::{ResourceSlot, SIDECAR_SUFFIX};

/// A HEC-RAS project identified by its `.prj` file.
///
/// Resource files live next to the project file and are named
/// `<project name>.<slot>`, e.g. `Muncie.g01`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasProject {
    project_file: PathBuf,
    folder: PathBuf,
    name: String,
}

impl RasProject {
    pub fn new(project_file: impl Into<PathBuf>) -> Self {
        let project_file = project_file.into();
        let folder = project_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let name = project_name(&project_file);
        Self {
            project_file,
            folder,
            name,
        }
    }

    pub fn project_file(&self) -> &Path {
        &self.project_file
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Project name (the project file stem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of a resource file, e.g. `<folder>/Muncie.p02`.
    pub fn resource_path(&self, slot: ResourceSlot) -> PathBuf {
        self.folder.join(format!("{}.{}", self.name, slot.extension()))
    }

    /// Path of a resource's binary sidecar, e.g. `<folder>/Muncie.g01.hdf`.
    pub fn sidecar_path(&self, slot: ResourceSlot) -> PathBuf {
        sidecar_of(&self.resource_path(slot))
    }
}

/// Derive the project name from a project file path.
pub fn project_name(project_file: &Path) -> String {
    project_file
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or_default()
        .to_string()
}

/// Append the sidecar suffix to a resource path.
pub fn sidecar_of(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}
