//! Plan file rewrites.
//!
//! A plan (`.pNN`) file selects the geometry and unsteady flow it runs with
//! and carries a handful of run settings. Every rewrite here is line-level
//! by key prefix; lines that do not match pass through unchanged.

use std::path::Path;

use ras_model::key_value::{key_matches, value_of, with_value};
use ras_model::{LineDocument, ResourceId, ResourceKind, ResourceSlot};
use tracing::{info, warn};

use crate::error::{RegistryError, Result};

/// Maximum length of a plan short identifier, in characters.
pub const SHORT_LABEL_MAX_CHARS: usize = 24;

pub const SHORT_IDENTIFIER_KEY: &str = "Short Identifier=";
/// Plan-side prefix of the geometry reference (`Geom File=g01`).
pub const GEOMETRY_REFERENCE_PREFIX: &str = "Geom File=g";
/// Plan-side prefix of the unsteady reference (`Flow File=u01`).
pub const UNSTEADY_REFERENCE_PREFIX: &str = "Flow File=u";

pub const D1_CORES_KEY: &str = "UNET D1 Cores=";
/// Primary core-count key.
pub const D2_CORES_KEY: &str = "UNET D2 Cores=";
pub const PS_CORES_KEY: &str = "PS Cores=";

pub const RUN_HTAB_KEY: &str = "Run HTab=";
pub const USE_EXISTING_IB_TABLES_KEY: &str = "UNET Use Existing IB Tables=";

/// Suffix appended to the current label when no label is given.
pub const COPY_LABEL_SUFFIX: &str = "_copy";

/// A plan file loaded for rewriting.
#[derive(Debug, Clone)]
pub struct PlanFile {
    document: LineDocument,
}

impl PlanFile {
    pub fn parse(text: &str) -> Self {
        Self {
            document: LineDocument::parse(text),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        Ok(Self {
            document: LineDocument::read(path)?,
        })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        self.document.write(path)?;
        Ok(())
    }

    pub fn document(&self) -> &LineDocument {
        &self.document
    }

    /// Geometry the plan currently references.
    pub fn geometry(&self) -> Option<ResourceSlot> {
        self.reference(GEOMETRY_REFERENCE_PREFIX, ResourceKind::Geometry)
    }

    /// Unsteady flow the plan currently references.
    pub fn unsteady(&self) -> Option<ResourceSlot> {
        self.reference(UNSTEADY_REFERENCE_PREFIX, ResourceKind::Unsteady)
    }

    /// Point every geometry reference at `id`. Returns the number of lines rewritten.
    pub fn set_geometry(&mut self, id: ResourceId) -> usize {
        let slot = ResourceSlot::new(ResourceKind::Geometry, id);
        self.replace_prefixed(GEOMETRY_REFERENCE_PREFIX, &format!("Geom File={slot}"))
    }

    /// Point every unsteady flow reference at `id`. Returns the number of lines rewritten.
    pub fn set_unsteady(&mut self, id: ResourceId) -> usize {
        let slot = ResourceSlot::new(ResourceKind::Unsteady, id);
        self.replace_prefixed(UNSTEADY_REFERENCE_PREFIX, &format!("Flow File={slot}"))
    }

    /// Current short identifier, trimmed.
    pub fn short_label(&self) -> Option<&str> {
        self.document
            .lines()
            .find_map(|line| value_of(line, SHORT_IDENTIFIER_KEY))
            .map(str::trim)
    }

    /// Rewrite the first short identifier line.
    ///
    /// The label is truncated to [`SHORT_LABEL_MAX_CHARS`]. Returns the label
    /// written, or `None` when the plan has no short identifier line.
    pub fn set_short_label(&mut self, label: &str) -> Option<String> {
        let label = truncate_label(label);
        let index = self
            .document
            .position(|line| key_matches(line, SHORT_IDENTIFIER_KEY))?;
        let line = self.document.line(index)?;
        let rewritten = with_value(line, SHORT_IDENTIFIER_KEY, &label)?;
        self.document.replace(index, &rewritten);
        Some(label)
    }

    /// Set the solver core counts.
    ///
    /// The primary count is set to `cores`. When the primary reads 2 the 1D
    /// and pipe-system counts are set to 1, otherwise they follow the
    /// primary. A plan without a primary line gets `cores` everywhere.
    pub fn set_core_count(&mut self, cores: u32) -> Result<()> {
        if cores == 0 {
            return Err(RegistryError::InvalidCoreCount { value: cores });
        }
        let primary_found = self.replace_value(D2_CORES_KEY, &cores.to_string()) > 0;
        let secondary = if primary_found && cores == 2 { 1 } else { cores };
        let secondary = secondary.to_string();
        self.replace_value(D1_CORES_KEY, &secondary);
        self.replace_value(PS_CORES_KEY, &secondary);
        Ok(())
    }

    /// Set the hydraulic-table precompute flags; each value must be 0 or -1.
    ///
    /// Both values are validated before either line is touched.
    pub fn set_precompute_flags(
        &mut self,
        run_htab: i32,
        use_existing_ib_tables: i32,
    ) -> Result<()> {
        validate_flag(RUN_HTAB_KEY, run_htab)?;
        validate_flag(USE_EXISTING_IB_TABLES_KEY, use_existing_ib_tables)?;
        self.replace_value(RUN_HTAB_KEY, &run_htab.to_string());
        self.replace_value(
            USE_EXISTING_IB_TABLES_KEY,
            &use_existing_ib_tables.to_string(),
        );
        Ok(())
    }

    fn reference(&self, prefix: &str, kind: ResourceKind) -> Option<ResourceSlot> {
        let key = &prefix[..prefix.len() - 1];
        self.document
            .lines()
            .filter(|line| key_matches(line, prefix))
            .find_map(|line| ResourceSlot::parse_as(value_of(line, key)?, kind).ok())
    }

    fn replace_prefixed(&mut self, prefix: &str, replacement: &str) -> usize {
        let indices: Vec<usize> = self
            .document
            .lines()
            .enumerate()
            .filter(|(_, line)| key_matches(line, prefix))
            .map(|(index, _)| index)
            .collect();
        for &index in &indices {
            self.document.replace(index, replacement);
        }
        indices.len()
    }

    fn replace_value(&mut self, key: &str, value: &str) -> usize {
        let rewrites: Vec<(usize, String)> = self
            .document
            .lines()
            .enumerate()
            .filter_map(|(index, line)| with_value(line, key, value).map(|line| (index, line)))
            .collect();
        for (index, line) in &rewrites {
            self.document.replace(*index, line);
        }
        rewrites.len()
    }
}

/// Truncate a label to [`SHORT_LABEL_MAX_CHARS`] characters.
pub fn truncate_label(label: &str) -> String {
    label.chars().take(SHORT_LABEL_MAX_CHARS).collect()
}

fn validate_flag(key: &'static str, value: i32) -> Result<()> {
    if matches!(value, 0 | -1) {
        Ok(())
    } else {
        Err(RegistryError::InvalidFlagValue { key, value })
    }
}

/// Rename the short identifier of the plan at `path`.
///
/// Without an explicit label the current label gets a `_copy` suffix.
/// Returns the label written, or `None` when the plan has no short
/// identifier line (the file is left untouched).
pub fn rename_plan_short_label(path: &Path, label: Option<&str>) -> Result<Option<String>> {
    let mut plan = PlanFile::read(path)?;
    let label = match label {
        Some(label) => label.to_string(),
        None => format!("{}{COPY_LABEL_SUFFIX}", plan.short_label().unwrap_or_default()),
    };
    let Some(written) = plan.set_short_label(&label) else {
        warn!(path = %path.display(), "plan has no short identifier line");
        return Ok(None);
    };
    plan.write(path)?;
    info!(path = %path.display(), label = %written, "renamed plan short identifier");
    Ok(Some(written))
}

/// Set the solver core counts of the plan at `path`.
pub fn set_core_count(path: &Path, cores: u32) -> Result<()> {
    if cores == 0 {
        return Err(RegistryError::InvalidCoreCount { value: cores });
    }
    let mut plan = PlanFile::read(path)?;
    plan.set_core_count(cores)?;
    plan.write(path)?;
    info!(path = %path.display(), cores, "set plan core count");
    Ok(())
}

/// Set the precompute flags of the plan at `path`.
pub fn set_precompute_flags(
    path: &Path,
    run_htab: i32,
    use_existing_ib_tables: i32,
) -> Result<()> {
    validate_flag(RUN_HTAB_KEY, run_htab)?;
    validate_flag(USE_EXISTING_IB_TABLES_KEY, use_existing_ib_tables)?;
    let mut plan = PlanFile::read(path)?;
    plan.set_precompute_flags(run_htab, use_existing_ib_tables)?;
    plan.write(path)?;
    info!(
        path = %path.display(),
        run_htab,
        use_existing_ib_tables,
        "set plan precompute flags"
    );
    Ok(())
}
