//! Resource registry: template copies and plan cross-references.
//!
//! Every operation validates its inputs, loads the documents it needs fresh
//! from disk, mutates them in memory and writes each changed file once.

use std::fs;
use std::path::{Path, PathBuf};

use ras_model::{ResourceId, ResourceKind, ResourceSlot, SidecarPolicy};
use tracing::{debug, info, warn};

use crate::allocation::{AllocationPolicy, allocate_next_id};
use crate::document::ProjectDocument;
use crate::error::{RegistryError, Result};
use crate::insertion::insert_sorted;
use crate::plan::{PlanFile, rename_plan_short_label};
use crate::project::RasProject;

/// Options for copying a resource from a template.
#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    /// Allocation policy; the kind's default when `None`.
    pub policy: Option<AllocationPolicy>,
    /// Short identifier for a copied plan; `<template label>_copy` when `None`.
    pub label: Option<String>,
}

impl CopyOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(mut self, policy: AllocationPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn policy_for(&self, kind: ResourceKind) -> AllocationPolicy {
        self.policy.unwrap_or(AllocationPolicy::default_for(kind))
    }
}

/// Registry of the numbered resources of one project.
#[derive(Debug, Clone)]
pub struct Registry {
    project: RasProject,
}

impl Registry {
    pub fn new(project: RasProject) -> Self {
        Self { project }
    }

    /// Open the registry of the project file at `path`.
    pub fn open(project_file: impl Into<PathBuf>) -> Self {
        Self::new(RasProject::new(project_file))
    }

    pub fn project(&self) -> &RasProject {
        &self.project
    }

    /// Load the project document from disk.
    pub fn load(&self) -> Result<ProjectDocument> {
        ProjectDocument::read(self.project.project_file())
    }

    /// Registered ids of `kind` in document order.
    pub fn enumerate(&self, kind: ResourceKind) -> Result<Vec<ResourceId>> {
        Ok(self.load()?.entries(kind))
    }

    /// Copy the template resource to a newly allocated slot and register it.
    ///
    /// The template file, and its sidecar when the kind requires one, must
    /// exist; nothing is copied or written otherwise.
    pub fn copy_resource_from_template(
        &self,
        template: ResourceSlot,
        options: &CopyOptions,
    ) -> Result<ResourceSlot> {
        let kind = template.kind;
        let template_path = self.project.resource_path(template);
        if !template_path.is_file() {
            return Err(RegistryError::MissingTemplate {
                kind,
                path: template_path,
            });
        }
        let template_sidecar = self.project.sidecar_path(template);
        let copy_sidecar = match kind.sidecar_policy() {
            SidecarPolicy::Required => {
                if !template_sidecar.is_file() {
                    return Err(RegistryError::MissingTemplate {
                        kind,
                        path: template_sidecar,
                    });
                }
                true
            }
            SidecarPolicy::Optional => template_sidecar.is_file(),
            SidecarPolicy::None => false,
        };

        let mut project = self.load()?;
        let policy = options.policy_for(kind);
        let id = allocate_next_id(kind, project.entries(kind), policy)?;
        let slot = ResourceSlot::new(kind, id);
        debug!(%template, %slot, ?policy, "allocated resource slot");

        // An unregistered template can be handed its own number back.
        if slot == template {
            return Err(RegistryError::TemplateNotRegistered {
                slot,
                path: template_path,
            });
        }
        let target = self.project.resource_path(slot);
        copy_file(&template_path, &target)?;
        if copy_sidecar {
            copy_file(&template_sidecar, &self.project.sidecar_path(slot))?;
        }

        let line_index = insert_sorted(&mut project, slot);
        project.write(self.project.project_file())?;
        info!(
            %template,
            %slot,
            line_index,
            sidecar = copy_sidecar,
            "registered resource copy"
        );
        Ok(slot)
    }

    /// Copy a plan and give the copy a new short identifier.
    pub fn copy_plan_from_template(
        &self,
        template: ResourceSlot,
        options: &CopyOptions,
    ) -> Result<ResourceSlot> {
        ensure_kind(template, ResourceKind::Plan)?;
        let slot = self.copy_resource_from_template(template, options)?;
        rename_plan_short_label(&self.project.resource_path(slot), options.label.as_deref())?;
        Ok(slot)
    }

    /// Point a plan at the registered geometry `id`.
    ///
    /// Returns the number of plan lines rewritten.
    pub fn apply_geometry_to_plan(&self, plan: &Path, id: ResourceId) -> Result<usize> {
        self.apply_to_plan(plan, ResourceSlot::new(ResourceKind::Geometry, id))
    }

    /// Point a plan at the registered unsteady flow `id`.
    ///
    /// Returns the number of plan lines rewritten.
    pub fn apply_unsteady_to_plan(&self, plan: &Path, id: ResourceId) -> Result<usize> {
        self.apply_to_plan(plan, ResourceSlot::new(ResourceKind::Unsteady, id))
    }

    fn apply_to_plan(&self, plan_path: &Path, slot: ResourceSlot) -> Result<usize> {
        let project = self.load()?;
        if !project.contains(slot) {
            return Err(RegistryError::UnknownResourceId {
                kind: slot.kind,
                id: slot.id,
            });
        }

        let mut plan = PlanFile::read(plan_path)?;
        let rewritten = match slot.kind {
            ResourceKind::Geometry => plan.set_geometry(slot.id),
            ResourceKind::Unsteady => plan.set_unsteady(slot.id),
            ResourceKind::Plan | ResourceKind::Flow => 0,
        };
        if rewritten == 0 {
            warn!(plan = %plan_path.display(), %slot, "plan has no reference to rewrite");
            return Ok(0);
        }
        plan.write(plan_path)?;
        info!(plan = %plan_path.display(), %slot, rewritten, "applied resource to plan");
        Ok(rewritten)
    }
}

fn ensure_kind(slot: ResourceSlot, expected: ResourceKind) -> Result<()> {
    if slot.kind == expected {
        Ok(())
    } else {
        Err(RegistryError::KindMismatch {
            expected,
            actual: slot.kind,
        })
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        warn!(path = %to.display(), "overwriting unregistered resource file");
    }
    fs::copy(from, to).map_err(|e| RegistryError::io("copy", to, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_options_builder() {
        let options = CopyOptions::new()
            .with_policy(AllocationPolicy::Append)
            .with_label("Calibration");
        assert_eq!(
            options.policy_for(ResourceKind::Geometry),
            AllocationPolicy::Append
        );
        assert_eq!(options.label.as_deref(), Some("Calibration"));
        assert_eq!(
            CopyOptions::new().policy_for(ResourceKind::Plan),
            AllocationPolicy::Append
        );
    }

    #[test]
    fn test_copy_plan_rejects_other_kinds() {
        let registry = Registry::open("/nonexistent/Muncie.prj");
        let template: ResourceSlot = "g01".parse().unwrap();
        let err = registry
            .copy_plan_from_template(template, &CopyOptions::new())
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::KindMismatch {
                expected: ResourceKind::Plan,
                actual: ResourceKind::Geometry
            }
        ));
    }
}
