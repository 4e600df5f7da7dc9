//! Resource registry for HEC-RAS projects.
//!
//! Enumerates the plans, geometries and flow files a project references,
//! copies resources from templates under newly allocated numbers, keeps the
//! project file's reference lines in ascending order and rewrites plan
//! settings.

pub mod allocation;
pub mod discovery;
pub mod document;
pub mod error;
pub mod insertion;
pub mod plan;
pub mod project;
pub mod registry;

pub use allocation::{AllocationPolicy, allocate_next_id};
pub use discovery::find_project_file;
pub use document::{ProjectDocument, ReferenceLine};
pub use error::{RegistryError, Result};
pub use insertion::{insert_sorted, insertion_index};
pub use plan::{PlanFile, rename_plan_short_label, set_core_count, set_precompute_flags};
pub use project::RasProject;
pub use registry::{CopyOptions, Registry};
