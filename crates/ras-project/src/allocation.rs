//! Resource number allocation.

use std::collections::BTreeSet;

use ras_model::{ResourceId, ResourceKind};
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// How a new resource number is chosen from the numbers already in use.
///
/// Plans have always been numbered past the highest existing plan while the
/// other kinds reuse the first gap. Both behaviors are kept as named
/// policies; callers can pick either one per copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationPolicy {
    /// Smallest positive number not in use.
    GapFill,
    /// One past the largest number in use.
    Append,
}

impl AllocationPolicy {
    /// Policy used for `kind` when the caller does not choose one.
    pub fn default_for(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Plan => AllocationPolicy::Append,
            ResourceKind::Geometry | ResourceKind::Unsteady | ResourceKind::Flow => {
                AllocationPolicy::GapFill
            }
        }
    }
}

/// Choose the next number for `kind` given the numbers already registered.
///
/// Fails with [`RegistryError::NumberingExhausted`] when the chosen number
/// would exceed 99.
pub fn allocate_next_id<I>(
    kind: ResourceKind,
    existing: I,
    policy: AllocationPolicy,
) -> Result<ResourceId>
where
    I: IntoIterator<Item = ResourceId>,
{
    let used: BTreeSet<u32> = existing
        .into_iter()
        .map(|id| u32::from(id.get()))
        .collect();
    let next = match policy {
        AllocationPolicy::GapFill => (1..).find(|n| !used.contains(n)).unwrap_or(1),
        AllocationPolicy::Append => used.last().map_or(1, |max| max + 1),
    };
    ResourceId::new(next).map_err(|_| RegistryError::NumberingExhausted { kind })
}
