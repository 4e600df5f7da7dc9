//! Project document with an index of its resource reference lines.

use std::path::Path;

use ras_model::key_value::value_of;
use ras_model::{LineDocument, ResourceId, ResourceKind, ResourceSlot};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// A `<Key>=<letter><NN>` line found in the project document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceLine {
    pub kind: ResourceKind,
    /// 0-based line index in the document.
    pub line_index: usize,
    /// Parsed id, `None` when the reference is malformed.
    pub id: Option<ResourceId>,
    /// Reference text after the key, trimmed.
    pub value: String,
}

impl ReferenceLine {
    pub fn slot(&self) -> Option<ResourceSlot> {
        self.id.map(|id| ResourceSlot::new(self.kind, id))
    }
}

/// A project (`.prj`) file and its resource references.
///
/// The reference index is rebuilt after every mutation so it always matches
/// the line positions of the underlying document.
#[derive(Debug, Clone)]
pub struct ProjectDocument {
    document: LineDocument,
    references: Vec<ReferenceLine>,
}

impl ProjectDocument {
    pub fn parse(text: &str) -> Self {
        Self::from_document(LineDocument::parse(text))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let document = LineDocument::read(path)?;
        let project = Self::from_document(document);
        debug!(
            path = %path.display(),
            reference_count = project.references.len(),
            "loaded project document"
        );
        Ok(project)
    }

    pub fn from_document(document: LineDocument) -> Self {
        let references = index_references(&document);
        Self {
            document,
            references,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        self.document.write(path)?;
        Ok(())
    }

    pub fn document(&self) -> &LineDocument {
        &self.document
    }

    pub fn into_document(self) -> LineDocument {
        self.document
    }

    /// All reference lines in document order.
    pub fn references(&self) -> &[ReferenceLine] {
        &self.references
    }

    /// Reference lines of one kind in document order, malformed ones included.
    pub fn reference_lines(&self, kind: ResourceKind) -> impl Iterator<Item = &ReferenceLine> {
        self.references.iter().filter(move |r| r.kind == kind)
    }

    /// Well-formed ids of `kind` in document order.
    pub fn entries(&self, kind: ResourceKind) -> Vec<ResourceId> {
        self.reference_lines(kind).filter_map(|r| r.id).collect()
    }

    pub fn contains(&self, slot: ResourceSlot) -> bool {
        self.reference_lines(slot.kind).any(|r| r.id == Some(slot.id))
    }

    /// Insert a reference line for `slot` at `index` and reindex.
    pub fn insert_reference(&mut self, index: usize, slot: ResourceSlot) {
        let line = reference_text(slot);
        self.document.insert(index, &line);
        self.references = index_references(&self.document);
    }
}

/// Text of the project line referencing `slot`, e.g. `Geom File=g03`.
pub fn reference_text(slot: ResourceSlot) -> String {
    format!("{}{slot}", slot.kind.project_key())
}

/// Scan every line once against the key of each kind.
fn index_references(document: &LineDocument) -> Vec<ReferenceLine> {
    document
        .lines()
        .enumerate()
        .filter_map(|(line_index, line)| {
            ResourceKind::ALL.iter().find_map(|&kind| {
                let value = value_of(line, kind.project_key())?.trim();
                Some(ReferenceLine {
                    kind,
                    line_index,
                    id: parse_reference(kind, value),
                    value: value.to_string(),
                })
            })
        })
        .collect()
}

fn parse_reference(kind: ResourceKind, value: &str) -> Option<ResourceId> {
    let slot: ResourceSlot = value.parse().ok()?;
    (slot.kind == kind).then_some(slot.id)
}
