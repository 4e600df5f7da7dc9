//! Sorted insertion of reference lines with a header-anchor fallback.

use ras_model::ResourceSlot;
use ras_model::key_value::key_matches;

use crate::document::ProjectDocument;

/// Line index at which a reference to `slot` should be inserted.
///
/// In order of preference:
/// 1. before the first reference of the same kind with a greater id;
/// 2. after the last reference of the same kind;
/// 3. after the last line matching one of `anchor_keys`;
/// 4. at the top of the document when the kind has anchor keys, at the end
///    otherwise.
pub fn insertion_index(
    project: &ProjectDocument,
    slot: ResourceSlot,
    anchor_keys: &[&str],
) -> usize {
    let mut last_same_kind = None;
    for reference in project.reference_lines(slot.kind) {
        if reference.id.is_some_and(|id| id > slot.id) {
            return reference.line_index;
        }
        last_same_kind = Some(reference.line_index);
    }
    if let Some(index) = last_same_kind {
        return index + 1;
    }

    if anchor_keys.is_empty() {
        return project.document().len();
    }
    project
        .document()
        .lines()
        .enumerate()
        .filter(|(_, line)| anchor_keys.iter().any(|key| key_matches(line, key)))
        .map(|(index, _)| index + 1)
        .last()
        .unwrap_or(0)
}

/// Insert a reference to `slot` into `project`, returning the line index used.
pub fn insert_sorted(project: &mut ProjectDocument, slot: ResourceSlot) -> usize {
    let index = insertion_index(project, slot, slot.kind.header_anchor_keys());
    project.insert_reference(index, slot);
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use ras_model::{ResourceId, ResourceKind};

    fn slot(text: &str) -> ResourceSlot {
        text.parse().unwrap()
    }

    fn insert(text: &str, new_slot: &str) -> String {
        let mut project = ProjectDocument::parse(text);
        insert_sorted(&mut project, slot(new_slot));
        project.document().to_text()
    }

    #[test]
    fn test_inserts_between_lower_and_higher() {
        let text = "Proj Title=X\nGeom File=g01\nGeom File=g03\nPlan File=p01\n";
        assert_eq!(
            insert(text, "g02"),
            "Proj Title=X\nGeom File=g01\nGeom File=g02\nGeom File=g03\nPlan File=p01\n"
        );
    }

    #[test]
    fn test_appends_after_last_same_kind() {
        let text = "Proj Title=X\nPlan File=p01\nPlan File=p02\nUnsteady File=u01\n";
        assert_eq!(
            insert(text, "p03"),
            "Proj Title=X\nPlan File=p01\nPlan File=p02\nPlan File=p03\nUnsteady File=u01\n"
        );
    }

    #[test]
    fn test_geometry_falls_back_to_last_header_anchor() {
        let text = "Proj Title=X\nCurrent Plan=p01\nEnglish Units\nPlan File=p01\n";
        assert_eq!(
            insert(text, "g01"),
            "Proj Title=X\nCurrent Plan=p01\nEnglish Units\nGeom File=g01\nPlan File=p01\n"
        );
    }

    #[test]
    fn test_header_anchor_is_case_insensitive() {
        let text = "PROJ TITLE=X\nPlan File=p01\n";
        assert_eq!(insert(text, "g01"), "PROJ TITLE=X\nGeom File=g01\nPlan File=p01\n");
    }

    #[test]
    fn test_geometry_without_anchor_goes_to_top() {
        let text = "Plan File=p01\n";
        assert_eq!(insert(text, "g01"), "Geom File=g01\nPlan File=p01\n");
    }

    #[test]
    fn test_other_kinds_without_anchor_go_to_end() {
        let text = "Proj Title=X\nGeom File=g01\nPlan File=p01";
        assert_eq!(
            insert(text, "u01"),
            "Proj Title=X\nGeom File=g01\nPlan File=p01\nUnsteady File=u01\n"
        );
    }

    #[test]
    fn test_malformed_reference_counts_as_same_kind_line() {
        let project = ProjectDocument::parse("Proj Title=X\nFlow File=fXX\nPlan File=p01\n");
        let index = insertion_index(&project, slot("f01"), ResourceKind::Flow.header_anchor_keys());
        assert_eq!(index, 2);
    }

    #[test]
    fn test_ordering_is_kept_for_every_insertion() {
        let mut project = ProjectDocument::parse("Proj Title=X\n");
        for number in ["g05", "g02", "g09", "g01", "g07"] {
            insert_sorted(&mut project, slot(number));
        }
        let numbers: Vec<u8> = project
            .entries(ResourceKind::Geometry)
            .iter()
            .copied().map(ResourceId::get)
            .collect();
        assert_eq!(numbers, vec![1, 2, 5, 7, 9]);
    }
}
