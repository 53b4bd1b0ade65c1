//! Dragging movement checker (WCAG 2.5.7, level AA).
//!
//! Flags drag-only interactions lacking a single-pointer or keyboard
//! alternative. Candidates are native HTML drag attributes
//! (`draggable="true"`) and markers of known drag libraries found in class
//! names and attribute names. An alternative is assumed when the element
//! declares `aria-keyshortcuts` or a button-like control exists in the same
//! container.

use aho_corasick::AhoCorasick;

use pagescan_core::{AuditConfig, CheckerError, Impact, NodeId};

use crate::dom::{DomSnapshot, ElementNode};

use super::traits::{StructuralChecker, StructuralCheckerKind};
use super::types::{Criterion, StructuralViolation};

pub struct DraggingChecker;

impl StructuralChecker for DraggingChecker {
    fn kind(&self) -> StructuralCheckerKind {
        StructuralCheckerKind::Dragging
    }

    fn check(
        &self,
        snapshot: &DomSnapshot,
        config: &AuditConfig,
    ) -> Result<Vec<StructuralViolation>, CheckerError> {
        let markers = AhoCorasick::new(&config.checkers.drag_markers).map_err(|e| {
            CheckerError::Failed {
                checker: self.kind().name(),
                message: format!("invalid drag marker set: {e}"),
            }
        })?;

        let mut violations = Vec::new();
        for id in snapshot.document_order() {
            let Some(node) = snapshot.get(id) else {
                continue;
            };
            let Some(source) = drag_source(node, &markers) else {
                continue;
            };
            if has_alternative(snapshot, node) {
                continue;
            }
            violations.push(StructuralViolation::new(
                Criterion::DraggingMovement,
                id,
                snapshot,
                config,
                Impact::Serious,
                format!("drag interaction ({source}) has no single-pointer or keyboard alternative"),
            ));
        }
        Ok(violations)
    }
}

/// How the element was identified as draggable, if it was.
fn drag_source(node: &ElementNode, markers: &AhoCorasick) -> Option<String> {
    if node.attr("draggable") == Some("true") {
        return Some("native draggable attribute".to_string());
    }
    for class in &node.classes {
        if markers.is_match(class) {
            return Some(format!("drag library class \"{class}\""));
        }
    }
    for name in node.attributes.keys() {
        if markers.is_match(name) {
            return Some(format!("drag library attribute \"{name}\""));
        }
    }
    None
}

/// Whether a non-drag alternative is discoverable for the element.
fn has_alternative(snapshot: &DomSnapshot, node: &ElementNode) -> bool {
    if node.attr("aria-keyshortcuts").is_some() {
        return true;
    }
    // Button-like controls in the same container count as an alternative
    // (e.g. move up/down buttons beside a drag handle).
    let Some(parent) = node.parent else {
        return false;
    };
    subtree_has_button(snapshot, parent, node.id)
}

fn subtree_has_button(snapshot: &DomSnapshot, root: NodeId, skip: NodeId) -> bool {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if id != skip && id != root {
            if let Some(node) = snapshot.get(id) {
                if node.tag == "button" || node.attr("role") == Some("button") {
                    return true;
                }
            }
        }
        if let Some(node) = snapshot.get(id) {
            if id == skip {
                continue;
            }
            stack.extend(node.children.iter().copied());
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementBuilder;

    fn check(snap: &DomSnapshot) -> Vec<StructuralViolation> {
        DraggingChecker.check(snap, &AuditConfig::default()).unwrap()
    }

    #[test]
    fn test_native_draggable_without_alternative() {
        let mut snap = DomSnapshot::new();
        let root = snap.add(None, ElementBuilder::new("ul"));
        let item = snap.add(Some(root), ElementBuilder::new("li").attr("draggable", "true"));
        snap.add(Some(item), ElementBuilder::new("span").text("Item 1"));

        let violations = check(&snap);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].criterion, Criterion::DraggingMovement);
        assert!(violations[0].details.contains("native draggable"));
    }

    #[test]
    fn test_drag_library_class_detected() {
        let mut snap = DomSnapshot::new();
        let root = snap.add(None, ElementBuilder::new("div"));
        snap.add(Some(root), ElementBuilder::new("div").class("card sortable-handle"));

        let violations = check(&snap);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].details.contains("sortable-handle"));
    }

    #[test]
    fn test_drag_library_attribute_detected() {
        let mut snap = DomSnapshot::new();
        let root = snap.add(None, ElementBuilder::new("div"));
        snap.add(
            Some(root),
            ElementBuilder::new("div").attr("data-rbd-drag-handle-draggable-id", "task-1"),
        );
        assert_eq!(check(&snap).len(), 1);
    }

    #[test]
    fn test_keyboard_shortcut_is_an_alternative() {
        let mut snap = DomSnapshot::new();
        let root = snap.add(None, ElementBuilder::new("ul"));
        snap.add(
            Some(root),
            ElementBuilder::new("li")
                .attr("draggable", "true")
                .attr("aria-keyshortcuts", "Alt+ArrowUp Alt+ArrowDown"),
        );
        assert!(check(&snap).is_empty());
    }

    #[test]
    fn test_sibling_buttons_are_an_alternative() {
        let mut snap = DomSnapshot::new();
        let root = snap.add(None, ElementBuilder::new("li"));
        snap.add(Some(root), ElementBuilder::new("div").attr("draggable", "true"));
        snap.add(Some(root), ElementBuilder::new("button").attr("aria-label", "Move up"));
        assert!(check(&snap).is_empty());
    }
}
