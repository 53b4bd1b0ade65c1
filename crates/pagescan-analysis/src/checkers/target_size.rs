//! Target size checker (WCAG 2.5.8, level AA).
//!
//! Interactive elements must offer at least a 24×24 device-independent
//! pixel footprint. Four documented exceptions apply:
//! - inline: links rendered inline with text
//! - user-agent: controls sized by the browser, not the author
//! - equivalent: another adequately sized control with the same accessible
//!   name exists on the page
//! - spacing: a 24px circle centered on the target intersects no other
//!   target and no other undersized target's circle
//!
//! Excepted candidates are suppressed unless `report_excepted_targets` is
//! set, in which case they surface as minor findings naming the exception.

use pagescan_core::{AuditConfig, CheckerError, Impact, NodeId, Rect};

use crate::dom::{DomSnapshot, ElementNode};

use super::traits::{StructuralChecker, StructuralCheckerKind};
use super::types::{Criterion, StructuralViolation};
use super::{accessible_name, is_interactive};

pub struct TargetSizeChecker;

impl StructuralChecker for TargetSizeChecker {
    fn kind(&self) -> StructuralCheckerKind {
        StructuralCheckerKind::TargetSize
    }

    fn check(
        &self,
        snapshot: &DomSnapshot,
        config: &AuditConfig,
    ) -> Result<Vec<StructuralViolation>, CheckerError> {
        let minimum = config.checkers.min_target_size;
        let targets = collect_targets(snapshot);
        let mut violations = Vec::new();

        for &(id, bounds) in &targets {
            if bounds.width >= minimum && bounds.height >= minimum {
                continue;
            }
            let Some(node) = snapshot.get(id) else {
                continue;
            };

            let details = format!(
                "interactive target is {:.0}\u{d7}{:.0}px, minimum is {:.0}\u{d7}{:.0}px",
                bounds.width, bounds.height, minimum, minimum
            );

            match exception_for(snapshot, node, bounds, &targets, minimum) {
                Some(exception) => {
                    if config.checkers.report_excepted_targets {
                        violations.push(
                            StructuralViolation::new(
                                Criterion::TargetSize,
                                id,
                                snapshot,
                                config,
                                Impact::Minor,
                                details,
                            )
                            .with_exception(exception),
                        );
                    }
                }
                None => {
                    violations.push(StructuralViolation::new(
                        Criterion::TargetSize,
                        id,
                        snapshot,
                        config,
                        Impact::Serious,
                        details,
                    ));
                }
            }
        }

        Ok(violations)
    }
}

/// All interactive elements with non-empty bounds, in document order.
fn collect_targets(snapshot: &DomSnapshot) -> Vec<(NodeId, Rect)> {
    snapshot
        .document_order()
        .into_iter()
        .filter_map(|id| {
            let node = snapshot.get(id)?;
            let bounds = node.bounds?;
            (is_interactive(node) && !bounds.is_empty()).then_some((id, bounds))
        })
        .collect()
}

/// The first exception that applies to an undersized target, if any.
fn exception_for(
    snapshot: &DomSnapshot,
    node: &ElementNode,
    bounds: Rect,
    targets: &[(NodeId, Rect)],
    minimum: f32,
) -> Option<&'static str> {
    if is_inline_text_link(node) {
        return Some("inline");
    }
    if is_user_agent_control(node) {
        return Some("user-agent");
    }
    if has_equivalent_control(snapshot, node, targets, minimum) {
        return Some("equivalent");
    }
    if spacing_compensates(node.id, bounds, targets, minimum) {
        return Some("spacing");
    }
    None
}

/// Links flowing inline with text are excepted regardless of size.
fn is_inline_text_link(node: &ElementNode) -> bool {
    node.tag == "a" && node.style.display.as_deref() == Some("inline")
}

/// Native form controls the author left at their user-agent size.
fn is_user_agent_control(node: &ElementNode) -> bool {
    matches!(node.tag.as_str(), "input" | "select") && node.classes.is_empty()
}

/// Another target with the same accessible name meets the minimum.
fn has_equivalent_control(
    snapshot: &DomSnapshot,
    node: &ElementNode,
    targets: &[(NodeId, Rect)],
    minimum: f32,
) -> bool {
    let Some(name) = accessible_name(node) else {
        return false;
    };
    targets.iter().any(|&(other_id, other_bounds)| {
        other_id != node.id
            && other_bounds.width >= minimum
            && other_bounds.height >= minimum
            && snapshot
                .get(other_id)
                .and_then(accessible_name)
                .is_some_and(|other_name| other_name == name)
    })
}

/// The 24px-circle spacing test: the circle centered on the undersized
/// target must not reach another target, nor another undersized target's
/// circle.
fn spacing_compensates(
    id: NodeId,
    bounds: Rect,
    targets: &[(NodeId, Rect)],
    minimum: f32,
) -> bool {
    let radius = minimum / 2.0;
    let (cx, cy) = bounds.center();
    for &(other_id, other_bounds) in targets {
        if other_id == id {
            continue;
        }
        let other_undersized =
            other_bounds.width < minimum || other_bounds.height < minimum;
        if other_undersized {
            if bounds.center_distance(&other_bounds) < minimum {
                return false;
            }
        } else if distance_to_rect(cx, cy, &other_bounds) < radius {
            return false;
        }
    }
    true
}

/// Distance from a point to the nearest edge of a rectangle (zero inside).
fn distance_to_rect(px: f32, py: f32, rect: &Rect) -> f32 {
    let dx = (rect.x - px).max(0.0).max(px - rect.right());
    let dy = (rect.y - py).max(0.0).max(py - rect.bottom());
    (dx * dx + dy * dy).sqrt()
}
