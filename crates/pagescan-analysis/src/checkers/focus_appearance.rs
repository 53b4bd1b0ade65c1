//! Focus appearance checker (WCAG 2.4.13, level AAA).
//!
//! Validates the focus indicator of the currently focused element: it must
//! exist (outline or box shadow), be at least the configured thickness, and
//! contrast at least 3:1 with the background it is drawn against. Colors
//! that cannot be parsed leave the contrast unverified rather than flagged.

use pagescan_core::{AuditConfig, CheckerError, Impact};

use crate::dom::{DomSnapshot, ElementNode};

use super::color::{contrast_ratio, parse_color};
use super::traits::{StructuralChecker, StructuralCheckerKind};
use super::types::{Criterion, StructuralViolation};

pub struct FocusAppearanceChecker;

impl StructuralChecker for FocusAppearanceChecker {
    fn kind(&self) -> StructuralCheckerKind {
        StructuralCheckerKind::FocusAppearance
    }

    fn check(
        &self,
        snapshot: &DomSnapshot,
        config: &AuditConfig,
    ) -> Result<Vec<StructuralViolation>, CheckerError> {
        let Some(focused) = snapshot.focused() else {
            return Ok(Vec::new());
        };

        let mut violations = Vec::new();
        let style = &focused.style;
        let outline_visible = style.outline_style.as_deref() != Some("none")
            && style.outline_width.unwrap_or(0.0) > 0.0;
        let has_shadow = style
            .box_shadow
            .as_deref()
            .is_some_and(|s| !s.is_empty() && s != "none");

        if !outline_visible && !has_shadow {
            violations.push(StructuralViolation::new(
                Criterion::FocusAppearance,
                focused.id,
                snapshot,
                config,
                Impact::Serious,
                "focused element has no visible focus indicator",
            ));
            return Ok(violations);
        }

        if outline_visible {
            let width = style.outline_width.unwrap_or(0.0);
            let minimum = config.checkers.min_focus_outline_width;
            if width < minimum {
                violations.push(StructuralViolation::new(
                    Criterion::FocusAppearance,
                    focused.id,
                    snapshot,
                    config,
                    Impact::Moderate,
                    format!("focus outline is {width:.1}px, minimum is {minimum:.1}px"),
                ));
            }

            if let (Some(outline), Some(background)) = (
                style.outline_color.as_deref().and_then(parse_color),
                effective_background(snapshot, focused),
            ) {
                let ratio = contrast_ratio(outline, background);
                let minimum = config.checkers.min_focus_contrast;
                if ratio < minimum {
                    violations.push(StructuralViolation::new(
                        Criterion::FocusAppearance,
                        focused.id,
                        snapshot,
                        config,
                        Impact::Serious,
                        format!(
                            "focus indicator contrast is {ratio:.2}:1, minimum is {minimum:.1}:1"
                        ),
                    ));
                }
            }
        }

        Ok(violations)
    }
}

/// The background the indicator is drawn against: the nearest opaque
/// background color on the element or its ancestors.
fn effective_background(
    snapshot: &DomSnapshot,
    node: &ElementNode,
) -> Option<super::color::Color> {
    let own = node.style.background_color.as_deref().and_then(parse_color);
    if let Some(color) = own {
        if color.a > 0.0 {
            return Some(color);
        }
    }
    for ancestor_id in snapshot.ancestors(node.id) {
        let ancestor = snapshot.get(ancestor_id)?;
        if let Some(color) = ancestor.style.background_color.as_deref().and_then(parse_color) {
            if color.a > 0.0 {
                return Some(color);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ComputedStyle, ElementBuilder};

    fn focused_with_style(style: ComputedStyle) -> DomSnapshot {
        let mut snap = DomSnapshot::new();
        let root = snap.add(None, ElementBuilder::new("body"));
        snap.add(
            Some(root),
            ElementBuilder::new("button").focused().style(style).bounds(0.0, 0.0, 40.0, 40.0),
        );
        snap
    }

    fn check(snap: &DomSnapshot) -> Vec<StructuralViolation> {
        FocusAppearanceChecker
            .check(snap, &AuditConfig::default())
            .unwrap()
    }

    #[test]
    fn test_missing_indicator_flagged() {
        let snap = focused_with_style(ComputedStyle {
            outline_style: Some("none".into()),
            ..ComputedStyle::default()
        });
        let violations = check(&snap);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].level, pagescan_core::WcagLevel::AAA);
        assert!(violations[0].details.contains("no visible focus indicator"));
    }

    #[test]
    fn test_thin_outline_flagged() {
        let snap = focused_with_style(ComputedStyle {
            outline_style: Some("solid".into()),
            outline_width: Some(1.0),
            outline_color: Some("#000000".into()),
            background_color: Some("#ffffff".into()),
            ..ComputedStyle::default()
        });
        let violations = check(&snap);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].details.contains("1.0px"));
    }

    #[test]
    fn test_low_contrast_outline_flagged() {
        let snap = focused_with_style(ComputedStyle {
            outline_style: Some("solid".into()),
            outline_width: Some(2.0),
            outline_color: Some("#dddddd".into()),
            background_color: Some("#ffffff".into()),
            ..ComputedStyle::default()
        });
        let violations = check(&snap);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].details.contains("contrast"));
    }

    #[test]
    fn test_good_indicator_passes() {
        let snap = focused_with_style(ComputedStyle {
            outline_style: Some("solid".into()),
            outline_width: Some(2.0),
            outline_color: Some("#005fcc".into()),
            background_color: Some("#ffffff".into()),
            ..ComputedStyle::default()
        });
        assert!(check(&snap).is_empty());
    }

    #[test]
    fn test_box_shadow_counts_as_indicator() {
        let snap = focused_with_style(ComputedStyle {
            outline_style: Some("none".into()),
            box_shadow: Some("0 0 0 3px rgba(0, 95, 204, 1)".into()),
            ..ComputedStyle::default()
        });
        assert!(check(&snap).is_empty());
    }

    #[test]
    fn test_unparseable_colors_not_flagged() {
        let snap = focused_with_style(ComputedStyle {
            outline_style: Some("solid".into()),
            outline_width: Some(2.0),
            outline_color: Some("var(--focus-ring)".into()),
            background_color: Some("#ffffff".into()),
            ..ComputedStyle::default()
        });
        assert!(check(&snap).is_empty());
    }
}
