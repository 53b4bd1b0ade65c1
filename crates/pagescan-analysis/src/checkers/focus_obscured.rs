//! Focus obscured checker (WCAG 2.4.11, level AA).
//!
//! Detects the focused element being visually covered by a sticky or fixed
//! overlay (cookie banners, frozen headers, bottom bars). Full coverage is
//! serious; partial coverage is moderate. Overlays that contain the focused
//! element as a descendant do not obscure it.

use pagescan_core::{AuditConfig, CheckerError, Impact};

use crate::dom::DomSnapshot;

use super::traits::{StructuralChecker, StructuralCheckerKind};
use super::types::{Criterion, StructuralViolation};

pub struct FocusObscuredChecker;

impl StructuralChecker for FocusObscuredChecker {
    fn kind(&self) -> StructuralCheckerKind {
        StructuralCheckerKind::FocusObscured
    }

    fn check(
        &self,
        snapshot: &DomSnapshot,
        config: &AuditConfig,
    ) -> Result<Vec<StructuralViolation>, CheckerError> {
        let Some(focused) = snapshot.focused() else {
            return Ok(Vec::new());
        };
        let Some(focused_bounds) = focused.bounds else {
            return Ok(Vec::new());
        };
        if focused_bounds.is_empty() {
            return Ok(Vec::new());
        }

        let ancestors = snapshot.ancestors(focused.id);
        let mut violations = Vec::new();

        for id in snapshot.document_order() {
            if id == focused.id || ancestors.contains(&id) {
                continue;
            }
            let Some(node) = snapshot.get(id) else {
                continue;
            };
            let sticky = matches!(node.style.position.as_deref(), Some("sticky") | Some("fixed"));
            if !sticky {
                continue;
            }
            let Some(overlay_bounds) = node.bounds else {
                continue;
            };
            if !overlay_bounds.intersects(&focused_bounds) {
                continue;
            }

            let fully_covered = overlay_bounds.contains(&focused_bounds);
            let (impact, coverage) = if fully_covered {
                (Impact::Serious, "entirely hidden")
            } else {
                (Impact::Moderate, "partially obscured")
            };
            violations.push(StructuralViolation::new(
                Criterion::FocusObscured,
                focused.id,
                snapshot,
                config,
                impact,
                format!(
                    "focused element is {coverage} by a {} overlay ({})",
                    node.style.position.as_deref().unwrap_or("fixed"),
                    node.tag
                ),
            ));
        }

        Ok(violations)
    }
}
