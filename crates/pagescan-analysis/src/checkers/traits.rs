//! Checker trait and the closed checker set.

use pagescan_core::{AuditConfig, CheckerError};

use crate::dom::DomSnapshot;

use super::auth::AccessibleAuthChecker;
use super::dragging::DraggingChecker;
use super::focus_appearance::FocusAppearanceChecker;
use super::focus_obscured::FocusObscuredChecker;
use super::target_size::TargetSizeChecker;
use super::types::StructuralViolation;

/// Contract every structural checker implements.
///
/// Checkers are pure over the frozen snapshot: same snapshot and config,
/// same findings.
pub trait StructuralChecker {
    /// Which member of the closed set this is.
    fn kind(&self) -> StructuralCheckerKind;

    /// Run the check. Errors are isolated by the aggregator; they never
    /// abort sibling checkers.
    fn check(
        &self,
        snapshot: &DomSnapshot,
        config: &AuditConfig,
    ) -> Result<Vec<StructuralViolation>, CheckerError>;
}

/// The closed set of structural checkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralCheckerKind {
    TargetSize,
    FocusObscured,
    FocusAppearance,
    Dragging,
    AccessibleAuth,
}

impl StructuralCheckerKind {
    pub fn all() -> &'static [StructuralCheckerKind] {
        &[
            Self::TargetSize,
            Self::FocusObscured,
            Self::FocusAppearance,
            Self::Dragging,
            Self::AccessibleAuth,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TargetSize => "target-size",
            Self::FocusObscured => "focus-obscured",
            Self::FocusAppearance => "focus-appearance",
            Self::Dragging => "dragging-movement",
            Self::AccessibleAuth => "accessible-authentication",
        }
    }

    /// Instantiate the checker for this variant.
    pub fn checker(&self) -> Box<dyn StructuralChecker> {
        match self {
            Self::TargetSize => Box::new(TargetSizeChecker),
            Self::FocusObscured => Box::new(FocusObscuredChecker),
            Self::FocusAppearance => Box::new(FocusAppearanceChecker),
            Self::Dragging => Box::new(DraggingChecker),
            Self::AccessibleAuth => Box::new(AccessibleAuthChecker),
        }
    }
}
