//! Structural violation records.

use serde::{Deserialize, Serialize};

use pagescan_core::{AuditConfig, Impact, NodeId, WcagLevel};

use crate::dom::selector::generate_selector;
use crate::dom::snippet::extract_snippet;
use crate::dom::DomSnapshot;

/// The WCAG 2.2 success criteria the structural checkers cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Criterion {
    TargetSize,
    FocusObscured,
    FocusAppearance,
    DraggingMovement,
    AccessibleAuthentication,
}

impl Criterion {
    pub fn all() -> &'static [Criterion] {
        &[
            Self::TargetSize,
            Self::FocusObscured,
            Self::FocusAppearance,
            Self::DraggingMovement,
            Self::AccessibleAuthentication,
        ]
    }

    /// Success criterion number in WCAG 2.2.
    pub fn reference(&self) -> &'static str {
        match self {
            Self::TargetSize => "2.5.8",
            Self::FocusObscured => "2.4.11",
            Self::FocusAppearance => "2.4.13",
            Self::DraggingMovement => "2.5.7",
            Self::AccessibleAuthentication => "3.3.8",
        }
    }

    /// Fixed conformance level of the criterion.
    pub fn level(&self) -> WcagLevel {
        match self {
            Self::FocusAppearance => WcagLevel::AAA,
            _ => WcagLevel::AA,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TargetSize => "target-size",
            Self::FocusObscured => "focus-obscured",
            Self::FocusAppearance => "focus-appearance",
            Self::DraggingMovement => "dragging-movement",
            Self::AccessibleAuthentication => "accessible-authentication",
        }
    }
}

/// One structural finding, attached directly to a DOM node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralViolation {
    /// Finding identifier, `<criterion-name>` plus a discriminator.
    pub id: String,
    pub criterion: Criterion,
    pub level: WcagLevel,
    pub element: NodeId,
    pub selector: String,
    pub html: String,
    pub impact: Impact,
    pub details: String,
    /// Criterion-specific exception that downgraded this finding, when the
    /// checker is configured to report suppressed candidates.
    pub exception: Option<String>,
}

impl StructuralViolation {
    /// Build a finding for `element`, deriving selector, snippet, and level
    /// from the snapshot and the criterion.
    pub fn new(
        criterion: Criterion,
        element: NodeId,
        snapshot: &DomSnapshot,
        config: &AuditConfig,
        impact: Impact,
        details: impl Into<String>,
    ) -> Self {
        let selector = generate_selector(snapshot, element, &config.selector);
        let html = snapshot
            .get(element)
            .map(|node| extract_snippet(&node.html, config.snippet.max_length))
            .unwrap_or_default();
        Self {
            id: criterion.name().to_string(),
            criterion,
            level: criterion.level(),
            element,
            selector,
            html,
            impact,
            details: details.into(),
            exception: None,
        }
    }

    pub fn with_exception(mut self, exception: &str) -> Self {
        self.exception = Some(exception.to_string());
        self
    }
}
