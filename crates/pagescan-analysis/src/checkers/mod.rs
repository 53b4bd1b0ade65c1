//! Structural accessibility checkers.
//!
//! Five geometric/behavioral checks the rule engine does not cover. Each is
//! a variant in a closed set, invoked uniformly by the aggregator through
//! the `StructuralChecker` contract and isolated in its own failure
//! boundary — one failing checker never affects its siblings.

pub mod auth;
pub mod color;
pub mod dragging;
pub mod focus_appearance;
pub mod focus_obscured;
pub mod target_size;
pub mod traits;
pub mod types;

pub use traits::{StructuralChecker, StructuralCheckerKind};
pub use types::{Criterion, StructuralViolation};

use crate::dom::ElementNode;

/// Whether an element is an interactive target.
///
/// Covers native interactive tags, interactive ARIA roles, click handlers,
/// and author-managed tab stops.
pub fn is_interactive(node: &ElementNode) -> bool {
    match node.tag.as_str() {
        "button" | "select" | "textarea" | "summary" => return true,
        "a" => return node.attr("href").is_some(),
        "input" => return node.attr("type") != Some("hidden"),
        _ => {}
    }
    if let Some(role) = node.attr("role") {
        if matches!(
            role,
            "button" | "link" | "checkbox" | "radio" | "switch" | "tab" | "menuitem" | "slider"
        ) {
            return true;
        }
    }
    if node.attr("onclick").is_some() {
        return true;
    }
    node.attr("tabindex")
        .and_then(|t| t.parse::<i32>().ok())
        .is_some_and(|t| t >= 0)
}

/// Accessible name approximation: `aria-label`, else trimmed text content.
pub fn accessible_name(node: &ElementNode) -> Option<String> {
    if let Some(label) = node.attr("aria-label") {
        let label = label.trim();
        if !label.is_empty() {
            return Some(label.to_string());
        }
    }
    node.text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
