//! Violation attribution.
//!
//! Resolves rule-engine evidence nodes against the DOM-to-component index,
//! attaching component paths, a generated selector, and a display snippet.
//! An unresolvable target is not an error: the element may have been
//! removed after the snapshot was taken, or rendered outside the inspected
//! runtime. Such nodes degrade to `component: None` with empty paths.

use serde::{Deserialize, Serialize};
use tracing::debug;

use pagescan_core::{AuditConfig, Impact};

use crate::component::filter::{is_framework_component, user_path};
use crate::component::DomComponentIndex;
use crate::dom::selector::{generate_selector, resolve_first};
use crate::dom::snippet::extract_snippet;
use crate::dom::DomSnapshot;

use super::types::{RawRuleNode, RawRuleResult, RuleCheck};

/// Rule-engine evidence node extended with attribution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributedNode {
    pub html: String,
    pub target: Vec<String>,
    pub failure_summary: Option<String>,
    pub checks: Vec<RuleCheck>,
    /// Leaf-most user-facing component name, when the target resolved.
    pub component: Option<String>,
    /// Unfiltered ancestor chain, root → leaf.
    pub component_path: Vec<String>,
    /// Noise-filtered chain shown to users.
    pub user_component_path: Vec<String>,
    pub css_selector: Option<String>,
    pub html_snippet: Option<String>,
    pub is_framework_component: bool,
}

/// One rule outcome with attributed evidence nodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributedRuleResult {
    pub id: String,
    pub impact: Option<Impact>,
    pub tags: Vec<String>,
    pub description: String,
    pub help: String,
    pub help_url: String,
    pub nodes: Vec<AttributedNode>,
}

impl AttributedRuleResult {
    /// Number of evidence instances this result carries.
    pub fn instance_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Resolves rule results against the component index.
pub struct AttributionEngine<'a> {
    config: &'a AuditConfig,
}

impl<'a> AttributionEngine<'a> {
    pub fn new(config: &'a AuditConfig) -> Self {
        Self { config }
    }

    /// Full attribution for violations: paths, selector, and snippet.
    pub fn attribute_violations(
        &self,
        results: &[RawRuleResult],
        snapshot: &DomSnapshot,
        index: &DomComponentIndex,
    ) -> Vec<AttributedRuleResult> {
        self.attribute(results, snapshot, index, true)
    }

    /// Light attribution for passes and incompletes: component and paths
    /// only — they are not primary failure evidence.
    pub fn attribute_light(
        &self,
        results: &[RawRuleResult],
        snapshot: &DomSnapshot,
        index: &DomComponentIndex,
    ) -> Vec<AttributedRuleResult> {
        self.attribute(results, snapshot, index, false)
    }

    fn attribute(
        &self,
        results: &[RawRuleResult],
        snapshot: &DomSnapshot,
        index: &DomComponentIndex,
        full: bool,
    ) -> Vec<AttributedRuleResult> {
        results
            .iter()
            .map(|result| AttributedRuleResult {
                id: result.id.clone(),
                impact: result.impact,
                tags: result.tags.clone(),
                description: result.description.clone(),
                help: result.help.clone(),
                help_url: result.help_url.clone(),
                nodes: result
                    .nodes
                    .iter()
                    .map(|node| self.attribute_node(&result.id, node, snapshot, index, full))
                    .collect(),
            })
            .collect()
    }

    fn attribute_node(
        &self,
        rule_id: &str,
        node: &RawRuleNode,
        snapshot: &DomSnapshot,
        index: &DomComponentIndex,
        full: bool,
    ) -> AttributedNode {
        let mut attributed = AttributedNode {
            html: node.html.clone(),
            target: node.target.clone(),
            failure_summary: node.failure_summary.clone(),
            checks: node.checks.clone(),
            ..AttributedNode::default()
        };

        // First matching element wins when a selector matches several.
        let resolved = node
            .primary_target()
            .and_then(|selector| resolve_first(snapshot, selector));

        let Some(element_id) = resolved else {
            debug!(rule = rule_id, target = ?node.target, "target selector did not resolve");
            return attributed;
        };

        match index.lookup(element_id) {
            Some(raw_path) => {
                let filtered = user_path(raw_path, &self.config.filter);
                attributed.is_framework_component =
                    is_framework_component(raw_path, &self.config.filter);
                attributed.component = filtered.last().cloned();
                attributed.component_path = raw_path.to_vec();
                attributed.user_component_path = filtered;
            }
            None => {
                // Expected degraded state: the element exists but was not
                // rendered by the inspected runtime.
                debug!(rule = rule_id, node = element_id.index(), "element missing from index");
            }
        }

        if full {
            attributed.css_selector =
                Some(generate_selector(snapshot, element_id, &self.config.selector));
            let html = if node.html.is_empty() {
                snapshot.get(element_id).map(|n| n.html.as_str()).unwrap_or_default()
            } else {
                node.html.as_str()
            };
            attributed.html_snippet = Some(extract_snippet(html, self.config.snippet.max_length));
        }

        attributed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::walker::walk;
    use crate::component::RuntimeNode;
    use crate::dom::ElementBuilder;
    use pagescan_core::config::TraversalConfig;

    fn fixture() -> (DomSnapshot, DomComponentIndex) {
        let mut snap = DomSnapshot::new();
        let root = snap.add(None, ElementBuilder::new("body"));
        let nav = snap.add(Some(root), ElementBuilder::new("nav"));
        let button = snap.add(Some(nav), ElementBuilder::new("button").class("icon"));

        let tree = RuntimeNode::component("Header").with_child(
            RuntimeNode::component("Nav").with_dom(nav).with_child(
                RuntimeNode::component("IconButton").with_dom(button),
            ),
        );
        let outcome = walk(&tree, &TraversalConfig::default());
        let index = DomComponentIndex::build(&outcome.descriptors);
        (snap, index)
    }

    fn violation(target: &str) -> RawRuleResult {
        RawRuleResult {
            id: "button-name".into(),
            impact: Some(Impact::Critical),
            tags: vec!["wcag2a".into()],
            nodes: vec![RawRuleNode {
                html: "<button class=\"icon\">".into(),
                target: vec![target.into()],
                failure_summary: Some("Element has no accessible name".into()),
                ..RawRuleNode::default()
            }],
            ..RawRuleResult::default()
        }
    }

    #[test]
    fn test_violation_gets_full_attribution() {
        let (snap, index) = fixture();
        let config = AuditConfig::default();
        let engine = AttributionEngine::new(&config);

        let attributed =
            engine.attribute_violations(&[violation("button.icon")], &snap, &index);
        let node = &attributed[0].nodes[0];

        assert_eq!(
            node.component_path,
            vec!["Header".to_string(), "Nav".into(), "IconButton".into()]
        );
        assert_eq!(node.user_component_path, node.component_path);
        assert_eq!(node.component.as_deref(), Some("IconButton"));
        assert!(!node.is_framework_component);
        assert!(node.css_selector.is_some());
        assert_eq!(node.html_snippet.as_deref(), Some("<button class=\"icon\">"));
    }

    #[test]
    fn test_unresolvable_target_degrades() {
        let (snap, index) = fixture();
        let config = AuditConfig::default();
        let engine = AttributionEngine::new(&config);

        let attributed =
            engine.attribute_violations(&[violation("#does-not-exist")], &snap, &index);
        let node = &attributed[0].nodes[0];

        assert_eq!(node.component, None);
        assert!(node.component_path.is_empty());
        assert!(node.user_component_path.is_empty());
        assert!(node.css_selector.is_none());
    }

    #[test]
    fn test_element_outside_index_degrades() {
        let (mut snap, index) = fixture();
        // Injected by a third-party script: present in the DOM, absent
        // from the component tree.
        snap.add(snap.root(), ElementBuilder::new("iframe").id("ads"));

        let config = AuditConfig::default();
        let engine = AttributionEngine::new(&config);
        let attributed = engine.attribute_violations(&[violation("#ads")], &snap, &index);
        let node = &attributed[0].nodes[0];

        assert_eq!(node.component, None);
        assert!(node.component_path.is_empty());
        // Selector and snippet still attach; the element itself exists.
        assert_eq!(node.css_selector.as_deref(), Some("#ads"));
    }

    #[test]
    fn test_light_attribution_skips_display_fields() {
        let (snap, index) = fixture();
        let config = AuditConfig::default();
        let engine = AttributionEngine::new(&config);

        let attributed = engine.attribute_light(&[violation("button.icon")], &snap, &index);
        let node = &attributed[0].nodes[0];

        assert_eq!(node.component.as_deref(), Some("IconButton"));
        assert!(node.css_selector.is_none());
        assert!(node.html_snippet.is_none());
    }
}
