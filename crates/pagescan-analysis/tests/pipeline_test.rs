//! End-to-end pipeline tests: snapshot + component tree + rule results in,
//! attributed report out.

use pagescan_analysis::audit::{AuditEngine, AuditInputs};
use pagescan_analysis::component::RuntimeNode;
use pagescan_analysis::dom::{DomSnapshot, ElementBuilder};
use pagescan_analysis::rules::{RawRuleNode, RawRuleResult, RuleResultSet};
use pagescan_core::config::TraversalConfig;
use pagescan_core::{AuditConfig, AuditError, Impact, NodeId};

/// Snapshot: body > nav > button.icon, plus a detached ad iframe.
fn snapshot() -> (DomSnapshot, NodeId, NodeId) {
    let mut snap = DomSnapshot::new();
    let root = snap.add(None, ElementBuilder::new("body"));
    let nav = snap.add(Some(root), ElementBuilder::new("nav"));
    let button = snap.add(
        Some(nav),
        ElementBuilder::new("button").class("icon").bounds(0.0, 0.0, 32.0, 32.0),
    );
    snap.add(Some(root), ElementBuilder::new("iframe").id("ads"));
    (snap, nav, button)
}

/// Component tree: Header > Nav > IconButton, IconButton owns the button.
fn tree(nav: NodeId, button: NodeId) -> RuntimeNode {
    RuntimeNode::component("Header").with_child(
        RuntimeNode::component("Nav")
            .with_dom(nav)
            .with_child(RuntimeNode::component("IconButton").with_dom(button)),
    )
}

fn button_name_violation(target: &str, tags: &[&str]) -> RawRuleResult {
    RawRuleResult {
        id: "button-name".into(),
        impact: Some(Impact::Critical),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        description: "Buttons must have discernible text".into(),
        help: "Button has no accessible name".into(),
        help_url: "https://example.test/button-name".into(),
        nodes: vec![RawRuleNode {
            html: "<button class=\"icon\">".into(),
            target: vec![target.into()],
            failure_summary: Some("Element has no accessible name".into()),
            ..RawRuleNode::default()
        }],
    }
}

#[test]
fn test_violation_attributed_to_owning_component() {
    let (snap, nav, button) = snapshot();
    let tree = tree(nav, button);
    let rules = RuleResultSet {
        violations: vec![button_name_violation("button.icon", &["wcag2a"])],
        ..RuleResultSet::default()
    };

    let engine = AuditEngine::new(AuditConfig::default());
    let report = engine
        .run(AuditInputs {
            tree: Some(&tree),
            snapshot: &snap,
            rule_results: Some(&rules),
            keyboard: None,
        })
        .unwrap();

    let node = &report.violations[0].nodes[0];
    assert_eq!(
        node.component_path,
        vec!["Header".to_string(), "Nav".into(), "IconButton".into()]
    );
    assert_eq!(node.component.as_deref(), Some("IconButton"));
    assert!(node.css_selector.is_some());
    assert!(node.html_snippet.is_some());
    assert_eq!(report.summary.severity.critical, 1);
    assert_eq!(report.summary.components.with_violations, 1);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_target_outside_index_degrades_without_diagnostics() {
    let (snap, nav, button) = snapshot();
    let tree = tree(nav, button);
    let rules = RuleResultSet {
        violations: vec![button_name_violation("#ads", &["wcag2a"])],
        ..RuleResultSet::default()
    };

    let engine = AuditEngine::new(AuditConfig::default());
    let report = engine
        .run(AuditInputs {
            tree: Some(&tree),
            snapshot: &snap,
            rule_results: Some(&rules),
            keyboard: None,
        })
        .unwrap();

    let node = &report.violations[0].nodes[0];
    assert_eq!(node.component, None);
    assert!(node.component_path.is_empty());
    assert!(node.user_component_path.is_empty());
    // A miss is an expected degraded state, not an error.
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_dual_level_tags_increment_both_buckets() {
    let (snap, nav, button) = snapshot();
    let tree = tree(nav, button);
    let rules = RuleResultSet {
        violations: vec![button_name_violation("button.icon", &["wcag2a", "wcag21a"])],
        ..RuleResultSet::default()
    };

    let engine = AuditEngine::new(AuditConfig::default());
    let report = engine
        .run(AuditInputs {
            tree: Some(&tree),
            snapshot: &snap,
            rule_results: Some(&rules),
            keyboard: None,
        })
        .unwrap();

    assert_eq!(report.summary.level_tags["wcag2a"], 1);
    assert_eq!(report.summary.level_tags["wcag21a"], 1);
    // Both tags are level A, so the per-level bucket counts the result
    // once per tag it carries.
    assert_eq!(report.summary.by_level.a, 2);
}

#[test]
fn test_traversal_cap_records_diagnostic_but_scan_continues() {
    let (snap, nav, button) = snapshot();
    let mut tree = tree(nav, button);
    for i in 0..100 {
        tree = tree.with_child(RuntimeNode::component(&format!("Widget{i}")));
    }
    let rules = RuleResultSet::default();

    let mut config = AuditConfig::default();
    config.traversal = TraversalConfig {
        max_nodes: 10,
        ..TraversalConfig::default()
    };
    let engine = AuditEngine::new(config);
    let report = engine
        .run(AuditInputs {
            tree: Some(&tree),
            snapshot: &snap,
            rule_results: Some(&rules),
            keyboard: None,
        })
        .unwrap();

    assert_eq!(report.diagnostics.len(), 1);
    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.phase, "traversal");
    assert!(diagnostic.recoverable);
    assert!(diagnostic.message.contains("TRAVERSAL_ERROR"));
    assert_eq!(report.summary.components.total, 10);
}

#[test]
fn test_keyboard_results_merged_as_is() {
    let (snap, nav, button) = snapshot();
    let tree = tree(nav, button);
    let rules = RuleResultSet::default();
    let keyboard = serde_json::json!({
        "tabOrder": ["#ads", "button.icon"],
        "traps": []
    });

    let engine = AuditEngine::new(AuditConfig::default());
    let report = engine
        .run(AuditInputs {
            tree: Some(&tree),
            snapshot: &snap,
            rule_results: Some(&rules),
            keyboard: Some(keyboard.clone()),
        })
        .unwrap();

    assert_eq!(report.keyboard, Some(keyboard));
}

#[test]
fn test_empty_snapshot_is_fatal() {
    let snap = DomSnapshot::new();
    let tree = RuntimeNode::component("App");
    let rules = RuleResultSet::default();
    let engine = AuditEngine::new(AuditConfig::default());
    let err = engine
        .run(AuditInputs {
            tree: Some(&tree),
            snapshot: &snap,
            rule_results: Some(&rules),
            keyboard: None,
        })
        .unwrap_err();
    assert!(matches!(err, AuditError::EmptySnapshot));
}

#[test]
fn test_attribution_is_deterministic() {
    let (snap, nav, button) = snapshot();
    let tree = tree(nav, button);
    let rules = RuleResultSet {
        violations: vec![button_name_violation("button.icon", &["wcag2a", "wcag21a"])],
        ..RuleResultSet::default()
    };

    let engine = AuditEngine::new(AuditConfig::default());
    let run = || {
        let report = engine
            .run(AuditInputs {
                tree: Some(&tree),
                snapshot: &snap,
                rule_results: Some(&rules),
                keyboard: None,
            })
            .unwrap();
        serde_json::to_string(&report).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_report_serializes_with_camel_case_fields() {
    let (snap, nav, button) = snapshot();
    let tree = tree(nav, button);
    let rules = RuleResultSet {
        violations: vec![button_name_violation("button.icon", &["wcag2a"])],
        ..RuleResultSet::default()
    };

    let engine = AuditEngine::new(AuditConfig::default());
    let report = engine
        .run(AuditInputs {
            tree: Some(&tree),
            snapshot: &snap,
            rule_results: Some(&rules),
            keyboard: None,
        })
        .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("userComponentPath"));
    assert!(json.contains("cssSelector"));
    assert!(json.contains("byCriterion"));
}
