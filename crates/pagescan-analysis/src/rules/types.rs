//! Rule-engine result records.
//!
//! The shape mirrors the rule engine's JSON output: one record per rule,
//! carrying the DOM evidence nodes it matched. Field names follow the
//! engine's camelCase wire format.

use serde::{Deserialize, Serialize};

use pagescan_core::Impact;

/// One check that contributed to a rule outcome on one element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleCheck {
    pub id: String,
    pub impact: Option<Impact>,
    pub message: String,
}

/// Unit of evidence produced by the rule engine for one rule on one
/// element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRuleNode {
    pub html: String,
    /// Target selectors, outermost frame first.
    pub target: Vec<String>,
    pub failure_summary: Option<String>,
    pub checks: Vec<RuleCheck>,
}

impl RawRuleNode {
    /// The selector used for attribution: the innermost target.
    pub fn primary_target(&self) -> Option<&str> {
        self.target.last().map(|s| s.as_str())
    }
}

/// One rule outcome with all its evidence nodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRuleResult {
    pub id: String,
    pub impact: Option<Impact>,
    pub tags: Vec<String>,
    pub description: String,
    pub help: String,
    pub help_url: String,
    pub nodes: Vec<RawRuleNode>,
}

/// The full rule-engine result set for one scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleResultSet {
    pub violations: Vec<RawRuleResult>,
    pub passes: Vec<RawRuleResult>,
    pub incomplete: Vec<RawRuleResult>,
    pub inapplicable: Vec<RawRuleResult>,
}

impl RuleResultSet {
    /// Total evidence-node instances across the violation records.
    pub fn violation_instances(&self) -> usize {
        self.violations.iter().map(|r| r.nodes.len()).sum()
    }
}
