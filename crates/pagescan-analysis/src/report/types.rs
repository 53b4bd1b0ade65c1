//! Report records.

use serde::{Deserialize, Serialize};

use pagescan_core::types::collections::BTreeMap;
use pagescan_core::{Impact, WcagLevel};

use crate::checkers::StructuralViolation;
use crate::rules::AttributedRuleResult;

/// Non-fatal diagnostic attached to the report.
///
/// Diagnostics are visible to consumers but never block consumption of
/// partial results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Pipeline phase or checker identity that produced the condition.
    pub phase: String,
    pub message: String,
    pub stack: Option<String>,
    pub recoverable: bool,
}

impl Diagnostic {
    pub fn recoverable(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            message: message.into(),
            stack: None,
            recoverable: true,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

/// Instance counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub serious: usize,
    pub moderate: usize,
    pub minor: usize,
}

impl SeverityCounts {
    pub fn add(&mut self, impact: Impact, instances: usize) {
        match impact {
            Impact::Critical => self.critical += instances,
            Impact::Serious => self.serious += instances,
            Impact::Moderate => self.moderate += instances,
            Impact::Minor => self.minor += instances,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.serious + self.moderate + self.minor
    }
}

/// Instance counts per conformance level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub a: usize,
    pub aa: usize,
    pub aaa: usize,
}

impl LevelCounts {
    pub fn add(&mut self, level: WcagLevel, instances: usize) {
        match level {
            WcagLevel::A => self.a += instances,
            WcagLevel::AA => self.aa += instances,
            WcagLevel::AAA => self.aaa += instances,
        }
    }
}

/// Component-tree coverage counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCounts {
    /// Descriptors produced by the traversal pass.
    pub total: usize,
    /// Distinct components owning at least one violation instance.
    pub with_violations: usize,
}

/// Aggregated counts for one scan. Never persisted beyond the scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub severity: SeverityCounts,
    /// Instance counts per raw level tag. A result carrying several level
    /// tags increments every one of them; these are coverage counters, not
    /// deduplicated defect counts.
    pub level_tags: BTreeMap<String, usize>,
    pub by_level: LevelCounts,
    pub components: ComponentCounts,
    pub rule_violation_instances: usize,
    pub structural_violations: usize,
}

/// Summary of the structural WCAG 2.2 checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wcag22Summary {
    pub total_violations: usize,
    pub by_level: LevelCounts,
    pub by_criterion: BTreeMap<String, usize>,
}

/// Structural checker results, grouped per criterion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wcag22Results {
    pub by_criterion: BTreeMap<String, Vec<StructuralViolation>>,
    pub summary: Wcag22Summary,
}

/// The single merged output of one scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub violations: Vec<AttributedRuleResult>,
    pub passes: Vec<AttributedRuleResult>,
    pub incomplete: Vec<AttributedRuleResult>,
    pub wcag22: Wcag22Results,
    /// Keyboard-navigation results from the external collaborator, merged
    /// as-is.
    pub keyboard: Option<serde_json::Value>,
    pub summary: ScanSummary,
    pub diagnostics: Vec<Diagnostic>,
}
