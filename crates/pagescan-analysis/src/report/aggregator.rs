//! Results aggregation.
//!
//! Runs the structural checkers inside individual failure boundaries and
//! merges their findings with the attributed rule results and the external
//! keyboard-navigation results into one report. A checker failure — an
//! `Err` or a panic — is recorded as a diagnostic tagged with the checker's
//! identity; the remaining checkers always run.

use std::panic::{self, AssertUnwindSafe};

use tracing::{info, warn};
use xxhash_rust::xxh3::xxh3_64;

use pagescan_core::errors::error_code::ErrorCode;
use pagescan_core::types::collections::{FxHashSet, BTreeMap};
use pagescan_core::AuditConfig;

use crate::checkers::{StructuralChecker, StructuralCheckerKind, StructuralViolation};
use crate::component::IndexStats;
use crate::dom::DomSnapshot;
use crate::rules::AttributedRuleResult;

use super::types::{
    AuditReport, ComponentCounts, Diagnostic, LevelCounts, ScanSummary, Wcag22Results,
    Wcag22Summary,
};

pub struct Aggregator<'a> {
    config: &'a AuditConfig,
}

impl<'a> Aggregator<'a> {
    pub fn new(config: &'a AuditConfig) -> Self {
        Self { config }
    }

    /// Run the full closed checker set, isolating failures.
    pub fn run_checkers(
        &self,
        snapshot: &DomSnapshot,
    ) -> (Vec<StructuralViolation>, Vec<Diagnostic>) {
        let checkers: Vec<Box<dyn StructuralChecker>> = StructuralCheckerKind::all()
            .iter()
            .map(|kind| kind.checker())
            .collect();
        self.run_checker_set(&checkers, snapshot)
    }

    /// Run an explicit checker set. Each checker executes inside its own
    /// failure boundary; an `Err` or a panic becomes a diagnostic tagged
    /// with the checker's identity and the remaining checkers proceed.
    pub fn run_checker_set(
        &self,
        checkers: &[Box<dyn StructuralChecker>],
        snapshot: &DomSnapshot,
    ) -> (Vec<StructuralViolation>, Vec<Diagnostic>) {
        let mut violations = Vec::new();
        let mut diagnostics = Vec::new();
        let mut seen: FxHashSet<u64> = FxHashSet::default();

        for checker in checkers {
            let name = checker.kind().name();
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| checker.check(snapshot, self.config)));
            match outcome {
                Ok(Ok(found)) => {
                    for violation in found {
                        // One finding per (checker, element, detail) triple.
                        let key = xxh3_64(
                            format!(
                                "{}\u{1f}{}\u{1f}{}",
                                violation.id,
                                violation.element.index(),
                                violation.details
                            )
                            .as_bytes(),
                        );
                        if seen.insert(key) {
                            violations.push(violation);
                        }
                    }
                }
                Ok(Err(error)) => {
                    warn!(checker = name, %error, "structural checker failed");
                    diagnostics.push(Diagnostic::recoverable(name, error.code_string()));
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!(checker = name, message = %message, "structural checker panicked");
                    diagnostics.push(
                        Diagnostic::recoverable(name, format!("checker panicked: {message}"))
                            .with_stack(message),
                    );
                }
            }
        }

        (violations, diagnostics)
    }

    /// Assemble the final report from all sources.
    #[allow(clippy::too_many_arguments)]
    pub fn build_report(
        &self,
        mut violations: Vec<AttributedRuleResult>,
        passes: Vec<AttributedRuleResult>,
        incomplete: Vec<AttributedRuleResult>,
        structural: Vec<StructuralViolation>,
        keyboard: Option<serde_json::Value>,
        index_stats: IndexStats,
        diagnostics: Vec<Diagnostic>,
    ) -> AuditReport {
        let summary = self.summarize(&violations, &structural, index_stats);
        let wcag22 = group_structural(structural);

        // Bound the instance lists retained per rule for display.
        let max_instances = self.config.display.max_instances;
        for result in &mut violations {
            if result.nodes.len() > max_instances {
                result.nodes.truncate(max_instances);
            }
        }

        info!(
            rule_instances = summary.rule_violation_instances,
            structural = summary.structural_violations,
            components = summary.components.total,
            "scan aggregation complete"
        );

        AuditReport {
            violations,
            passes,
            incomplete,
            wcag22,
            keyboard,
            summary,
            diagnostics,
        }
    }

    fn summarize(
        &self,
        violations: &[AttributedRuleResult],
        structural: &[StructuralViolation],
        index_stats: IndexStats,
    ) -> ScanSummary {
        let mut summary = ScanSummary::default();
        let mut components_hit: FxHashSet<&str> = FxHashSet::default();

        for result in violations {
            let instances = result.instance_count();
            summary.rule_violation_instances += instances;
            if let Some(impact) = result.impact {
                summary.severity.add(impact, instances);
            }
            // Tag-driven: one result feeds every level tag it carries.
            for tag in &result.tags {
                if let Some(level) = pagescan_core::WcagLevel::from_tag(tag) {
                    *summary.level_tags.entry(tag.clone()).or_insert(0) += instances;
                    summary.by_level.add(level, instances);
                }
            }
            for node in &result.nodes {
                if let Some(component) = node.component.as_deref() {
                    components_hit.insert(component);
                }
            }
        }

        for violation in structural {
            summary.structural_violations += 1;
            summary.severity.add(violation.impact, 1);
            summary.by_level.add(violation.level, 1);
        }

        summary.components = ComponentCounts {
            total: index_stats.walked_descriptors,
            with_violations: components_hit.len(),
        };
        summary
    }
}

/// Group structural findings per criterion with a per-criterion summary.
fn group_structural(structural: Vec<StructuralViolation>) -> Wcag22Results {
    let mut by_criterion: BTreeMap<String, Vec<StructuralViolation>> = BTreeMap::new();
    let mut summary = Wcag22Summary::default();
    let mut by_level = LevelCounts::default();

    for violation in structural {
        summary.total_violations += 1;
        by_level.add(violation.level, 1);
        *summary
            .by_criterion
            .entry(violation.criterion.name().to_string())
            .or_insert(0) += 1;
        by_criterion
            .entry(violation.criterion.name().to_string())
            .or_default()
            .push(violation);
    }

    summary.by_level = by_level;
    Wcag22Results { by_criterion, summary }
}

/// Best-effort extraction of a panic payload message.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
