//! Audit engine entry point.
//!
//! One call per scan: validates the inputs, walks the component tree,
//! builds the index, attributes the rule results, runs the structural
//! checkers, and aggregates everything into a single report. Only missing
//! inputs abort the scan; every downstream condition degrades to a
//! diagnostic on the report.

use tracing::info;

use pagescan_core::errors::error_code::ErrorCode;
use pagescan_core::{AuditConfig, AuditError};

use crate::component::walker::walk;
use crate::component::{DomComponentIndex, RuntimeNode};
use crate::dom::DomSnapshot;
use crate::report::{Aggregator, AuditReport, Diagnostic};
use crate::rules::{AttributionEngine, RuleResultSet};

/// Everything one scan consumes. All inputs are materialized before the
/// engine runs; the engine itself performs no I/O and never suspends.
pub struct AuditInputs<'a> {
    /// Component tree handle from the runtime introspector, if a runtime
    /// was detected.
    pub tree: Option<&'a RuntimeNode>,
    pub snapshot: &'a DomSnapshot,
    /// Rule-engine result set, if the rule engine ran.
    pub rule_results: Option<&'a RuleResultSet>,
    /// Keyboard-navigation results from the external collaborator.
    pub keyboard: Option<serde_json::Value>,
}

pub struct AuditEngine {
    config: AuditConfig,
}

impl AuditEngine {
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Run one scan. A report is always produced unless an input is
    /// missing entirely.
    pub fn run(&self, inputs: AuditInputs<'_>) -> Result<AuditReport, AuditError> {
        let tree = inputs.tree.ok_or(AuditError::NoComponentTree)?;
        let rule_results = inputs.rule_results.ok_or(AuditError::RuleEngineUnavailable)?;
        if inputs.snapshot.is_empty() {
            return Err(AuditError::EmptySnapshot);
        }

        let mut diagnostics: Vec<Diagnostic> = Vec::new();

        let outcome = walk(tree, &self.config.traversal);
        for truncation in &outcome.truncations {
            diagnostics.push(Diagnostic::recoverable("traversal", truncation.code_string()));
        }

        let index = DomComponentIndex::build(&outcome.descriptors);
        info!(
            descriptors = outcome.descriptors.len(),
            indexed = index.len(),
            truncated = outcome.is_truncated(),
            "component index built"
        );

        let attribution = AttributionEngine::new(&self.config);
        let violations =
            attribution.attribute_violations(&rule_results.violations, inputs.snapshot, &index);
        let passes = attribution.attribute_light(&rule_results.passes, inputs.snapshot, &index);
        let incomplete =
            attribution.attribute_light(&rule_results.incomplete, inputs.snapshot, &index);

        let aggregator = Aggregator::new(&self.config);
        let (structural, checker_diagnostics) = aggregator.run_checkers(inputs.snapshot);
        diagnostics.extend(checker_diagnostics);

        Ok(aggregator.build_report(
            violations,
            passes,
            incomplete,
            structural,
            inputs.keyboard,
            index.stats(),
            diagnostics,
        ))
    }
}
