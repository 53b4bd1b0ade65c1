//! pagescan-analysis: the component attribution pipeline.
//!
//! This crate turns a frozen page snapshot plus a rule-engine result set
//! into a normalized, component-attributed accessibility report:
//! - Dom: snapshot model, stable selector generation, snippet extraction
//! - Component: tree walking, name resolution, DOM-to-component indexing
//! - Rules: rule-engine record model and violation attribution
//! - Checkers: five fault-isolated structural accessibility checks
//! - Report: aggregation into one summary with severity and WCAG buckets
//!
//! Data flows one direction: walker → index → (attribution ∥ checkers) →
//! aggregator. The pipeline is synchronous and allocates nothing that
//! outlives one scan.

pub mod audit;
pub mod checkers;
pub mod component;
pub mod dom;
pub mod report;
pub mod rules;

// Re-exports for convenience
pub use audit::{AuditEngine, AuditInputs};
pub use checkers::{
    Criterion, StructuralChecker, StructuralCheckerKind, StructuralViolation,
};
pub use component::{
    ComponentDescriptor, ComponentKind, DomComponentIndex, IndexStats, RuntimeNode, WalkOutcome,
};
pub use dom::{ComputedStyle, DomSnapshot, ElementBuilder, ElementNode};
pub use report::{AuditReport, Diagnostic, ScanSummary, Wcag22Results};
pub use rules::{
    AttributedNode, AttributedRuleResult, AttributionEngine, RawRuleNode, RawRuleResult,
    RuleResultSet,
};
