//! Report assembly: merged results, summaries, and diagnostics.

pub mod aggregator;
pub mod types;

pub use aggregator::Aggregator;
pub use types::{
    AuditReport, ComponentCounts, Diagnostic, LevelCounts, ScanSummary, SeverityCounts,
    Wcag22Results, Wcag22Summary,
};
