//! Rule-engine records and violation attribution.

pub mod attribution;
pub mod types;

pub use attribution::{AttributedNode, AttributedRuleResult, AttributionEngine};
pub use types::{RawRuleNode, RawRuleResult, RuleCheck, RuleResultSet};
