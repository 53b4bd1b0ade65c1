//! Fatal input errors.

use super::error_code::{self, ErrorCode};

/// Errors that abort a scan before any result is produced.
///
/// These are the only errors that surface as `Err` from the engine entry
/// point. Everything downstream of input validation degrades to diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("No component tree detected on the page")]
    NoComponentTree,

    #[error("Rule engine produced no result set")]
    RuleEngineUnavailable,

    #[error("DOM snapshot is empty")]
    EmptySnapshot,
}

impl ErrorCode for AuditError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoComponentTree => error_code::NO_COMPONENT_TREE,
            _ => error_code::AUDIT_ERROR,
        }
    }
}
