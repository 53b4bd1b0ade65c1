//! Component tree traversal errors.

use super::error_code::{self, ErrorCode};

/// Recoverable traversal failures.
///
/// A cap overflow truncates the walk result; the scan continues with a
/// diagnostic attached to the report.
#[derive(Debug, thiserror::Error)]
pub enum TraversalError {
    #[error("Traversal node cap exceeded: walked {walked} nodes, limit {limit}")]
    NodeCapExceeded { walked: usize, limit: usize },

    #[error("Traversal depth cap exceeded at depth {depth}, limit {limit}")]
    DepthCapExceeded { depth: usize, limit: usize },
}

impl ErrorCode for TraversalError {
    fn error_code(&self) -> &'static str {
        error_code::TRAVERSAL_ERROR
    }
}
