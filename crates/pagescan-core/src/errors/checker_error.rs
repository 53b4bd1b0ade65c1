//! Structural checker errors.

use super::error_code::{self, ErrorCode};

/// Failure of one structural checker.
///
/// Checkers run inside their own failure boundary; a failed checker is
/// recorded against its identity and the remaining checkers proceed.
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    #[error("Checker {checker} failed: {message}")]
    Failed { checker: &'static str, message: String },

    #[error("Checker {checker} panicked: {message}")]
    Panicked { checker: &'static str, message: String },
}

impl CheckerError {
    /// The identity of the checker that failed.
    pub fn checker(&self) -> &'static str {
        match self {
            Self::Failed { checker, .. } | Self::Panicked { checker, .. } => checker,
        }
    }
}

impl ErrorCode for CheckerError {
    fn error_code(&self) -> &'static str {
        error_code::CHECKER_ERROR
    }
}
