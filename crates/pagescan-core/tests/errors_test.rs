//! Tests for the pagescan error handling system.

use std::collections::HashSet;

use pagescan_core::errors::error_code::{self, ErrorCode};
use pagescan_core::errors::*;

#[test]
fn test_all_errors_have_error_code() {
    let audit = AuditError::NoComponentTree;
    assert!(!audit.error_code().is_empty());

    let traversal = TraversalError::NodeCapExceeded {
        walked: 10_001,
        limit: 10_000,
    };
    assert!(!traversal.error_code().is_empty());

    let checker = CheckerError::Failed {
        checker: "target-size",
        message: "bad geometry".into(),
    };
    assert!(!checker.error_code().is_empty());

    let config = ConfigError::FileNotFound {
        path: "/tmp/pagescan.toml".into(),
    };
    assert!(!config.error_code().is_empty());
}

#[test]
fn test_code_string_format() {
    let audit = AuditError::NoComponentTree;
    let s = audit.code_string();
    assert_eq!(s, "[NO_COMPONENT_TREE] No component tree detected on the page");

    let checker = CheckerError::Panicked {
        checker: "focus-appearance",
        message: "index out of bounds".into(),
    };
    assert!(checker.code_string().starts_with("[CHECKER_ERROR]"));
}

#[test]
fn test_display_human_readable() {
    let errors: Vec<Box<dyn std::fmt::Display>> = vec![
        Box::new(AuditError::NoComponentTree),
        Box::new(AuditError::RuleEngineUnavailable),
        Box::new(AuditError::EmptySnapshot),
        Box::new(TraversalError::NodeCapExceeded {
            walked: 12_000,
            limit: 10_000,
        }),
        Box::new(TraversalError::DepthCapExceeded {
            depth: 600,
            limit: 512,
        }),
        Box::new(CheckerError::Failed {
            checker: "dragging",
            message: "marker set empty".into(),
        }),
        Box::new(ConfigError::ValidationFailed {
            field: "snippet.max_length".into(),
            message: "too small".into(),
        }),
    ];

    for error in &errors {
        let msg = error.to_string();
        assert!(!msg.contains("{ "), "Debug leak in: {}", msg);
        assert!(!msg.is_empty());
    }
}

#[test]
fn test_checker_error_carries_identity() {
    let err = CheckerError::Panicked {
        checker: "focus-appearance",
        message: "boom".into(),
    };
    assert_eq!(err.checker(), "focus-appearance");
}

#[test]
fn test_error_codes_unique() {
    let codes = [
        error_code::AUDIT_ERROR,
        error_code::NO_COMPONENT_TREE,
        error_code::TRAVERSAL_ERROR,
        error_code::CHECKER_ERROR,
        error_code::CONFIG_ERROR,
    ];
    let unique: HashSet<&str> = codes.iter().copied().collect();
    assert_eq!(codes.len(), unique.len(), "Duplicate error codes found");
}
