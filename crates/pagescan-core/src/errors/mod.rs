//! Error types for the pagescan pipeline.
//!
//! Only `AuditError` is fatal. Everything else is captured as a diagnostic
//! on the final report and never interrupts the pipeline.

pub mod audit_error;
pub mod checker_error;
pub mod config_error;
pub mod error_code;
pub mod traversal_error;

pub use audit_error::AuditError;
pub use checker_error::CheckerError;
pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use traversal_error::TraversalError;
