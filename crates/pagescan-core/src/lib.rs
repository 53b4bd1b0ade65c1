//! pagescan-core: shared foundation for the pagescan audit engine.
//!
//! This crate provides the pieces every pipeline stage depends on:
//! - Errors: per-subsystem error enums with structured error codes
//! - Types: identifier newtypes, collections, geometry, severity levels
//! - Config: audit configuration with TOML loading and validation
//! - Tracing: logging initialization

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::{
    AuditConfig, CheckerConfig, DisplayConfig, FilterConfig, SelectorConfig, SnippetConfig,
    TraversalConfig,
};
pub use errors::{AuditError, CheckerError, ConfigError, TraversalError};
pub use types::geometry::Rect;
pub use types::identifiers::{DescriptorId, NodeId};
pub use types::severity::{Impact, WcagLevel};
