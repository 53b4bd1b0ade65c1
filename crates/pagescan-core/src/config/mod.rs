//! Audit configuration.
//!
//! One immutable `AuditConfig` value is built up front and passed explicitly
//! into the engine and each checker. There is no ambient/global config state.

pub mod audit_config;

pub use audit_config::{
    AuditConfig, CheckerConfig, DisplayConfig, FilterConfig, SelectorConfig, SnippetConfig,
    TraversalConfig,
};
