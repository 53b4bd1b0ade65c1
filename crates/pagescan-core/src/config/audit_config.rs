//! Audit configuration structures and TOML loading.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Component tree traversal caps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Maximum nodes walked before the traversal truncates.
    pub max_nodes: usize,
    /// Maximum tree depth before a branch is truncated.
    pub max_depth: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_nodes: 10_000,
            max_depth: 512,
        }
    }
}

/// Selector generation bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Maximum ancestors included in a generated selector.
    pub max_ancestors: usize,
    /// Maximum class names per selector segment.
    pub max_classes: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_ancestors: 4,
            max_classes: 2,
        }
    }
}

/// HTML snippet extraction bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetConfig {
    /// Maximum snippet length in characters.
    pub max_length: usize,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self { max_length: 250 }
    }
}

/// Component path filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Names dropped from user-facing paths and treated as framework
    /// components when they appear at the leaf.
    pub framework_denylist: Vec<String>,
    /// Minimum name length kept in user-facing paths.
    pub min_name_length: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            framework_denylist: [
                "App",
                "Provider",
                "Fragment",
                "Suspense",
                "StrictMode",
                "ErrorBoundary",
                "ThemeProvider",
                "Router",
                "Route",
                "Outlet",
                "Slot",
                "Portal",
                "Primitive",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            min_name_length: 3,
        }
    }
}

/// Structural checker thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Minimum interactive target footprint in device-independent pixels.
    pub min_target_size: f32,
    /// Minimum focus indicator thickness in pixels.
    pub min_focus_outline_width: f32,
    /// Minimum focus indicator contrast ratio against the background.
    pub min_focus_contrast: f64,
    /// Emit suppressed target-size candidates as minor findings carrying
    /// the exception that applied.
    pub report_excepted_targets: bool,
    /// Attribute and class markers identifying drag-library elements.
    pub drag_markers: Vec<String>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            min_target_size: 24.0,
            min_focus_outline_width: 2.0,
            min_focus_contrast: 3.0,
            report_excepted_targets: false,
            drag_markers: [
                "data-rbd-drag-handle",
                "data-rbd-draggable",
                "react-draggable",
                "data-dnd-kit",
                "sortable-handle",
                "sortable-chosen",
                "ui-draggable",
                "draggable-item",
                "interactjs",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Report display bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum violation instances retained per rule in the report.
    pub max_instances: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { max_instances: 50 }
    }
}

/// Top-level configuration for one audit run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub traversal: TraversalConfig,
    pub selector: SelectorConfig,
    pub snippet: SnippetConfig,
    pub filter: FilterConfig,
    pub checkers: CheckerConfig,
    pub display: DisplayConfig,
}

impl AuditConfig {
    /// Parse a config from a TOML string and validate it.
    pub fn from_toml_str(source: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: AuditConfig =
            toml::from_str(source).map_err(|e| ConfigError::ParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_toml_str(&source, &path.display().to_string())
    }

    /// Reject caps that would make the pipeline degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.traversal.max_nodes == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "traversal.max_nodes".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.traversal.max_depth == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "traversal.max_depth".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.snippet.max_length < 8 {
            return Err(ConfigError::ValidationFailed {
                field: "snippet.max_length".into(),
                message: "must be at least 8 characters".into(),
            });
        }
        if self.checkers.min_target_size <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "checkers.min_target_size".into(),
                message: "must be positive".into(),
            });
        }
        if self.checkers.min_focus_contrast < 1.0 {
            return Err(ConfigError::ValidationFailed {
                field: "checkers.min_focus_contrast".into(),
                message: "contrast ratios start at 1.0".into(),
            });
        }
        Ok(())
    }
}
