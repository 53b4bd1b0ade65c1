//! Severity and conformance-level types shared across the pipeline.

use serde::{Deserialize, Serialize};

/// Rule-engine-assigned defect severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Serious => "serious",
            Self::Moderate => "moderate",
            Self::Minor => "minor",
        }
    }
}

/// WCAG conformance tier a criterion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    A,
    AA,
    AAA,
}

impl WcagLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AA => "AA",
            Self::AAA => "AAA",
        }
    }

    /// Extract the conformance level from a rule-engine tag, if the tag is a
    /// level tag (`wcag2a`, `wcag21aa`, `wcag22aa`, ...). Non-level tags
    /// (`cat.forms`, `best-practice`, `section508`) return `None`.
    pub fn from_tag(tag: &str) -> Option<WcagLevel> {
        let rest = tag.strip_prefix("wcag")?;
        // Strip the version digits ("2", "21", "22") and read the suffix.
        let suffix = rest.trim_start_matches(|c: char| c.is_ascii_digit());
        if suffix.is_empty() || rest == suffix {
            return None;
        }
        match suffix {
            "a" => Some(WcagLevel::A),
            "aa" => Some(WcagLevel::AA),
            "aaa" => Some(WcagLevel::AAA),
            _ => None,
        }
    }
}
